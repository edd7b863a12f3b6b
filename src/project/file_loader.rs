//! Recursive file listing and per-file symbol scanning.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::base::SymbolName;
use crate::syntax::extract_declared_symbol;

/// A scanned source file and the symbol it declares, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub symbol: Option<SymbolName>,
}

/// List every file below `root`, depth first.
///
/// Entries of each directory are visited in file-name order and
/// subdirectories are expanded in place, so `a.txt`, `sub/b.txt`, `z.txt`
/// come out in that order. Returns `None` if `root` cannot be
/// canonicalized. Symlinks are followed; entries the walker cannot read
/// (including symlink loops) are skipped with a warning.
pub fn list_files(root: impl AsRef<Path>) -> Option<Vec<PathBuf>> {
    let root = root.as_ref().canonicalize().ok()?;
    let mut files = Vec::new();

    for entry in WalkDir::new(&root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
            Ok(_) => {}
            Err(error) => {
                tracing::warn!(root = %root.display(), %error, "skipping unreadable entry");
            }
        }
    }

    Some(files)
}

/// Scan the source files below `root`.
///
/// Only files ending in `extension` are tokenized; paths containing any
/// of `excluded` are dropped first. Missing roots scan as empty.
pub fn scan_files(root: &Path, extension: &str, excluded: &[String]) -> Vec<DiscoveredFile> {
    let Some(files) = list_files(root) else {
        tracing::debug!(root = %root.display(), "scan root does not exist");
        return Vec::new();
    };

    files
        .into_iter()
        .filter(|path| {
            let text = path.to_string_lossy();
            text.ends_with(extension) && !excluded.iter().any(|f| text.contains(f.as_str()))
        })
        .map(|path| {
            let symbol = extract_declared_symbol(&path);
            if symbol.is_none() {
                tracing::trace!(path = %path.display(), "no declared symbol");
            }
            DiscoveredFile { path, symbol }
        })
        .collect()
}
