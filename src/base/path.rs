//! Path canonicalization for registered files and directories.

use std::ffi::OsString;
use std::path::{MAIN_SEPARATOR_STR, Path, PathBuf};

use super::name::NAMESPACE_SEPARATOR;
use crate::error::{AutoloadError, Result};

/// Canonicalize a path that must name a regular file.
pub(crate) fn canonical_file(path: &Path) -> Result<PathBuf> {
    match path.canonicalize() {
        Ok(real) if real.is_file() => Ok(real),
        _ => Err(AutoloadError::NotAFile {
            path: path.to_path_buf(),
        }),
    }
}

/// Canonicalize a path that must name a directory.
///
/// The returned path carries a trailing separator so that relative file
/// paths can be appended directly.
pub(crate) fn canonical_dir(path: &Path) -> Result<PathBuf> {
    match path.canonicalize() {
        Ok(real) if real.is_dir() => Ok(with_trailing_separator(real)),
        _ => Err(AutoloadError::NotADirectory {
            path: path.to_path_buf(),
        }),
    }
}

pub(crate) fn with_trailing_separator(path: PathBuf) -> PathBuf {
    let mut raw: OsString = path.into_os_string();
    if !raw.to_string_lossy().ends_with(MAIN_SEPARATOR_STR) {
        raw.push(MAIN_SEPARATOR_STR);
    }
    PathBuf::from(raw)
}

/// Append `extension` unless the name already ends with it.
pub fn ensure_extension(file: &str, extension: &str) -> String {
    if file.ends_with(extension) {
        file.to_string()
    } else {
        format!("{file}{extension}")
    }
}

/// Build the file path of a symbol remainder under `directory`.
///
/// `Sub\Name` with `.php` under `/src/` becomes `/src/Sub/Name.php`.
pub fn symbol_file_path(directory: &Path, remainder: &str, extension: &str) -> PathBuf {
    let relative = remainder.replace(NAMESPACE_SEPARATOR, MAIN_SEPARATOR_STR);
    directory.join(format!("{relative}{extension}"))
}
