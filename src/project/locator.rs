//! File lookups on top of an autoloader's namespace directories.

use std::path::{Path, PathBuf};

use super::file_loader;
use crate::base::{NAMESPACE_SEPARATOR, SymbolName, ensure_extension};
use crate::registry::Autoloader;
use crate::syntax;

/// Finds files through the namespaces registered in an [`Autoloader`].
#[derive(Clone, Copy, Debug)]
pub struct Locator<'a> {
    autoloader: &'a Autoloader,
}

impl<'a> Locator<'a> {
    pub fn new(autoloader: &'a Autoloader) -> Self {
        Self { autoloader }
    }

    /// See [`file_loader::list_files`].
    pub fn list_files(&self, directory: impl AsRef<Path>) -> Option<Vec<PathBuf>> {
        file_loader::list_files(directory)
    }

    /// See [`syntax::extract_declared_symbol`].
    pub fn declared_symbol(&self, file: impl AsRef<Path>) -> Option<SymbolName> {
        syntax::extract_declared_symbol(file.as_ref())
    }

    /// Resolve a logical path such as `Tests/Foo/LocatorTest` to a file.
    ///
    /// Leading segments are accumulated into namespace candidates
    /// (`Tests`, `Tests\Foo`, ...). The first candidate that is registered
    /// decides: the remaining segments and the file name are probed under
    /// each of its directories. If no candidate is registered, or the
    /// deciding namespace has no such file, the path itself is tried
    /// relative to the working directory.
    pub fn namespaced_file_path(&self, file: &str) -> Option<PathBuf> {
        let extension = self.autoloader.extension();
        let file = if extension.is_empty() {
            file.to_string()
        } else {
            ensure_extension(file, extension)
        };
        let normalized = file.replace(NAMESPACE_SEPARATOR, "/");
        let relative = normalized.trim_start_matches('/');

        let mut segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
        let file_name = segments.pop()?;

        let mut namespace = String::new();
        for (idx, segment) in segments.iter().enumerate() {
            if !namespace.is_empty() {
                namespace.push(NAMESPACE_SEPARATOR);
            }
            namespace.push_str(segment);

            if !self.autoloader.has_namespace(&namespace) {
                continue;
            }
            for directory in self.autoloader.namespace(&namespace) {
                let mut candidate = directory.clone();
                candidate.extend(&segments[idx + 1..]);
                candidate.push(file_name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
            break;
        }

        let fallback = PathBuf::from(relative);
        fallback.is_file().then_some(fallback)
    }

    /// Every `directory/file_name` that exists across all namespace
    /// directories, in namespace order. `extension` is appended when
    /// missing; pass an empty string to use the name as is.
    pub fn find_files(&self, file_name: &str, extension: &str) -> Vec<PathBuf> {
        let file_name = if extension.is_empty() {
            file_name.to_string()
        } else {
            ensure_extension(file_name, extension)
        };

        self.autoloader
            .namespaces()
            .flat_map(|(_, directories)| directories)
            .map(|directory| directory.join(&file_name))
            .filter(|candidate| candidate.is_file())
            .collect()
    }

    /// All files inside `sub_directory` of every namespace directory.
    pub fn files_under(&self, sub_directory: impl AsRef<Path>) -> Vec<PathBuf> {
        let sub_directory = sub_directory.as_ref();
        self.autoloader
            .namespaces()
            .flat_map(|(_, directories)| directories)
            .filter_map(|directory| file_loader::list_files(directory.join(sub_directory)))
            .flatten()
            .collect()
    }
}
