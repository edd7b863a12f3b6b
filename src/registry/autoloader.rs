//! The namespace registry and symbol resolution.
//!
//! An [`Autoloader`] owns two tables:
//!
//! 1. **Overrides** - exact symbol → file mappings, checked first
//! 2. **Namespaces** - namespace prefix → candidate directories, probed on
//!    demand in a fixed order
//!
//! Namespace keys are kept in descending lexical order after every
//! mutation. This puts `Foo\Bar` before `Foo`, but it is an ordering of
//! keys, not a longest-prefix match: `Zed` still precedes `Alpha\Beta\Gamma`.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use indexmap::IndexMap;

use super::LoadHook;
use crate::base::{SymbolName, canonical_dir, canonical_file, normalize_name, symbol_file_path};
use crate::config::AutoloadConfig;
use crate::debug::{LoadCollector, LoadRecord};
use crate::error::Result;

/// Symbol-to-file resolver for one loading domain.
///
/// Registration validates paths once (fail fast); lookups re-probe the
/// filesystem every time and never cache misses.
#[derive(Clone, Debug, Default)]
pub struct Autoloader {
    config: AutoloadConfig,
    /// Symbol → canonical file path, in insertion order.
    overrides: IndexMap<SymbolName, PathBuf>,
    /// Namespace → canonical directories (with trailing separator),
    /// sorted by key descending.
    namespaces: IndexMap<SymbolName, Vec<PathBuf>>,
    collector: Option<LoadCollector>,
}

impl Autoloader {
    /// Create an empty autoloader with the default extension.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AutoloadConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &AutoloadConfig {
        &self.config
    }

    /// The source file extension, including the leading dot.
    pub fn extension(&self) -> &str {
        &self.config.extension
    }

    // ========================================================================
    // OVERRIDES
    // ========================================================================

    /// Map one symbol to a file. Overwrites any previous mapping.
    pub fn set_override(&mut self, symbol: &str, file: impl AsRef<Path>) -> Result<&mut Self> {
        let file = canonical_file(file.as_ref())?;
        let symbol = SymbolName::new(symbol);
        tracing::debug!(%symbol, file = %file.display(), "override registered");
        self.overrides.insert(symbol, file);
        Ok(self)
    }

    /// Map several symbols to files.
    ///
    /// Stops at the first invalid file; earlier entries stay registered.
    pub fn set_overrides<I, S, P>(&mut self, overrides: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (S, P)>,
        S: AsRef<str>,
        P: AsRef<Path>,
    {
        for (symbol, file) in overrides {
            self.set_override(symbol.as_ref(), file)?;
        }
        Ok(self)
    }

    /// The file registered for `symbol`, if any.
    pub fn override_path(&self, symbol: &str) -> Option<&Path> {
        self.overrides
            .get(normalize_name(symbol))
            .map(PathBuf::as_path)
    }

    /// All overrides in registration order.
    pub fn overrides(&self) -> impl Iterator<Item = (&SymbolName, &Path)> {
        self.overrides.iter().map(|(name, path)| (name, path.as_path()))
    }

    pub fn remove_override(&mut self, symbol: &str) -> &mut Self {
        self.overrides.shift_remove(normalize_name(symbol));
        self
    }

    pub fn remove_overrides<I, S>(&mut self, symbols: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for symbol in symbols {
            self.remove_override(symbol.as_ref());
        }
        self
    }

    // ========================================================================
    // NAMESPACES
    // ========================================================================

    /// Replace the directory list of a namespace.
    ///
    /// Every directory must exist; on the first one that does not, nothing
    /// is changed. An empty list is ignored.
    pub fn set_namespace<I, P>(&mut self, name: &str, directories: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let directories = canonical_dirs(directories)?;
        if !directories.is_empty() {
            let name = SymbolName::new(name);
            tracing::debug!(namespace = %name, count = directories.len(), "namespace set");
            self.namespaces.insert(name, directories);
            self.sort_namespaces();
        }
        Ok(self)
    }

    /// Append directories to a namespace, creating it if needed.
    pub fn add_namespace<I, P>(&mut self, name: &str, directories: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let directories = canonical_dirs(directories)?;
        if !directories.is_empty() {
            let name = SymbolName::new(name);
            tracing::debug!(namespace = %name, count = directories.len(), "namespace extended");
            self.namespaces.entry(name).or_default().extend(directories);
            self.sort_namespaces();
        }
        Ok(self)
    }

    /// Replace the directory lists of several namespaces.
    pub fn set_namespaces<I, S, D, P>(&mut self, namespaces: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (S, D)>,
        S: AsRef<str>,
        D: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for (name, directories) in namespaces {
            self.set_namespace(name.as_ref(), directories)?;
        }
        Ok(self)
    }

    /// Append directories to several namespaces.
    pub fn add_namespaces<I, S, D, P>(&mut self, namespaces: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (S, D)>,
        S: AsRef<str>,
        D: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for (name, directories) in namespaces {
            self.add_namespace(name.as_ref(), directories)?;
        }
        Ok(self)
    }

    /// Directories of a namespace; empty when it is not registered.
    pub fn namespace(&self, name: &str) -> &[PathBuf] {
        self.namespaces
            .get(normalize_name(name))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Check if `name` is a registered namespace (exact key match).
    pub fn has_namespace(&self, name: &str) -> bool {
        self.namespaces.contains_key(normalize_name(name))
    }

    /// All namespaces in resolution order (descending by key).
    pub fn namespaces(&self) -> impl Iterator<Item = (&SymbolName, &[PathBuf])> {
        self.namespaces.iter().map(|(name, dirs)| (name, dirs.as_slice()))
    }

    pub fn remove_namespace(&mut self, name: &str) -> &mut Self {
        self.namespaces.shift_remove(normalize_name(name));
        self
    }

    pub fn remove_namespaces<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.remove_namespace(name.as_ref());
        }
        self
    }

    fn sort_namespaces(&mut self) {
        self.namespaces.sort_by(|a, _, b, _| b.cmp(a));
    }

    // ========================================================================
    // RESOLUTION
    // ========================================================================

    /// Resolve a symbol to the file that should define it.
    ///
    /// Overrides win. Otherwise every namespace containing the symbol is
    /// tried in key order, each of its directories in list order, and the
    /// first existing file is returned. A miss is `None`.
    pub fn resolve(&self, symbol: &str) -> Option<PathBuf> {
        let symbol = SymbolName::new(symbol);
        if let Some(path) = self.overrides.get(symbol.as_str()) {
            return Some(path.clone());
        }

        for (namespace, directories) in &self.namespaces {
            let Some(remainder) = symbol.strip_namespace(namespace.as_str()) else {
                continue;
            };
            for directory in directories {
                let candidate = symbol_file_path(directory, remainder, self.extension());
                if candidate.is_file() {
                    tracing::trace!(%symbol, file = %candidate.display(), "resolved via namespace");
                    return Some(candidate);
                }
            }
        }

        tracing::trace!(%symbol, "unresolved");
        None
    }

    // ========================================================================
    // LOADING
    // ========================================================================

    /// Resolve `symbol` and hand the file to `hook`.
    ///
    /// Returns `true` if the hook ran. When a collector is attached the
    /// attempt is recorded whether or not it succeeded.
    pub fn load(&mut self, symbol: &str, hook: &mut impl LoadHook) -> bool {
        let start = SystemTime::now();
        let file = self.resolve(symbol);
        if let Some(path) = &file {
            hook.load(path);
        }
        let loaded = file.is_some();

        if let Some(collector) = self.collector.as_mut() {
            collector.record(LoadRecord {
                symbol: SymbolName::new(symbol),
                file,
                start,
                end: SystemTime::now(),
                loaded,
            });
        }
        loaded
    }

    /// Attach a collector that records every [`load`](Self::load) attempt.
    pub fn set_collector(&mut self, collector: LoadCollector) -> &mut Self {
        self.collector = Some(collector);
        self
    }

    pub fn collector(&self) -> Option<&LoadCollector> {
        self.collector.as_ref()
    }

    /// Detach and return the collector.
    pub fn take_collector(&mut self) -> Option<LoadCollector> {
        self.collector.take()
    }
}

fn canonical_dirs<I, P>(directories: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    directories
        .into_iter()
        .map(|dir| canonical_dir(dir.as_ref()))
        .collect()
}
