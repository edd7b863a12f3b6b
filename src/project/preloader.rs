//! Bulk discovery and eager loading.
//!
//! Discovery and materialization are separate steps: [`discover_under_roots`]
//! finds symbols and registers them as overrides without loading anything,
//! and [`Preloader::materialize`] loads an already known list without
//! rescanning.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;

use super::file_loader::{self, DiscoveredFile};
use crate::base::{SymbolName, canonical_dir, with_trailing_separator};
use crate::config::PreloadConfig;
use crate::error::{AutoloadError, Result};
use crate::registry::{Autoloader, LoadHook};

/// Scan `roots`, register every file whose declared symbol passes `filter`
/// as an override, and return those files sorted and deduplicated.
///
/// Every root must be a directory. On the first one that is not, nothing
/// is scanned or registered.
pub fn discover_under_roots<I, P, F>(
    autoloader: &mut Autoloader,
    roots: I,
    filter: F,
) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
    F: FnMut(&SymbolName) -> bool,
{
    let roots = roots
        .into_iter()
        .map(|root| canonical_dir(root.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    Ok(discover(autoloader, roots, &[], filter))
}

fn discover<I, P, F>(
    autoloader: &mut Autoloader,
    roots: I,
    excluded: &[String],
    mut filter: F,
) -> Vec<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
    F: FnMut(&SymbolName) -> bool,
{
    let extension = autoloader.extension().to_string();
    let mut found = BTreeSet::new();

    for root in roots {
        let root = root.as_ref();
        for DiscoveredFile { path, symbol } in file_loader::scan_files(root, &extension, excluded) {
            let Some(symbol) = symbol else { continue };
            if !filter(&symbol) {
                tracing::trace!(%symbol, "filtered out");
                continue;
            }
            if let Err(error) = autoloader.set_override(symbol.as_str(), &path) {
                tracing::debug!(%symbol, %error, "discovered file vanished");
                continue;
            }
            if let Some(registered) = autoloader.override_path(symbol.as_str()) {
                found.insert(registered.to_path_buf());
            }
        }
        tracing::debug!(root = %root.display(), total = found.len(), "root scanned");
    }

    found.into_iter().collect()
}

/// Namespace allow-list built from an autoloader and preload settings.
///
/// A snapshot: it owns its data so discovery can register overrides while
/// the filter is in use.
#[derive(Clone, Debug, Default)]
struct SymbolFilter {
    overrides: FxHashSet<SymbolName>,
    namespaces: Vec<SymbolName>,
    package_namespaces: Vec<String>,
    dev_namespaces: Vec<String>,
    with_packages: bool,
    with_dev_packages: bool,
}

impl SymbolFilter {
    fn packages_only(config: &PreloadConfig) -> Self {
        Self {
            package_namespaces: config.package_namespaces.clone(),
            dev_namespaces: config.dev_namespaces.clone(),
            with_packages: true,
            with_dev_packages: config.with_dev_packages,
            ..Self::default()
        }
    }

    fn new(autoloader: &Autoloader, config: &PreloadConfig) -> Self {
        Self {
            overrides: autoloader.overrides().map(|(name, _)| name.clone()).collect(),
            namespaces: autoloader.namespaces().map(|(name, _)| name.clone()).collect(),
            with_packages: config.with_packages || config.with_dev_packages,
            ..Self::packages_only(config)
        }
    }

    fn allows(&self, symbol: &SymbolName) -> bool {
        self.overrides.contains(symbol)
            || self.namespaces.iter().any(|ns| symbol.is_within(ns.as_str()))
            || (self.with_packages && self.allows_package(symbol))
    }

    fn allows_package(&self, symbol: &SymbolName) -> bool {
        if self.dev_namespaces.iter().any(|ns| symbol.is_within(ns)) {
            return self.with_dev_packages;
        }
        self.package_namespaces.iter().any(|ns| symbol.is_within(ns))
    }
}

/// Discovers the symbols of an autoloader's namespaces (and optionally an
/// installed packages directory) and loads their files eagerly.
#[derive(Debug)]
pub struct Preloader {
    autoloader: Autoloader,
    config: PreloadConfig,
    /// Canonical packages directory with trailing separator.
    packages_dir: Option<PathBuf>,
}

impl Preloader {
    /// Create a preloader. Fails if the configured packages directory does
    /// not exist.
    pub fn new(autoloader: Autoloader, config: PreloadConfig) -> Result<Self> {
        let mut preloader = Self {
            autoloader,
            config,
            packages_dir: None,
        };
        if let Some(dir) = preloader.config.packages_dir.clone() {
            preloader.set_packages_dir(dir)?;
        }
        Ok(preloader)
    }

    pub fn autoloader(&self) -> &Autoloader {
        &self.autoloader
    }

    pub fn autoloader_mut(&mut self) -> &mut Autoloader {
        &mut self.autoloader
    }

    pub fn into_autoloader(self) -> Autoloader {
        self.autoloader
    }

    pub fn config(&self) -> &PreloadConfig {
        &self.config
    }

    pub fn set_packages_dir(&mut self, dir: impl AsRef<Path>) -> Result<&mut Self> {
        let dir = dir.as_ref();
        let real = match dir.canonicalize() {
            Ok(real) if real.is_dir() => real,
            _ => {
                return Err(AutoloadError::InvalidPackagesDir {
                    path: dir.to_path_buf(),
                });
            }
        };
        self.config.packages_dir = Some(dir.to_path_buf());
        self.packages_dir = Some(with_trailing_separator(real));
        Ok(self)
    }

    /// The canonical packages directory, with a trailing separator.
    pub fn packages_dir(&self) -> Option<&Path> {
        self.packages_dir.as_deref()
    }

    /// Include the packages directory in [`list_files`](Self::list_files).
    pub fn with_packages(&mut self) -> &mut Self {
        self.config.with_packages = true;
        self
    }

    /// Include the packages directory and development namespaces.
    pub fn with_dev_packages(&mut self) -> &mut Self {
        self.config.with_packages = true;
        self.config.with_dev_packages = true;
        self
    }

    /// Discover the package symbols under the packages directory.
    ///
    /// Empty when no packages directory is set.
    pub fn list_packages_files(&mut self) -> Vec<PathBuf> {
        let Some(dir) = self.packages_dir.clone() else {
            return Vec::new();
        };
        let filter = SymbolFilter::packages_only(&self.config);
        discover(
            &mut self.autoloader,
            [dir],
            &self.config.excluded_paths,
            |symbol| filter.allows_package(symbol),
        )
    }

    /// Discover every preloadable file.
    ///
    /// Scans all registered namespace directories (plus the packages
    /// directory when packages are enabled) and keeps symbols that are
    /// overridden, live under a registered namespace, or belong to an
    /// allowed package. Override files are always included.
    pub fn list_files(&mut self) -> Vec<PathBuf> {
        let filter = SymbolFilter::new(&self.autoloader, &self.config);

        let mut seen = FxHashSet::default();
        let mut roots: Vec<PathBuf> = self
            .autoloader
            .namespaces()
            .flat_map(|(_, directories)| directories.iter().cloned())
            .filter(|dir| seen.insert(dir.clone()))
            .collect();
        if filter.with_packages {
            if let Some(dir) = &self.packages_dir {
                if seen.insert(dir.clone()) {
                    roots.push(dir.clone());
                }
            }
        }

        let mut files: BTreeSet<PathBuf> = self
            .autoloader
            .overrides()
            .map(|(_, path)| path.to_path_buf())
            .collect();
        files.extend(discover(
            &mut self.autoloader,
            roots,
            &self.config.excluded_paths,
            |symbol| filter.allows(symbol),
        ));
        files.into_iter().collect()
    }

    /// Hand each file to `hook` once, in the given order.
    ///
    /// Repeated paths within one call are skipped. Returns the files that
    /// were handed over.
    pub fn materialize<I>(&self, files: I, hook: &mut impl LoadHook) -> Vec<PathBuf>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut materialized = FxHashSet::default();
        let mut processed = Vec::new();
        for file in files {
            if !materialized.insert(file.clone()) {
                continue;
            }
            hook.load(&file);
            processed.push(file);
        }
        tracing::debug!(count = processed.len(), "files materialized");
        processed
    }

    /// [`list_files`](Self::list_files) followed by [`materialize`](Self::materialize).
    pub fn load(&mut self, hook: &mut impl LoadHook) -> Vec<PathBuf> {
        let files = self.list_files();
        self.materialize(files, hook)
    }
}
