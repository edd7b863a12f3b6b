//! Autoloader and preloader settings.
//!
//! Both structs are plain data with `Default` and `with_*` builders. With
//! the `serde` feature they can also be read from JSON documents.

use std::path::PathBuf;

/// Default source file extension.
pub const DEFAULT_EXTENSION: &str = ".php";

/// Settings for an [`Autoloader`](crate::registry::Autoloader).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AutoloadConfig {
    /// Extension appended to symbol paths and used to select source files.
    pub extension: String,
}

impl Default for AutoloadConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl AutoloadConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Parse settings from a JSON document. Missing fields keep defaults.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Path fragments skipped by preloading unless overridden: IDE metadata,
/// translation tables and view templates.
pub const DEFAULT_EXCLUDED_PATHS: [&str; 3] = [".phpstorm.meta.php", "/src/Languages/", "/src/Views/"];

/// Settings for a [`Preloader`](crate::project::Preloader).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PreloadConfig {
    /// Root directory holding installed packages.
    pub packages_dir: Option<PathBuf>,
    /// Namespaces whose symbols are preloaded from the packages directory.
    /// Empty by default, so nothing is preloaded from packages until the
    /// host names them.
    pub package_namespaces: Vec<String>,
    /// Namespaces only used in development (coding standards, test helpers).
    /// Skipped unless `with_dev_packages` is set.
    pub dev_namespaces: Vec<String>,
    /// Path fragments that exclude a file before it is scanned. Defaults to
    /// [`DEFAULT_EXCLUDED_PATHS`].
    pub excluded_paths: Vec<String>,
    /// Include the packages directory in [`Preloader::list_files`](crate::project::Preloader::list_files).
    pub with_packages: bool,
    /// Include development namespaces. Implies `with_packages`.
    pub with_dev_packages: bool,
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            packages_dir: None,
            package_namespaces: Vec::new(),
            dev_namespaces: Vec::new(),
            excluded_paths: DEFAULT_EXCLUDED_PATHS.iter().map(|f| f.to_string()).collect(),
            with_packages: false,
            with_dev_packages: false,
        }
    }
}

impl PreloadConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_packages_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.packages_dir = Some(dir.into());
        self
    }

    pub fn with_package_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.package_namespaces = namespaces.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dev_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dev_namespaces = namespaces.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_excluded_paths<I, S>(mut self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_paths = fragments.into_iter().map(Into::into).collect();
        self
    }

    /// Parse settings from a JSON document. Missing fields keep defaults.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
