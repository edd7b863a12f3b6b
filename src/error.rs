//! Error types for registration and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while registering overrides, namespaces or preload roots.
///
/// Lookups never produce these: a symbol that cannot be resolved is an
/// ordinary `None`.
#[derive(Debug, Error)]
pub enum AutoloadError {
    /// An override target does not resolve to a regular file.
    #[error("path is not a file: {}", path.display())]
    NotAFile {
        /// The path as it was given by the caller.
        path: PathBuf,
    },

    /// A namespace directory does not resolve to a directory.
    #[error("path is not a directory: {}", path.display())]
    NotADirectory {
        /// The path as it was given by the caller.
        path: PathBuf,
    },

    /// The preloader packages directory does not resolve to a directory.
    #[error("invalid packages dir: {}", path.display())]
    InvalidPackagesDir {
        /// The path as it was given by the caller.
        path: PathBuf,
    },

    /// A configuration document could not be parsed.
    #[cfg(feature = "serde")]
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for registration operations.
pub type Result<T> = std::result::Result<T, AutoloadError>;
