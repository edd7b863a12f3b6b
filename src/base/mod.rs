//! Foundation types for the autoloader.
//!
//! This module provides the primitives used throughout the crate:
//! - [`SymbolName`] - Normalized, fully qualified symbol names
//! - path helpers for canonicalizing registered files and directories
//!
//! This module has NO dependencies on other autoload modules except the
//! error type.

mod name;
mod path;

pub use name::{NAMESPACE_SEPARATOR, SymbolName, normalize_name};
pub use path::{ensure_extension, symbol_file_path};
pub(crate) use path::{canonical_dir, canonical_file, with_trailing_separator};
