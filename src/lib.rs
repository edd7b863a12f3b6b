//! # autoload-base
//!
//! Resolves fully qualified symbol names to the source files that define
//! them, and scans source trees to discover which symbol each file defines.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project  → Locator, Preloader (bulk discovery), file walking
//!   ↓
//! registry → Autoloader: overrides + namespace directories + resolution
//!   ↓
//! syntax   → logos lexer + first-declared-symbol extraction
//!   ↓
//! base     → Primitives (SymbolName, path canonicalization)
//! ```
//!
//! `config` and `debug` sit beside the stack: settings structs and load
//! telemetry records.
//!
//! ## Usage
//!
//! ```no_run
//! use autoload::{Autoloader, Preloader, PreloadConfig};
//! use std::path::Path;
//!
//! let mut autoloader = Autoloader::new();
//! autoloader.set_namespace("App", ["src"])?;
//!
//! if let Some(file) = autoloader.resolve("App\\Http\\Kernel") {
//!     println!("{}", file.display());
//! }
//!
//! let mut preloader = Preloader::new(autoloader, PreloadConfig::default())?;
//! let loaded = preloader.load(&mut |file: &Path| println!("{}", file.display()));
//! # Ok::<(), autoload::AutoloadError>(())
//! ```

/// Foundation types: SymbolName, path helpers
pub mod base;

/// Autoloader and preloader settings
pub mod config;

/// Load telemetry records
pub mod debug;

mod error;

/// Source trees: listing, locating, preloading
pub mod project;

/// Namespace registry and resolution
pub mod registry;

/// Lexer and declared-symbol extraction
pub mod syntax;

// Re-export commonly needed items
pub use base::{NAMESPACE_SEPARATOR, SymbolName};
pub use config::{AutoloadConfig, PreloadConfig};
pub use debug::{LoadCollector, LoadRecord};
pub use error::{AutoloadError, Result};
pub use project::{Locator, Preloader, discover_under_roots, list_files};
pub use registry::{Autoloader, LoadHook};
pub use syntax::extract_declared_symbol;
