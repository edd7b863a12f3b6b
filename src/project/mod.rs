//! Project-level operations: walking source trees, locating files through
//! namespaces, and bulk preloading.

pub mod file_loader;
mod locator;
mod preloader;

pub use file_loader::{DiscoveredFile, list_files, scan_files};
pub use locator::Locator;
pub use preloader::{Preloader, discover_under_roots};
