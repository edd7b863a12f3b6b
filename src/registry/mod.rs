//! Symbol registry: overrides, namespace directories and resolution.
//!
//! The registry is an explicit value: callers construct one [`Autoloader`]
//! per loading domain and pass it to whatever needs symbol-to-file lookup.
//! Nothing is registered globally.

mod autoloader;

use std::path::Path;

pub use autoloader::Autoloader;

/// Brings a resolved file into the host.
///
/// What "loading" means is up to the host; the registry only guarantees
/// that the hook is called with files it has positively resolved.
pub trait LoadHook {
    fn load(&mut self, file: &Path);
}

impl<F> LoadHook for F
where
    F: FnMut(&Path),
{
    fn load(&mut self, file: &Path) {
        self(file)
    }
}
