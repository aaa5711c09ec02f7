//! Module discovery
//!
//! Finds candidate module files in a plugin directory by the platform's
//! native shared-library extension.

use std::path::{Path, PathBuf};

/// Whether `path` carries this platform's shared-library extension
pub fn is_native_library(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(std::env::consts::DLL_EXTENSION))
}

/// Platform file name for a module called `name` (`libname.so`, `name.dll`, ...)
pub fn library_file_name(name: &str) -> PathBuf {
    PathBuf::from(libloading::library_filename(name))
}

/// Module files directly inside `dir`, sorted by path.
///
/// A missing or unreadable directory yields an empty list.
pub fn discover_libraries(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("Plugin directory {} not readable: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut libraries: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_native_library(path))
        .collect();
    libraries.sort();

    log::debug!(
        "Discovered {} module(s) in {}",
        libraries.len(),
        dir.display()
    );
    libraries
}
