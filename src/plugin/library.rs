//! Native module loading
//!
//! [`LibraryLoader`] owns exactly one OS module handle. [`Library`] drives
//! the load → resolve → register sequence on top of it and guarantees that
//! a module which opens but cannot be resolved is closed again before the
//! error is returned.
//!
//! The OS handle is shared through [`LibraryHandle`]. Objects whose code lives
//! in a module hold a clone, so the module is only closed once the loader is
//! freed and the last such object has been dropped.

use crate::core::version::get_api_version;
use crate::plugin::abi::{
    ApiVersionFn, InitLoggerFn, RegisterFn, API_VERSION_SYMBOL, LOGGER_SYMBOL, REGISTER_SYMBOL,
};
use crate::plugin::error::LibraryError;
use crate::plugin::registry::Registry;
use crate::plugin::types::LibraryState;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shared reference to an open module
///
/// The module stays mapped while any clone is alive.
#[derive(Debug, Clone)]
pub struct LibraryHandle(Arc<libloading::Library>);

impl LibraryHandle {
    /// Number of live references to the module, the loader's included
    pub fn holders(&self) -> usize {
        Arc::strong_count(&self.0)
    }
}

/// Owner of one platform module handle
#[derive(Debug, Default)]
pub struct LibraryLoader {
    handle: Option<LibraryHandle>,
}

impl LibraryLoader {
    pub fn new() -> Self {
        Self { handle: None }
    }

    pub fn is_loaded(&self) -> bool {
        self.handle.is_some()
    }

    /// Open the module at `path`, closing any handle held before.
    ///
    /// Opening runs the module's initialisers; a module must be trusted.
    pub fn load(&mut self, path: &Path) -> Result<(), LibraryError> {
        self.free();
        let library = unsafe { libloading::Library::new(path) }.map_err(LibraryError::Open)?;
        self.handle = Some(LibraryHandle(Arc::new(library)));
        Ok(())
    }

    /// A new reference to the open module
    pub fn handle(&self) -> Option<LibraryHandle> {
        self.handle.clone()
    }

    fn library(&self) -> Result<&libloading::Library, LibraryError> {
        self.handle
            .as_ref()
            .map(|handle| &*handle.0)
            .ok_or(LibraryError::NotLoaded)
    }

    /// Resolve the registration entry point.
    ///
    /// The returned pointer is only valid while this loader stays loaded.
    pub fn register_function(&self) -> Result<RegisterFn, LibraryError> {
        let library = self.library()?;
        let symbol = unsafe { library.get::<RegisterFn>(REGISTER_SYMBOL.as_bytes()) }.map_err(
            |source| LibraryError::EntryPointMissing {
                symbol: REGISTER_SYMBOL,
                source,
            },
        )?;
        Ok(*symbol)
    }

    /// API version exported by the module, if it exports one
    pub fn api_version(&self) -> Option<u32> {
        let library = self.library().ok()?;
        let symbol = unsafe { library.get::<ApiVersionFn>(API_VERSION_SYMBOL.as_bytes()) }.ok()?;
        Some(symbol())
    }

    /// Logger hook exported by the module, if it exports one
    pub fn logger_hook(&self) -> Option<InitLoggerFn> {
        let library = self.library().ok()?;
        let symbol = unsafe { library.get::<InitLoggerFn>(LOGGER_SYMBOL.as_bytes()) }.ok()?;
        Some(*symbol)
    }

    /// Release this loader's reference. Safe to call any number of times.
    ///
    /// The module is closed here unless a [`LibraryHandle`] is still held
    /// elsewhere, in which case the last holder closes it.
    pub fn free(&mut self) {
        let Some(LibraryHandle(shared)) = self.handle.take() else {
            return;
        };
        match Arc::try_unwrap(shared) {
            Ok(library) => {
                if let Err(e) = library.close() {
                    log::warn!("Closing module handle failed: {}", e);
                }
            }
            Err(shared) => log::debug!(
                "Module still referenced by {} object(s), closing deferred",
                Arc::strong_count(&shared) - 1
            ),
        }
    }
}

impl Drop for LibraryLoader {
    fn drop(&mut self) {
        self.free();
    }
}

/// A dynamically loaded module contributing plugins
#[derive(Debug)]
pub struct Library {
    path: PathBuf,
    loader: LibraryLoader,
    register_fn: Option<RegisterFn>,
    logger_hook: Option<InitLoggerFn>,
    state: LibraryState,
}

impl Library {
    pub fn new() -> Self {
        Self {
            path: PathBuf::new(),
            loader: LibraryLoader::new(),
            register_fn: None,
            logger_hook: None,
            state: LibraryState::Unloaded,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> LibraryState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.loader.is_loaded()
    }

    /// A new reference to the open module, `None` once freed
    pub fn handle(&self) -> Option<LibraryHandle> {
        self.loader.handle()
    }

    /// Open the module and resolve its entry point.
    ///
    /// On any failure the handle is closed and the state is `Released`.
    pub fn load(&mut self, path: &Path) -> Result<(), LibraryError> {
        self.free();
        self.path = path.to_path_buf();

        if let Err(e) = self.loader.load(path) {
            self.state = LibraryState::Released;
            return Err(e);
        }
        self.state = LibraryState::Loaded;
        log::debug!("Opened module {}", path.display());

        match self.resolve() {
            Ok(register_fn) => {
                self.register_fn = Some(register_fn);
                self.logger_hook = self.loader.logger_hook();
                self.state = LibraryState::Resolved;
                Ok(())
            }
            Err(e) => {
                self.free();
                Err(e)
            }
        }
    }

    fn resolve(&self) -> Result<RegisterFn, LibraryError> {
        let register_fn = self.loader.register_function()?;

        if let Some(found) = self.loader.api_version() {
            let expected = get_api_version();
            if found != expected {
                return Err(LibraryError::ApiVersionMismatch { expected, found });
            }
        }

        Ok(register_fn)
    }

    /// Run the entry point against `registry`. Only the first call runs it.
    ///
    /// A module exporting the logger hook is first pointed at the host's
    /// logger, so its log records reach the host's output.
    pub fn register_library(&mut self, registry: &mut Registry) -> Result<(), LibraryError> {
        match self.state {
            LibraryState::Registered => return Err(LibraryError::AlreadyRegistered),
            LibraryState::Resolved => {}
            _ => return Err(LibraryError::NotLoaded),
        }
        let register_fn = self.register_fn.ok_or(LibraryError::NotLoaded)?;

        // The loader is still open, so the entry point's code is mapped.
        if let Some(init_logger) = self.logger_hook {
            unsafe { init_logger(log::logger(), log::max_level()) };
        }
        unsafe { register_fn(registry as *mut Registry) };
        self.state = LibraryState::Registered;
        Ok(())
    }

    /// Close the module. Safe to call any number of times.
    pub fn free(&mut self) {
        self.register_fn = None;
        self.logger_hook = None;
        if self.loader.is_loaded() {
            log::debug!("Releasing module {}", self.path.display());
        }
        self.loader.free();
        if self.state != LibraryState::Unloaded {
            self.state = LibraryState::Released;
        }
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Library {
    fn drop(&mut self) {
        self.free();
    }
}
