//! Public API for the plugin system
//!
//! Hosts and plugin modules import from here rather than from the internal
//! modules.

// Registry and servers
pub use crate::plugin::registry::Registry;
pub use crate::plugin::server::Server;

// Plugin identity and narrowing
pub use crate::plugin::traits::Plugin;
pub use crate::plugin::types::{LibraryId, LibraryState, PluginIdentity, PluginOrigin};

// Factory glue
pub use crate::plugin::creator::{Created, PluginCreator};

// Module loading
pub use crate::plugin::abi::{
    ApiVersionFn, InitLoggerFn, RegisterFn, API_VERSION_SYMBOL, LOGGER_SYMBOL, REGISTER_SYMBOL,
};
pub use crate::plugin::discovery::{discover_libraries, is_native_library, library_file_name};
pub use crate::plugin::library::{Library, LibraryHandle, LibraryLoader};

// Used by `export_plugins!`
#[doc(hidden)]
pub use crate::plugin::abi::install_module_logger;
#[doc(hidden)]
pub use log::{LevelFilter, Log};

// Error handling
pub use crate::plugin::error::{LibraryError, PluginError, PluginResult};
