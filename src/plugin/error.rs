//! Plugin Error Handling
//!
//! Error types for plugin registration and module loading. Lookup misses are
//! not errors; they surface as `None` or an empty `Vec`.

use crate::core::error_handling::ContextualError;
use crate::plugin::types::LibraryId;
use std::path::PathBuf;

/// Result type alias for plugin operations
pub type PluginResult<T> = std::result::Result<T, PluginError>;

/// Errors reported by the registry
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// A registration was submitted without a plugin object
    #[error("No plugin supplied for registration")]
    MissingPlugin,

    /// The plugin names a server that has not been declared
    #[error("Server '{server_name}' does not exist (plugin '{plugin_name}')")]
    ServerNotFound {
        server_name: String,
        plugin_name: String,
    },

    /// The plugin is older than the server accepts
    #[error("Plugin '{plugin_name}' version {version} is below the minimum {minimum} for server '{server_name}'")]
    VersionRejected {
        server_name: String,
        plugin_name: String,
        version: i32,
        minimum: i32,
    },

    /// A module could not be opened, resolved or registered
    #[error("Failed to load library '{}': {cause}", .path.display())]
    LoadError {
        path: PathBuf,
        #[source]
        cause: LibraryError,
    },

    /// No loaded library carries this id
    #[error("Library not found: {id}")]
    LibraryNotFound { id: LibraryId },

    /// Host configuration could not be read or applied
    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl PluginError {
    /// True for the three registration rejections
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            PluginError::MissingPlugin
                | PluginError::ServerNotFound { .. }
                | PluginError::VersionRejected { .. }
        )
    }
}

impl ContextualError for PluginError {
    fn is_user_actionable(&self) -> bool {
        self.is_rejection() || matches!(self, PluginError::ConfigError { .. })
    }

    fn user_message(&self) -> Option<String> {
        if self.is_user_actionable() {
            Some(self.to_string())
        } else {
            None
        }
    }
}

/// Failure inside a single library's load sequence
///
/// All of these collapse into [`PluginError::LoadError`] for the caller of
/// `Registry::load_library`.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// The platform loader refused the file
    #[error("cannot open module: {0}")]
    Open(#[source] libloading::Error),

    /// The module has no registration entry point
    #[error("entry point '{symbol}' not found: {source}")]
    EntryPointMissing {
        symbol: &'static str,
        #[source]
        source: libloading::Error,
    },

    /// The module was built against a different plugin API
    #[error("module API version {found} does not match host API version {expected}")]
    ApiVersionMismatch { expected: u32, found: u32 },

    /// The entry point has already run for this library
    #[error("entry point already invoked")]
    AlreadyRegistered,

    /// No resolved entry point is available
    #[error("library is not loaded")]
    NotLoaded,
}
