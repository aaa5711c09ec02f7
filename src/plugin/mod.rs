//! Plugin System Module
//!
//! Registry of named servers holding versioned plugins, plus the loader for
//! native modules that register plugins through a C entry point.

// Internal modules - external access goes through the api module
pub(crate) mod abi;
pub(crate) mod creator;
pub(crate) mod discovery;
pub(crate) mod error;
pub(crate) mod library;
pub(crate) mod registry;
pub(crate) mod server;
pub(crate) mod traits;
pub(crate) mod types;

// Public API module - the only public interface for the plugin system
pub mod api;

#[cfg(test)]
mod tests;
