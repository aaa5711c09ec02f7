//! Type definitions for the plugin system
//!
//! Identity records for plugins and the bookkeeping types the registry uses
//! to remember where each plugin came from.

use std::fmt;

/// Immutable identity of a registered plugin
///
/// Within a server a plugin is identified by `name` alone; `version` is only
/// compared against the server's minimum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginIdentity {
    server_name: String,
    name: String,
    version: i32,
}

impl PluginIdentity {
    pub fn new(server_name: impl Into<String>, name: impl Into<String>, version: i32) -> Self {
        Self {
            server_name: server_name.into(),
            name: name.into(),
            version,
        }
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> i32 {
        self.version
    }
}

impl fmt::Display for PluginIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} v{}", self.server_name, self.name, self.version)
    }
}

/// Handle for a library owned by a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LibraryId(pub(crate) u64);

impl fmt::Display for LibraryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "library#{}", self.0)
    }
}

/// Where a stored plugin was submitted from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginOrigin {
    /// Added directly by the host
    Host,
    /// Added by a statically linked package
    Builtin(String),
    /// Added by the entry point of a loaded library
    Library(LibraryId),
}

impl fmt::Display for PluginOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginOrigin::Host => write!(f, "host"),
            PluginOrigin::Builtin(name) => write!(f, "builtin:{}", name),
            PluginOrigin::Library(id) => write!(f, "{}", id),
        }
    }
}

/// Lifecycle of a [`Library`](crate::plugin::library::Library)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryState {
    Unloaded,
    Loaded,
    Resolved,
    Registered,
    Released,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_accessors() {
        let identity = PluginIdentity::new("Example", "BobPlugin", 1);
        assert_eq!(identity.server_name(), "Example");
        assert_eq!(identity.name(), "BobPlugin");
        assert_eq!(identity.version(), 1);
        assert_eq!(identity.to_string(), "Example/BobPlugin v1");
    }

    #[test]
    fn test_origin_display() {
        assert_eq!(PluginOrigin::Host.to_string(), "host");
        assert_eq!(
            PluginOrigin::Builtin("core".to_string()).to_string(),
            "builtin:core"
        );
        assert_eq!(PluginOrigin::Library(LibraryId(3)).to_string(), "library#3");
    }
}
