//! Plugin Trait
//!
//! Every object stored in a server implements [`Plugin`]. The registry only
//! ever sees the identity; the capability behind it is recovered by the host
//! through checked narrowing on [`Plugin::as_any`].

use crate::plugin::library::LibraryHandle;
use crate::plugin::types::PluginIdentity;
use std::any::Any;

/// Base trait for every registered plugin or creator
///
/// Implementors only provide [`identity`](Plugin::identity). The `Any`
/// supertrait gives the registry a type tag to verify narrowing against.
pub trait Plugin: Any {
    /// Identity record fixed at construction
    fn identity(&self) -> &PluginIdentity;

    fn name(&self) -> &str {
        self.identity().name()
    }

    fn server_name(&self) -> &str {
        self.identity().server_name()
    }

    fn version(&self) -> i32 {
        self.identity().version()
    }

    /// Name of the concrete type, used in narrowing diagnostics
    fn type_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Called by the registry when the plugin is added from a loaded module.
    ///
    /// Plugins that hand out objects built by module code keep `library` so
    /// those objects can keep the module mapped.
    fn attach_library(&mut self, _library: &LibraryHandle) {}

    fn as_any(&self) -> &dyn Any;
}

impl dyn Plugin {
    /// Narrow to a concrete plugin type, `None` on mismatch.
    pub fn downcast_ref<T: Plugin>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: Plugin>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

impl std::fmt::Debug for dyn Plugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plugin")
            .field("identity", self.identity())
            .field("type", &self.type_name())
            .finish()
    }
}

/// Implement [`Plugin`] for a struct with an `identity: PluginIdentity` field.
#[macro_export]
macro_rules! impl_plugin {
    ($ty:ty) => {
        impl $crate::plugin::api::Plugin for $ty {
            fn identity(&self) -> &$crate::plugin::api::PluginIdentity {
                &self.identity
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    };
}
