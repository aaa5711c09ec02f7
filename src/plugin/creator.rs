//! Deferred plugin instantiation
//!
//! Modules usually register factories rather than live capability objects.
//! A [`PluginCreator`] carries the identity the registry validates and a
//! closure that builds a fresh capability instance on demand. The registry
//! stores and returns creators but never calls [`PluginCreator::create`].
//!
//! A creator registered from a loaded module holds that module's
//! [`LibraryHandle`], and every [`Created`] instance carries a clone. The
//! module therefore stays mapped until the last instance is dropped, even
//! after the registry has been cleared.

use crate::plugin::library::LibraryHandle;
use crate::plugin::traits::Plugin;
use crate::plugin::types::PluginIdentity;
use std::any::Any;
use std::ops::{Deref, DerefMut};

type Factory<T> = Box<dyn Fn() -> Box<T>>;

/// Factory for instances of the capability `T`
///
/// `T` is normally a trait object such as `dyn ExampleType`, so a host
/// narrows with `get_plugin::<PluginCreator<dyn ExampleType>>(..)`.
pub struct PluginCreator<T: ?Sized + 'static> {
    identity: PluginIdentity,
    factory: Factory<T>,
    library: Option<LibraryHandle>,
}

/// Instance built by a [`PluginCreator`]
///
/// Derefs to the capability. Holds the module that built it open.
pub struct Created<T: ?Sized> {
    // Dropped before `library`: the drop glue may live in the module.
    instance: Box<T>,
    library: Option<LibraryHandle>,
}

impl<T: ?Sized> Created<T> {
    /// Module keeping this instance's code mapped, `None` for host code
    pub fn library(&self) -> Option<&LibraryHandle> {
        self.library.as_ref()
    }
}

impl<T: ?Sized> Deref for Created<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.instance
    }
}

impl<T: ?Sized> DerefMut for Created<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.instance
    }
}

impl<T: ?Sized + 'static> PluginCreator<T> {
    pub fn new<F>(server_name: impl Into<String>, name: impl Into<String>, version: i32, factory: F) -> Self
    where
        F: Fn() -> Box<T> + 'static,
    {
        Self {
            identity: PluginIdentity::new(server_name, name, version),
            factory: Box::new(factory),
            library: None,
        }
    }

    /// Build a new capability instance
    pub fn create(&self) -> Created<T> {
        Created {
            instance: (self.factory)(),
            library: self.library.clone(),
        }
    }
}

impl<T: ?Sized + 'static> Plugin for PluginCreator<T> {
    fn identity(&self) -> &PluginIdentity {
        &self.identity
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn attach_library(&mut self, library: &LibraryHandle) {
        self.library = Some(library.clone());
    }
}

impl<T: ?Sized + 'static> std::fmt::Debug for PluginCreator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginCreator")
            .field("identity", &self.identity)
            .field("creates", &std::any::type_name::<T>())
            .field("library", &self.library.is_some())
            .finish()
    }
}
