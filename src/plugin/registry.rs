//! Plugin Registry
//!
//! The registry owns every declared server and every loaded library. Servers
//! must be declared before plugins can be added to them; the registry never
//! creates a server implicitly.
//!
//! A registry is driven by a single owner. It provides no locking, and module
//! entry points call back into it synchronously while `load_library` runs.
//!
//! Plugins created by a library have their drop glue inside that library, so
//! plugins are always dropped before library handles are closed. Plugins
//! added while a module's entry point runs receive that module's
//! [`LibraryHandle`] through [`Plugin::attach_library`].

use crate::plugin::discovery::discover_libraries;
use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::library::{Library, LibraryHandle};
use crate::plugin::server::Server;
use crate::plugin::traits::Plugin;
use crate::plugin::types::{LibraryId, PluginOrigin};
use std::collections::HashMap;
use std::path::Path;

struct LoadedLibrary {
    id: LibraryId,
    library: Library,
}

/// Owner of servers, their plugins and the libraries that supplied them
pub struct Registry {
    servers: HashMap<String, Server>,
    libraries: Vec<LoadedLibrary>,
    builtins: Vec<String>,
    next_library_id: u64,
    /// Origin stamped on plugins added while an entry point runs
    current_origin: PluginOrigin,
    /// Module whose entry point is running
    current_library: Option<LibraryHandle>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("servers", &self.server_names())
            .field(
                "libraries",
                &self
                    .libraries
                    .iter()
                    .map(|loaded| loaded.library.path())
                    .collect::<Vec<_>>(),
            )
            .field("builtins", &self.builtins)
            .finish()
    }
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            servers: HashMap::new(),
            libraries: Vec::new(),
            builtins: Vec::new(),
            next_library_id: 0,
            current_origin: PluginOrigin::Host,
            current_library: None,
        }
    }

    /// Declare a server accepting plugins of at least `minimum_version`.
    ///
    /// An existing server with the same name is replaced and all of its
    /// plugins are dropped. Returns `true` when that happened.
    pub fn add_server(&mut self, name: impl Into<String>, minimum_version: i32) -> bool {
        let name = name.into();
        let replaced = self
            .servers
            .insert(name.clone(), Server::new(name.clone(), minimum_version));

        match replaced {
            Some(previous) => {
                log::warn!(
                    "Server '{}' replaced (minimum version {} -> {}), dropping {} plugin(s)",
                    name,
                    previous.minimum_version(),
                    minimum_version,
                    previous.len()
                );
                true
            }
            None => {
                log::debug!("Server '{}' declared (minimum version {})", name, minimum_version);
                false
            }
        }
    }

    /// Validate and store a plugin.
    ///
    /// Rejected when `plugin` is `None`, when its server does not exist, or
    /// when its version is below the server minimum. A plugin with the same
    /// name already in the server is replaced and dropped.
    pub fn add_plugin(&mut self, plugin: Option<Box<dyn Plugin>>) -> PluginResult<()> {
        let mut plugin = plugin.ok_or_else(|| {
            log::warn!("Rejected registration without a plugin");
            PluginError::MissingPlugin
        })?;

        let server = match self.servers.get_mut(plugin.server_name()) {
            Some(server) => server,
            None => {
                log::warn!(
                    "Rejected plugin '{}': server '{}' does not exist",
                    plugin.name(),
                    plugin.server_name()
                );
                return Err(PluginError::ServerNotFound {
                    server_name: plugin.server_name().to_string(),
                    plugin_name: plugin.name().to_string(),
                });
            }
        };

        if !server.accepts(plugin.version()) {
            log::warn!(
                "Rejected plugin '{}' v{}: server '{}' requires at least v{}",
                plugin.name(),
                plugin.version(),
                server.name(),
                server.minimum_version()
            );
            return Err(PluginError::VersionRejected {
                server_name: server.name().to_string(),
                plugin_name: plugin.name().to_string(),
                version: plugin.version(),
                minimum: server.minimum_version(),
            });
        }

        if let Some(library) = &self.current_library {
            plugin.attach_library(library);
        }

        let label = plugin.identity().to_string();
        if server.insert(plugin, self.current_origin.clone()) {
            log::debug!("Replaced plugin {} from {}", label, self.current_origin);
        } else {
            log::debug!("Added plugin {} from {}", label, self.current_origin);
        }
        Ok(())
    }

    /// Box and add a plugin value.
    pub fn submit<P: Plugin>(&mut self, plugin: P) -> PluginResult<()> {
        self.add_plugin(Some(Box::new(plugin)))
    }

    /// Look up a plugin and narrow it to `T`.
    ///
    /// `None` when the server or plugin is missing, or when the stored
    /// plugin is not a `T`.
    pub fn get_plugin<T: Plugin>(&self, server_name: &str, name: &str) -> Option<&T> {
        let plugin = self.get_plugin_dyn(server_name, name)?;
        let narrowed = plugin.downcast_ref::<T>();
        if narrowed.is_none() {
            log::warn!(
                "Plugin '{}/{}' is a {}, not a {}",
                server_name,
                name,
                plugin.type_name(),
                std::any::type_name::<T>()
            );
        }
        narrowed
    }

    /// Look up a plugin without narrowing
    pub fn get_plugin_dyn(&self, server_name: &str, name: &str) -> Option<&dyn Plugin> {
        self.servers.get(server_name)?.get(name)
    }

    /// All plugins of `server_name` that are a `T`, in insertion order.
    ///
    /// Empty when the server does not exist.
    pub fn get_all_plugins<T: Plugin>(&self, server_name: &str) -> Vec<&T> {
        let Some(server) = self.servers.get(server_name) else {
            return Vec::new();
        };

        server
            .iter()
            .filter_map(|plugin| {
                let narrowed = plugin.downcast_ref::<T>();
                if narrowed.is_none() {
                    log::warn!(
                        "Skipping plugin '{}/{}': {} is not a {}",
                        server_name,
                        plugin.name(),
                        plugin.type_name(),
                        std::any::type_name::<T>()
                    );
                }
                narrowed
            })
            .collect()
    }

    /// Plugin names of a server in insertion order; empty if it is missing
    pub fn plugin_names(&self, server_name: &str) -> Vec<String> {
        self.servers
            .get(server_name)
            .map(Server::names)
            .unwrap_or_default()
    }

    pub fn server(&self, name: &str) -> Option<&Server> {
        self.servers.get(name)
    }

    pub fn has_server(&self, name: &str) -> bool {
        self.servers.contains_key(name)
    }

    /// Declared server names, sorted
    pub fn server_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.servers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Total number of plugins across all servers
    pub fn plugin_count(&self) -> usize {
        self.servers.values().map(Server::len).sum()
    }

    pub fn library_count(&self) -> usize {
        self.libraries.len()
    }

    /// Ids and paths of loaded libraries, in load order
    pub fn libraries(&self) -> impl Iterator<Item = (LibraryId, &Path)> + '_ {
        self.libraries
            .iter()
            .map(|loaded| (loaded.id, loaded.library.path()))
    }

    /// Names of builtin packages that have been registered
    pub fn builtins(&self) -> &[String] {
        &self.builtins
    }

    /// Load a module and run its entry point against this registry.
    ///
    /// On failure the module is closed again and the registry is left as it
    /// was. On success the module stays loaded until [`clear`](Self::clear),
    /// [`unload_library`](Self::unload_library) or drop, and after that for
    /// as long as an instance it created is alive.
    ///
    /// The id is reserved before the entry point runs, so ids stay unique
    /// even when an entry point loads another module.
    pub fn load_library(&mut self, path: impl AsRef<Path>) -> PluginResult<LibraryId> {
        let path = path.as_ref();
        let load_error = |cause| PluginError::LoadError {
            path: path.to_path_buf(),
            cause,
        };

        let mut library = Library::new();
        library.load(path).map_err(load_error)?;

        let id = LibraryId(self.next_library_id);
        self.next_library_id += 1;
        let plugins_before = self.plugin_count();

        let previous_origin = std::mem::replace(&mut self.current_origin, PluginOrigin::Library(id));
        let previous_library = std::mem::replace(&mut self.current_library, library.handle());
        let registered = library.register_library(self);
        self.current_origin = previous_origin;
        self.current_library = previous_library;
        registered.map_err(load_error)?;

        log::info!(
            "Loaded {} as {} ({} plugin(s) registered)",
            path.display(),
            id,
            self.plugin_count().saturating_sub(plugins_before)
        );
        self.libraries.push(LoadedLibrary { id, library });
        Ok(id)
    }

    /// [`load_library`](Self::load_library) reporting only success or failure
    pub fn try_load_library(&mut self, path: impl AsRef<Path>) -> bool {
        match self.load_library(path) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("{}", e);
                false
            }
        }
    }

    /// Load every native module found directly inside `dir`.
    ///
    /// Modules that fail to load are logged and skipped.
    pub fn load_libraries_from_dir(&mut self, dir: impl AsRef<Path>) -> Vec<LibraryId> {
        discover_libraries(dir.as_ref())
            .into_iter()
            .filter_map(|path| match self.load_library(&path) {
                Ok(id) => Some(id),
                Err(e) => {
                    log::warn!("Skipping {}: {}", path.display(), e);
                    None
                }
            })
            .collect()
    }

    /// Run a statically linked registration function.
    ///
    /// `register` receives the same registry access a module entry point
    /// gets. Each builtin name runs once; returns `false` if `name` already
    /// ran.
    pub fn register_builtin(&mut self, name: &str, register: fn(&mut Registry)) -> bool {
        if self.builtins.iter().any(|existing| existing == name) {
            log::debug!("Builtin package '{}' already registered", name);
            return false;
        }

        let previous_origin = std::mem::replace(
            &mut self.current_origin,
            PluginOrigin::Builtin(name.to_string()),
        );
        register(self);
        self.current_origin = previous_origin;

        self.builtins.push(name.to_string());
        log::debug!("Registered builtin package '{}'", name);
        true
    }

    /// Drop the plugins a library registered, then close the library.
    pub fn unload_library(&mut self, id: LibraryId) -> PluginResult<()> {
        let position = self
            .libraries
            .iter()
            .position(|loaded| loaded.id == id)
            .ok_or(PluginError::LibraryNotFound { id })?;

        let removed: usize = self
            .servers
            .values_mut()
            .map(|server| server.remove_from_library(id))
            .sum();

        let loaded = self.libraries.remove(position);
        log::info!(
            "Unloaded {} ({}), dropped {} plugin(s)",
            loaded.library.path().display(),
            id,
            removed
        );
        drop(loaded);
        Ok(())
    }

    /// Drop every plugin but keep the servers
    pub fn clear_plugins(&mut self) {
        for server in self.servers.values_mut() {
            server.clear();
        }
    }

    /// Drop all servers and plugins, then close all libraries
    pub fn clear(&mut self) {
        self.servers.clear();
        self.builtins.clear();
        // Closed last: library code backs the plugins dropped above.
        self.libraries.clear();
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Registry {
    fn drop(&mut self) {
        self.clear();
    }
}
