//! Plugin Server
//!
//! A server is one named capability family. It owns its plugins in insertion
//! order and carries the minimum version the registry enforces before
//! inserting. The server trusts its owner and does not re-validate.

use crate::plugin::traits::Plugin;
use crate::plugin::types::{LibraryId, PluginOrigin};
use std::collections::HashMap;

struct Entry {
    plugin: Box<dyn Plugin>,
    origin: PluginOrigin,
}

/// Named group of plugins sharing a minimum-version policy
pub struct Server {
    name: String,
    minimum_version: i32,
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("name", &self.name)
            .field("minimum_version", &self.minimum_version)
            .field("plugins", &self.names())
            .finish()
    }
}

impl Server {
    pub fn new(name: impl Into<String>, minimum_version: i32) -> Self {
        Self {
            name: name.into(),
            minimum_version,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn minimum_version(&self) -> i32 {
        self.minimum_version
    }

    /// Whether a plugin of `version` meets this server's minimum
    pub fn accepts(&self, version: i32) -> bool {
        version >= self.minimum_version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&dyn Plugin> {
        self.index
            .get(name)
            .map(|&slot| self.entries[slot].plugin.as_ref())
    }

    /// Origin recorded when `name` was inserted
    pub fn origin_of(&self, name: &str) -> Option<&PluginOrigin> {
        self.index.get(name).map(|&slot| &self.entries[slot].origin)
    }

    /// Plugins in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Plugin> + '_ {
        self.entries.iter().map(|entry| entry.plugin.as_ref())
    }

    /// Plugins with their origins, in insertion order
    pub fn iter_with_origin(&self) -> impl Iterator<Item = (&dyn Plugin, &PluginOrigin)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.plugin.as_ref(), &entry.origin))
    }

    pub fn names(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.plugin.name().to_string())
            .collect()
    }

    /// Store `plugin`, replacing any plugin with the same name.
    ///
    /// A replaced plugin keeps its slot and is dropped here. Returns `true`
    /// when a replacement happened.
    pub(crate) fn insert(&mut self, plugin: Box<dyn Plugin>, origin: PluginOrigin) -> bool {
        let name = plugin.name().to_string();
        match self.index.get(&name) {
            Some(&slot) => {
                self.entries[slot] = Entry { plugin, origin };
                true
            }
            None => {
                self.index.insert(name, self.entries.len());
                self.entries.push(Entry { plugin, origin });
                false
            }
        }
    }

    /// Drop every plugin submitted by `library`, returning how many went.
    pub(crate) fn remove_from_library(&mut self, library: LibraryId) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|entry| entry.origin != PluginOrigin::Library(library));
        let removed = before - self.entries.len();
        if removed > 0 {
            self.reindex();
        }
        removed
    }

    /// Drop every plugin and empty the server.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    fn reindex(&mut self) {
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(slot, entry)| (entry.plugin.name().to_string(), slot))
            .collect();
    }
}
