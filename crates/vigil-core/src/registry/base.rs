//! Base registry trait and implementation.
//!
//! Shared by the monitor type and notification type registries.

#[cfg(test)]
#[path = "base_tests.rs"]
mod tests;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

use vigil_protocols::error::ExtensionError;

/// Trait for items that can be stored in a registry.
pub trait Registerable: Send + Sync {
    /// Returns the unique name for this item.
    fn registry_id(&self) -> &str;
}

/// Generic name-keyed registry.
///
/// Thread-safe; registration rejects duplicate names.
pub struct BaseRegistry<T: ?Sized + Registerable> {
    items: DashMap<String, Arc<T>>,
}

impl<T: ?Sized + Registerable> BaseRegistry<T> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
        }
    }

    /// Register an item.
    ///
    /// Returns an error if an item with the same name is already registered.
    pub fn register(&self, item: Arc<T>) -> Result<(), ExtensionError> {
        let id = item.registry_id().to_string();

        match self.items.entry(id) {
            Entry::Occupied(entry) => Err(ExtensionError::AlreadyRegistered(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(item);
                Ok(())
            }
        }
    }

    /// Unregister an item by name.
    pub fn unregister(&self, id: &str) -> Result<(), ExtensionError> {
        self.items
            .remove(id)
            .ok_or_else(|| ExtensionError::NotFound(id.to_string()))?;
        Ok(())
    }

    /// Get an item by name.
    pub fn get(&self, id: &str) -> Option<Arc<T>> {
        self.items.get(id).map(|item| item.clone())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// List all registered names, sorted.
    pub fn list_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.items.iter().map(|item| item.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: ?Sized + Registerable> Default for BaseRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
