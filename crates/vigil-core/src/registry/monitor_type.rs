//! Registry of check implementations.

use std::sync::Arc;

use tracing::debug;
use vigil_protocols::error::ExtensionError;
use vigil_protocols::monitor_type::MonitorType;

use super::base::{BaseRegistry, Registerable};

impl Registerable for dyn MonitorType {
    fn registry_id(&self) -> &str {
        self.name()
    }
}

/// Registry of [`MonitorType`] plugins keyed by type name.
pub struct MonitorTypeRegistry {
    inner: BaseRegistry<dyn MonitorType>,
}

impl MonitorTypeRegistry {
    pub fn new() -> Self {
        Self {
            inner: BaseRegistry::new(),
        }
    }

    /// Register a check type.
    pub fn register(&self, monitor_type: Arc<dyn MonitorType>) -> Result<(), ExtensionError> {
        debug!(
            "Registering monitor type '{}' (cluster lock: {})",
            monitor_type.name(),
            monitor_type.requires_cluster_lock()
        );
        self.inner.register(monitor_type)
    }

    pub fn unregister(&self, name: &str) -> Result<(), ExtensionError> {
        self.inner.unregister(name)
    }

    /// Look up a check type by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn MonitorType>> {
        self.inner.get(name)
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.inner.list_ids()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for MonitorTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
