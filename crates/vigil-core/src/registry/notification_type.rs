//! Registry of notification implementations.

use std::sync::Arc;

use tracing::debug;
use vigil_protocols::error::ExtensionError;
use vigil_protocols::notification_type::NotificationType;

use super::base::{BaseRegistry, Registerable};

impl Registerable for dyn NotificationType {
    fn registry_id(&self) -> &str {
        self.name()
    }
}

/// Registry of [`NotificationType`] plugins keyed by type name.
pub struct NotificationTypeRegistry {
    inner: BaseRegistry<dyn NotificationType>,
}

impl NotificationTypeRegistry {
    pub fn new() -> Self {
        Self {
            inner: BaseRegistry::new(),
        }
    }

    pub fn register(
        &self,
        notification_type: Arc<dyn NotificationType>,
    ) -> Result<(), ExtensionError> {
        debug!("Registering notification type '{}'", notification_type.name());
        self.inner.register(notification_type)
    }

    pub fn unregister(&self, name: &str) -> Result<(), ExtensionError> {
        self.inner.unregister(name)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn NotificationType>> {
        self.inner.get(name)
    }

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

impl Default for NotificationTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
