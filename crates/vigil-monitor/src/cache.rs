//! TTL-bounded cache of active monitor and notification definitions.

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::time::Instant;
use tracing::debug;

use vigil_protocols::{Monitor, MonitorError, MonitorStore, Notification};

struct Snapshot<T> {
    items: Arc<Vec<T>>,
    fetched_at: Instant,
}

/// Read-through cache over a [`MonitorStore`].
///
/// Snapshots are shared: reads within the TTL return the same `Arc`.
/// A failed refresh leaves the previous snapshot in place.
pub struct DefinitionCache {
    store: Arc<dyn MonitorStore>,
    monitor_ttl: Duration,
    notification_ttl: Duration,
    monitors: RwLock<Option<Snapshot<Monitor>>>,
    notifications: RwLock<Option<Snapshot<Notification>>>,
}

impl DefinitionCache {
    pub fn new(
        store: Arc<dyn MonitorStore>,
        monitor_ttl: Duration,
        notification_ttl: Duration,
    ) -> Self {
        Self {
            store,
            monitor_ttl,
            notification_ttl,
            monitors: RwLock::new(None),
            notifications: RwLock::new(None),
        }
    }

    /// Enabled monitors for a node scope.
    pub async fn get_active_monitors(
        &self,
        node_group_id: &str,
        external_id: &str,
    ) -> Result<Arc<Vec<Monitor>>, MonitorError> {
        if let Some(items) = fresh(&self.monitors, self.monitor_ttl) {
            return Ok(items);
        }

        let items = Arc::new(
            self.store
                .get_active_monitors_for_node(node_group_id, external_id)
                .await?,
        );
        debug!(
            "Loaded {} active monitors for {}/{}",
            items.len(),
            node_group_id,
            external_id
        );
        replace(&self.monitors, items.clone());
        Ok(items)
    }

    /// Enabled notifications for a node scope.
    pub async fn get_active_notifications(
        &self,
        node_group_id: &str,
        external_id: &str,
    ) -> Result<Arc<Vec<Notification>>, MonitorError> {
        if let Some(items) = fresh(&self.notifications, self.notification_ttl) {
            return Ok(items);
        }

        let items = Arc::new(
            self.store
                .get_active_notifications_for_node(node_group_id, external_id)
                .await?,
        );
        debug!(
            "Loaded {} active notifications for {}/{}",
            items.len(),
            node_group_id,
            external_id
        );
        replace(&self.notifications, items.clone());
        Ok(items)
    }

    /// Force the next monitor read to hit the store.
    pub fn flush_monitors(&self) {
        *self.monitors.write() = None;
    }

    /// Force the next notification read to hit the store.
    pub fn flush_notifications(&self) {
        *self.notifications.write() = None;
    }
}

fn fresh<T>(slot: &RwLock<Option<Snapshot<T>>>, ttl: Duration) -> Option<Arc<Vec<T>>> {
    slot.read()
        .as_ref()
        .filter(|snapshot| snapshot.fetched_at.elapsed() < ttl)
        .map(|snapshot| snapshot.items.clone())
}

fn replace<T>(slot: &RwLock<Option<Snapshot<T>>>, items: Arc<Vec<T>>) {
    *slot.write() = Some(Snapshot {
        items,
        fetched_at: Instant::now(),
    });
}
