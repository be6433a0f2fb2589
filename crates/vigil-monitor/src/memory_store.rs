//! In-process definition and event repository.

#[cfg(test)]
#[path = "memory_store_tests.rs"]
mod tests;

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use vigil_protocols::{
    EventFilter, EventKey, Monitor, MonitorError, MonitorEvent, MonitorStore, Notification,
};

/// `HashMap`-backed [`MonitorStore`] for tests and single-node deployments.
///
/// Saving an event whose key already exists updates it in place, but never
/// clears a notified flag that is already set.
pub struct MemoryMonitorStore {
    monitors: RwLock<HashMap<String, Monitor>>,
    notifications: RwLock<HashMap<String, Notification>>,
    events: RwLock<HashMap<EventKey, MonitorEvent>>,
}

impl MemoryMonitorStore {
    pub fn new() -> Self {
        Self {
            monitors: RwLock::new(HashMap::new()),
            notifications: RwLock::new(HashMap::new()),
            events: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store pre-populated with definitions.
    pub fn with_definitions(monitors: Vec<Monitor>, notifications: Vec<Notification>) -> Self {
        Self {
            monitors: RwLock::new(
                monitors
                    .into_iter()
                    .map(|m| (m.monitor_id.clone(), m))
                    .collect(),
            ),
            notifications: RwLock::new(
                notifications
                    .into_iter()
                    .map(|n| (n.notification_id.clone(), n))
                    .collect(),
            ),
            events: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryMonitorStore {
    fn default() -> Self {
        Self::new()
    }
}

fn newest_first(events: &mut [MonitorEvent]) {
    events.sort_by(|a, b| {
        b.event_time
            .cmp(&a.event_time)
            .then_with(|| a.monitor_id.cmp(&b.monitor_id))
            .then_with(|| a.node_id.cmp(&b.node_id))
    });
}

#[async_trait]
impl MonitorStore for MemoryMonitorStore {
    async fn get_monitors(&self) -> Result<Vec<Monitor>, MonitorError> {
        let store = self.monitors.read().await;
        let mut monitors: Vec<_> = store.values().cloned().collect();
        monitors.sort_by(|a, b| a.monitor_id.cmp(&b.monitor_id));
        Ok(monitors)
    }

    async fn get_active_monitors_for_node(
        &self,
        node_group_id: &str,
        external_id: &str,
    ) -> Result<Vec<Monitor>, MonitorError> {
        let store = self.monitors.read().await;
        let mut monitors: Vec<_> = store
            .values()
            .filter(|m| m.enabled && m.applies_to(node_group_id, external_id))
            .cloned()
            .collect();
        monitors.sort_by(|a, b| a.monitor_id.cmp(&b.monitor_id));
        Ok(monitors)
    }

    async fn save_monitor(&self, monitor: &Monitor) -> Result<(), MonitorError> {
        let mut store = self.monitors.write().await;
        store.insert(monitor.monitor_id.clone(), monitor.clone());
        Ok(())
    }

    async fn delete_monitor(&self, monitor_id: &str) -> Result<(), MonitorError> {
        let mut store = self.monitors.write().await;
        store.remove(monitor_id);
        Ok(())
    }

    async fn get_notifications(&self) -> Result<Vec<Notification>, MonitorError> {
        let store = self.notifications.read().await;
        let mut notifications: Vec<_> = store.values().cloned().collect();
        notifications.sort_by(|a, b| a.notification_id.cmp(&b.notification_id));
        Ok(notifications)
    }

    async fn get_active_notifications_for_node(
        &self,
        node_group_id: &str,
        external_id: &str,
    ) -> Result<Vec<Notification>, MonitorError> {
        let store = self.notifications.read().await;
        let mut notifications: Vec<_> = store
            .values()
            .filter(|n| n.enabled && n.applies_to(node_group_id, external_id))
            .cloned()
            .collect();
        notifications.sort_by(|a, b| a.notification_id.cmp(&b.notification_id));
        Ok(notifications)
    }

    async fn save_notification(&self, notification: &Notification) -> Result<(), MonitorError> {
        let mut store = self.notifications.write().await;
        store.insert(notification.notification_id.clone(), notification.clone());
        Ok(())
    }

    async fn delete_notification(&self, notification_id: &str) -> Result<(), MonitorError> {
        let mut store = self.notifications.write().await;
        store.remove(notification_id);
        Ok(())
    }

    async fn get_monitor_events(&self) -> Result<Vec<MonitorEvent>, MonitorError> {
        let store = self.events.read().await;
        let mut events: Vec<_> = store.values().cloned().collect();
        newest_first(&mut events);
        Ok(events)
    }

    async fn get_monitor_events_filtered(
        &self,
        filter: &EventFilter,
    ) -> Result<Vec<MonitorEvent>, MonitorError> {
        let store = self.events.read().await;
        let mut events: Vec<_> = store
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        newest_first(&mut events);
        if let Some(limit) = filter.limit {
            events.truncate(limit);
        }
        Ok(events)
    }

    async fn get_monitor_events_for_notification(
        &self,
        severity_level: i32,
    ) -> Result<Vec<MonitorEvent>, MonitorError> {
        let store = self.events.read().await;
        let mut events: Vec<_> = store
            .values()
            .filter(|e| !e.notified && e.severity_level >= severity_level)
            .cloned()
            .collect();
        events.sort_by(|a, b| a.key().cmp(&b.key()));
        Ok(events)
    }

    async fn save_monitor_event(&self, event: &MonitorEvent) -> Result<(), MonitorError> {
        let mut store = self.events.write().await;
        let key = event.key();
        let notified = event.notified || store.get(&key).is_some_and(|e| e.notified);
        store.insert(
            key,
            MonitorEvent {
                notified,
                ..event.clone()
            },
        );
        Ok(())
    }

    async fn delete_monitor_event(&self, key: &EventKey) -> Result<(), MonitorError> {
        let mut store = self.events.write().await;
        store.remove(key);
        Ok(())
    }

    async fn mark_monitor_event_notified(&self, key: &EventKey) -> Result<(), MonitorError> {
        let mut store = self.events.write().await;
        if let Some(event) = store.get_mut(key) {
            event.notified = true;
        }
        Ok(())
    }
}
