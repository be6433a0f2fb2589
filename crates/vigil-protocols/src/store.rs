//! Definition and event repository protocol.

use async_trait::async_trait;

use crate::error::MonitorError;
use crate::model::{EventFilter, EventKey, Monitor, MonitorEvent, Notification};

/// Repository for monitors, notifications and recorded events.
///
/// Scoped queries match definitions whose node group and external id equal
/// the caller's or are [`SCOPE_ALL`](crate::model::SCOPE_ALL), and only
/// return enabled definitions.
#[async_trait]
pub trait MonitorStore: Send + Sync {
    /// All monitors, enabled or not.
    async fn get_monitors(&self) -> Result<Vec<Monitor>, MonitorError>;

    /// Enabled monitors applying to a node scope.
    async fn get_active_monitors_for_node(
        &self,
        node_group_id: &str,
        external_id: &str,
    ) -> Result<Vec<Monitor>, MonitorError>;

    /// Insert or update a monitor.
    async fn save_monitor(&self, monitor: &Monitor) -> Result<(), MonitorError>;

    async fn delete_monitor(&self, monitor_id: &str) -> Result<(), MonitorError>;

    /// All notifications, enabled or not.
    async fn get_notifications(&self) -> Result<Vec<Notification>, MonitorError>;

    /// Enabled notifications applying to a node scope.
    async fn get_active_notifications_for_node(
        &self,
        node_group_id: &str,
        external_id: &str,
    ) -> Result<Vec<Notification>, MonitorError>;

    /// Insert or update a notification.
    async fn save_notification(&self, notification: &Notification) -> Result<(), MonitorError>;

    async fn delete_notification(&self, notification_id: &str) -> Result<(), MonitorError>;

    /// All recorded events.
    async fn get_monitor_events(&self) -> Result<Vec<MonitorEvent>, MonitorError>;

    /// Events matching `filter`, newest first, capped at `filter.limit`.
    async fn get_monitor_events_filtered(
        &self,
        filter: &EventFilter,
    ) -> Result<Vec<MonitorEvent>, MonitorError>;

    /// Unnotified events with severity at or above `severity_level`.
    async fn get_monitor_events_for_notification(
        &self,
        severity_level: i32,
    ) -> Result<Vec<MonitorEvent>, MonitorError>;

    /// Insert or update an event by its composite key.
    async fn save_monitor_event(&self, event: &MonitorEvent) -> Result<(), MonitorError>;

    async fn delete_monitor_event(&self, key: &EventKey) -> Result<(), MonitorError>;

    /// Flag an event as delivered. Marking twice is harmless.
    async fn mark_monitor_event_notified(&self, key: &EventKey) -> Result<(), MonitorError>;
}
