//! Delivery of pending events to notifications.

#[cfg(test)]
#[path = "fanout_tests.rs"]
mod tests;

use std::sync::Arc;

use tracing::{debug, info, warn};

use vigil_core::NotificationTypeRegistry;
use vigil_protocols::{MonitorError, MonitorEvent, MonitorStore, Notification};

/// Matches unnotified events to notifications by severity and delivers them.
pub struct NotificationFanout {
    registry: Arc<NotificationTypeRegistry>,
    store: Arc<dyn MonitorStore>,
}

impl NotificationFanout {
    pub fn new(registry: Arc<NotificationTypeRegistry>, store: Arc<dyn MonitorStore>) -> Self {
        Self { registry, store }
    }

    /// Deliver pending events. Returns the number of deliveries made.
    ///
    /// Events are fetched once at the lowest severity any notification
    /// accepts, then filtered per notification. An event is marked notified
    /// after each successful delivery that included it, so it may reach
    /// several notifications within the same pass.
    pub async fn run(&self, notifications: &[Notification]) -> Result<usize, MonitorError> {
        let active: Vec<&Notification> = notifications.iter().filter(|n| n.enabled).collect();
        let Some(min_severity) = active.iter().map(|n| n.severity_level).min() else {
            return Ok(0);
        };

        let pending = self
            .store
            .get_monitor_events_for_notification(min_severity)
            .await?;
        if pending.is_empty() {
            debug!("No pending events at severity >= {}", min_severity);
            return Ok(0);
        }

        let mut deliveries = 0;
        for notification in active {
            let events: Vec<MonitorEvent> = pending
                .iter()
                .filter(|e| e.severity_level >= notification.severity_level)
                .cloned()
                .collect();
            if events.is_empty() {
                continue;
            }

            let Some(notification_type) = self.registry.get(&notification.notification_type)
            else {
                warn!(
                    "Could not find notification type '{}' for notification '{}'",
                    notification.notification_type, notification.notification_id
                );
                continue;
            };

            notification_type.notify(notification, &events).await?;
            for event in &events {
                self.store.mark_monitor_event_notified(&event.key()).await?;
            }
            info!(
                "Delivered {} event(s) to notification '{}' ({})",
                events.len(),
                notification.notification_id,
                notification.notification_type
            );
            deliveries += 1;
        }

        Ok(deliveries)
    }
}
