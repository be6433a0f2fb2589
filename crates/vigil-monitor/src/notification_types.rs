//! Built-in notification types (log, webhook).

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use vigil_protocols::severity::{SEVERE, WARNING};
use vigil_protocols::{MonitorError, MonitorEvent, Notification, NotificationType};

/// Writes one tracing line per event, at a level chosen from its severity.
#[derive(Debug, Default)]
pub struct LogNotificationType;

impl LogNotificationType {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationType for LogNotificationType {
    fn name(&self) -> &str {
        "log"
    }

    async fn notify(
        &self,
        notification: &Notification,
        events: &[MonitorEvent],
    ) -> Result<(), MonitorError> {
        for event in events {
            let summary = event.summary();
            let id = &notification.notification_id;
            if event.severity_level >= SEVERE {
                error!(notification = %id, "{}", summary);
            } else if event.severity_level >= WARNING {
                warn!(notification = %id, "{}", summary);
            } else {
                info!(notification = %id, "{}", summary);
            }
        }
        Ok(())
    }
}

/// POSTs events as JSON to the URL held in the notification's expression.
pub struct WebhookNotificationType {
    client: reqwest::Client,
}

impl WebhookNotificationType {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for WebhookNotificationType {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationType for WebhookNotificationType {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn notify(
        &self,
        notification: &Notification,
        events: &[MonitorEvent],
    ) -> Result<(), MonitorError> {
        let id = &notification.notification_id;
        let url = notification
            .expression
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| MonitorError::delivery(id, "webhook URL (expression) is not set"))?;

        let payload = serde_json::json!({
            "notification_id": id,
            "severity_level": notification.severity_level,
            "events": events,
        });

        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MonitorError::delivery(id, format!("webhook request failed: {}", e)))?;

        if response.status().is_success() {
            debug!("Webhook '{}' accepted {} event(s)", id, events.len());
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(MonitorError::delivery(
                id,
                format!("webhook returned {}: {}", status, body),
            ))
        }
    }
}
