//! Monitoring engine errors.

use thiserror::Error;

/// Monitor error types.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Definition or event store failure.
    #[error("Store error: {0}")]
    Store(String),

    /// A check implementation failed.
    #[error("Check failed for monitor '{monitor_id}': {message}")]
    CheckFailed { monitor_id: String, message: String },

    /// A notification implementation failed to deliver.
    #[error("Delivery failed for notification '{notification_id}': {message}")]
    Delivery {
        notification_id: String,
        message: String,
    },

    /// Cluster lock backend failure (not contention).
    #[error("Cluster lock error: {0}")]
    Lock(String),

    /// Node identity could not be resolved.
    #[error("Node identity error: {0}")]
    Identity(String),

    /// Invalid engine configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generic error.
    #[error("{0}")]
    Custom(String),
}

impl MonitorError {
    /// Build a check failure for the given monitor.
    pub fn check(monitor_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CheckFailed {
            monitor_id: monitor_id.into(),
            message: message.into(),
        }
    }

    /// Build a delivery failure for the given notification.
    pub fn delivery(notification_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Delivery {
            notification_id: notification_id.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_failed_error() {
        let err = MonitorError::check("cpu-high", "no data");
        let msg = err.to_string();
        assert!(msg.contains("cpu-high"));
        assert!(msg.contains("no data"));
    }

    #[test]
    fn test_delivery_error() {
        let err = MonitorError::delivery("ops-mail", "connection refused");
        let msg = err.to_string();
        assert!(msg.contains("ops-mail"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_store_error() {
        let err = MonitorError::Store("table missing".to_string());
        assert_eq!(err.to_string(), "Store error: table missing");
    }

    #[test]
    fn test_custom_error() {
        let err = MonitorError::Custom("boom".to_string());
        assert_eq!(err.to_string(), "boom");
    }
}
