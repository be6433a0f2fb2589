//! Monitor, notification and event entities.

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::severity::severity_name;

/// Scope value matching every node group or external id.
pub const SCOPE_ALL: &str = "ALL";

fn default_scope() -> String {
    SCOPE_ALL.to_string()
}

fn default_enabled() -> bool {
    true
}

fn scope_matches(scope: &str, value: &str) -> bool {
    scope == SCOPE_ALL || scope == value
}

/// A scheduled check definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monitor {
    /// Monitor ID.
    pub monitor_id: String,
    /// Node group this monitor applies to.
    #[serde(default = "default_scope")]
    pub node_group_id: String,
    /// External id this monitor applies to.
    #[serde(default = "default_scope")]
    pub external_id: String,
    /// Registered check type name.
    #[serde(rename = "type")]
    pub monitor_type: String,
    /// Opaque configuration handed to the check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    /// Whether the monitor is evaluated.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Value at or above which an event fires.
    pub threshold: i64,
    /// Minimum seconds between evaluations.
    #[serde(default)]
    pub run_period: u64,
    /// Smoothing window size; 0 or 1 disables smoothing.
    #[serde(default)]
    pub run_count: u32,
    /// Severity copied into fired events.
    #[serde(default)]
    pub severity_level: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_time: Option<DateTime<Utc>>,
}

impl Monitor {
    /// Create an enabled monitor scoped to every node.
    pub fn new(
        monitor_id: impl Into<String>,
        monitor_type: impl Into<String>,
        threshold: i64,
    ) -> Self {
        Self {
            monitor_id: monitor_id.into(),
            node_group_id: default_scope(),
            external_id: default_scope(),
            monitor_type: monitor_type.into(),
            expression: None,
            enabled: true,
            threshold,
            run_period: 0,
            run_count: 0,
            severity_level: 0,
            create_time: None,
            last_update_by: None,
            last_update_time: None,
        }
    }

    /// Restrict to a node group and external id.
    pub fn with_scope(
        mut self,
        node_group_id: impl Into<String>,
        external_id: impl Into<String>,
    ) -> Self {
        self.node_group_id = node_group_id.into();
        self.external_id = external_id.into();
        self
    }

    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }

    pub fn with_run_period(mut self, seconds: u64) -> Self {
        self.run_period = seconds;
        self
    }

    pub fn with_run_count(mut self, count: u32) -> Self {
        self.run_count = count;
        self
    }

    pub fn with_severity(mut self, level: i32) -> Self {
        self.severity_level = level;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Whether this definition applies to the given node scope.
    pub fn applies_to(&self, node_group_id: &str, external_id: &str) -> bool {
        scope_matches(&self.node_group_id, node_group_id)
            && scope_matches(&self.external_id, external_id)
    }
}

/// A severity-gated delivery rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Notification ID.
    pub notification_id: String,
    #[serde(default = "default_scope")]
    pub node_group_id: String,
    #[serde(default = "default_scope")]
    pub external_id: String,
    /// Minimum event severity delivered by this rule.
    #[serde(default)]
    pub severity_level: i32,
    /// Registered notification type name.
    #[serde(rename = "type")]
    pub notification_type: String,
    /// Opaque channel configuration (destination address, URL, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_time: Option<DateTime<Utc>>,
}

impl Notification {
    /// Create an enabled notification scoped to every node.
    pub fn new(
        notification_id: impl Into<String>,
        notification_type: impl Into<String>,
        severity_level: i32,
    ) -> Self {
        Self {
            notification_id: notification_id.into(),
            node_group_id: default_scope(),
            external_id: default_scope(),
            severity_level,
            notification_type: notification_type.into(),
            expression: None,
            enabled: true,
            create_time: None,
            last_update_by: None,
            last_update_time: None,
        }
    }

    pub fn with_scope(
        mut self,
        node_group_id: impl Into<String>,
        external_id: impl Into<String>,
    ) -> Self {
        self.node_group_id = node_group_id.into();
        self.external_id = external_id.into();
        self
    }

    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Whether this definition applies to the given node scope.
    pub fn applies_to(&self, node_group_id: &str, external_id: &str) -> bool {
        scope_matches(&self.node_group_id, node_group_id)
            && scope_matches(&self.external_id, external_id)
    }
}

/// Composite identity of a [`MonitorEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventKey {
    pub monitor_id: String,
    pub node_id: String,
    pub event_time: DateTime<Utc>,
}

/// One recorded threshold crossing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorEvent {
    pub monitor_id: String,
    /// Node that detected the crossing.
    pub node_id: String,
    /// Detection time, truncated to whole seconds.
    pub event_time: DateTime<Utc>,
    pub host_name: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub value: i64,
    /// Monitor threshold at the time the event fired.
    pub threshold: i64,
    pub severity_level: i32,
    #[serde(default)]
    pub notified: bool,
}

impl MonitorEvent {
    /// Record a crossing of `monitor` observed at `now` with `value`.
    pub fn fired(
        monitor: &Monitor,
        node_id: impl Into<String>,
        host_name: impl Into<String>,
        value: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            monitor_id: monitor.monitor_id.clone(),
            node_id: node_id.into(),
            event_time: truncate_to_second(now),
            host_name: host_name.into(),
            event_type: monitor.monitor_type.clone(),
            value,
            threshold: monitor.threshold,
            severity_level: monitor.severity_level,
            notified: false,
        }
    }

    pub fn key(&self) -> EventKey {
        EventKey {
            monitor_id: self.monitor_id.clone(),
            node_id: self.node_id.clone(),
            event_time: self.event_time,
        }
    }

    /// One-line human readable description.
    pub fn summary(&self) -> String {
        format!(
            "[{}] {} - monitor '{}' ({}) on node {} ({}): value {} reached threshold {}",
            severity_name(self.severity_level),
            self.event_time.format("%Y-%m-%d %H:%M:%S UTC"),
            self.monitor_id,
            self.event_type,
            self.node_id,
            self.host_name,
            self.value,
            self.threshold
        )
    }
}

/// Drop sub-second precision.
pub fn truncate_to_second(time: DateTime<Utc>) -> DateTime<Utc> {
    time.with_nanosecond(0).unwrap_or(time)
}

/// Identity of the node running the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeIdentity {
    pub node_id: String,
    pub node_group_id: String,
    pub external_id: String,
}

impl NodeIdentity {
    pub fn new(
        node_id: impl Into<String>,
        node_group_id: impl Into<String>,
        external_id: impl Into<String>,
    ) -> Self {
        Self {
            node_id: node_id.into(),
            node_group_id: node_group_id.into(),
            external_id: external_id.into(),
        }
    }
}

/// Metadata kept by a cluster lock backend for one named lock.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LockInfo {
    pub lock_name: String,
    /// Server currently holding the lock.
    pub locking_server_id: Option<String>,
    /// When the current holder acquired the lock.
    pub lock_time: Option<DateTime<Utc>>,
    pub last_locking_server_id: Option<String>,
    /// Acquisition time of the most recent completed hold.
    pub last_lock_time: Option<DateTime<Utc>>,
}

impl LockInfo {
    pub fn new(lock_name: impl Into<String>) -> Self {
        Self {
            lock_name: lock_name.into(),
            ..Self::default()
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locking_server_id.is_some()
    }
}

/// Query over recorded events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    /// Minimum severity (inclusive).
    #[serde(default)]
    pub severity_level: i32,
    #[serde(default, rename = "type")]
    pub event_type: Option<String>,
    #[serde(default)]
    pub node_id: Option<String>,
    /// Maximum rows returned, newest first.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl EventFilter {
    pub fn new(severity_level: i32) -> Self {
        Self {
            severity_level,
            ..Self::default()
        }
    }

    pub fn with_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    pub fn with_node_id(mut self, node_id: impl Into<String>) -> Self {
        self.node_id = Some(node_id.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, event: &MonitorEvent) -> bool {
        event.severity_level >= self.severity_level
            && self
                .event_type
                .as_ref()
                .is_none_or(|t| *t == event.event_type)
            && self.node_id.as_ref().is_none_or(|n| *n == event.node_id)
    }
}
