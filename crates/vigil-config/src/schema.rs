//! Configuration schema definitions.

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use vigil_protocols::{EventFilter, Monitor, NodeIdentity, Notification};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub node: NodeConfig,

    #[serde(default)]
    pub monitor: MonitorConfig,

    #[serde(default)]
    pub events: EventsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Monitor definitions seeded into the store at startup.
    #[serde(default)]
    pub monitors: Vec<Monitor>,

    /// Notification definitions seeded into the store at startup.
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

/// Identity of this node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    #[serde(default = "default_node_id")]
    pub node_id: String,

    #[serde(default = "default_node_group_id")]
    pub node_group_id: String,

    #[serde(default = "default_node_id")]
    pub external_id: String,

    /// Host name recorded on events; resolved from the OS when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
}

impl NodeConfig {
    pub fn identity(&self) -> NodeIdentity {
        NodeIdentity::new(&self.node_id, &self.node_group_id, &self.external_id)
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            node_group_id: default_node_group_id(),
            external_id: default_node_id(),
            host_name: None,
        }
    }
}

fn default_node_id() -> String {
    "000".to_string()
}

fn default_node_group_id() -> String {
    "default".to_string()
}

/// Evaluation cycle settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Whether the driver runs evaluation cycles.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Seconds between evaluation cycles.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Name of the cluster lock guarding clustered checks and fan-out.
    #[serde(default = "default_lock_name")]
    pub lock_name: String,

    /// Lifetime of the cached monitor definitions.
    #[serde(default = "default_cache_timeout_ms")]
    pub cache_timeout_monitor_ms: u64,

    /// Lifetime of the cached notification definitions.
    #[serde(default = "default_cache_timeout_ms")]
    pub cache_timeout_notification_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            interval_secs: default_interval_secs(),
            lock_name: default_lock_name(),
            cache_timeout_monitor_ms: default_cache_timeout_ms(),
            cache_timeout_notification_ms: default_cache_timeout_ms(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_interval_secs() -> u64 {
    60
}

fn default_lock_name() -> String {
    "MONITOR".to_string()
}

fn default_cache_timeout_ms() -> u64 {
    60_000
}

/// Default filter for event queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    #[serde(default)]
    pub min_severity_level: i32,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,

    #[serde(default = "default_event_limit")]
    pub limit: usize,
}

impl EventsConfig {
    pub fn filter(&self) -> EventFilter {
        EventFilter {
            severity_level: self.min_severity_level,
            event_type: self.event_type.clone(),
            node_id: self.node_id.clone(),
            limit: Some(self.limit),
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            min_severity_level: 0,
            event_type: None,
            node_id: None,
            limit: default_event_limit(),
        }
    }
}

fn default_event_limit() -> usize {
    1000
}

/// Logging output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of text on the console.
    #[serde(default)]
    pub json: bool,

    /// Directory for daily rolling log files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            file_dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
