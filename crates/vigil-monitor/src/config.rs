//! Engine settings.

use std::time::Duration;

use vigil_config::{Config, MonitorConfig};
use vigil_protocols::EventFilter;

/// Runtime settings of a [`MonitorService`](crate::MonitorService).
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    /// Cluster lock guarding clustered checks and fan-out.
    pub lock_name: String,
    /// Lifetime of cached monitor definitions.
    pub monitor_cache_ttl: Duration,
    /// Lifetime of cached notification definitions.
    pub notification_cache_ttl: Duration,
    /// Query used by [`MonitorService::recent_events`](crate::MonitorService::recent_events).
    pub event_filter: EventFilter,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self::from(&MonitorConfig::default())
    }
}

impl From<&MonitorConfig> for MonitorSettings {
    fn from(config: &MonitorConfig) -> Self {
        Self {
            lock_name: config.lock_name.clone(),
            monitor_cache_ttl: Duration::from_millis(config.cache_timeout_monitor_ms),
            notification_cache_ttl: Duration::from_millis(config.cache_timeout_notification_ms),
            event_filter: EventFilter::default(),
        }
    }
}

impl From<&Config> for MonitorSettings {
    fn from(config: &Config) -> Self {
        Self {
            event_filter: config.events.filter(),
            ..Self::from(&config.monitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_config() {
        let config = MonitorConfig {
            lock_name: "HEALTH".to_string(),
            cache_timeout_monitor_ms: 1500,
            cache_timeout_notification_ms: 0,
            ..MonitorConfig::default()
        };

        let settings = MonitorSettings::from(&config);
        assert_eq!(settings.lock_name, "HEALTH");
        assert_eq!(settings.monitor_cache_ttl, Duration::from_millis(1500));
        assert_eq!(settings.notification_cache_ttl, Duration::ZERO);
    }

    #[test]
    fn test_settings_default() {
        let settings = MonitorSettings::default();
        assert_eq!(settings.lock_name, "MONITOR");
        assert_eq!(settings.monitor_cache_ttl, Duration::from_secs(60));
        assert_eq!(settings.event_filter, EventFilter::default());
    }

    #[test]
    fn test_settings_take_event_filter() {
        let mut config = Config::default();
        config.events.min_severity_level = 200;
        config.events.event_type = Some("cpu".to_string());

        let settings = MonitorSettings::from(&config);
        assert_eq!(settings.event_filter.severity_level, 200);
        assert_eq!(settings.event_filter.event_type.as_deref(), Some("cpu"));
        assert_eq!(settings.lock_name, "MONITOR");
    }
}
