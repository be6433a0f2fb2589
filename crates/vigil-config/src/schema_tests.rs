use super::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.node.node_id, "000");
    assert_eq!(config.node.node_group_id, "default");
    assert!(config.monitor.enabled);
    assert!(config.monitors.is_empty());
    assert!(config.notifications.is_empty());
}

#[test]
fn test_monitor_config_default() {
    let monitor = MonitorConfig::default();
    assert_eq!(monitor.interval_secs, 60);
    assert_eq!(monitor.lock_name, "MONITOR");
    assert_eq!(monitor.cache_timeout_monitor_ms, 60_000);
    assert_eq!(monitor.cache_timeout_notification_ms, 60_000);
}

#[test]
fn test_events_filter() {
    let events = EventsConfig {
        min_severity_level: 200,
        event_type: Some("cpu".to_string()),
        node_id: None,
        limit: 50,
    };

    let filter = events.filter();
    assert_eq!(filter.severity_level, 200);
    assert_eq!(filter.event_type.as_deref(), Some("cpu"));
    assert!(filter.node_id.is_none());
    assert_eq!(filter.limit, Some(50));
}

#[test]
fn test_node_identity() {
    let node = NodeConfig {
        node_id: "n1".to_string(),
        node_group_id: "store".to_string(),
        external_id: "001".to_string(),
        host_name: None,
    };

    let identity = node.identity();
    assert_eq!(identity.node_id, "n1");
    assert_eq!(identity.node_group_id, "store");
    assert_eq!(identity.external_id, "001");
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("MONITOR"));
    assert!(json.contains("60000"));
}
