//! Assembly of the monitor service from configuration.

use std::sync::Arc;

use sysinfo::System;
use tracing::{info, warn};

use vigil_config::Config;
use vigil_core::{MonitorTypeRegistry, NotificationTypeRegistry};
use vigil_monitor::{
    LocalClusterLock, LogNotificationType, MemoryMonitorStore, MonitorService, MonitorSettings,
    WebhookNotificationType,
};
use vigil_monitor_system::SystemMonitorsExtension;

/// Host name stamped on events: the configured value, else the OS host name.
pub(crate) fn resolve_host_name(config: &Config) -> String {
    config
        .node
        .host_name
        .clone()
        .filter(|h| !h.trim().is_empty())
        .or_else(System::host_name)
        .unwrap_or_else(|| "localhost".to_string())
}

/// Register the built-in check and notification types.
pub(crate) fn register_builtins(
    monitor_types: &MonitorTypeRegistry,
    notification_types: &NotificationTypeRegistry,
) -> Result<(), Box<dyn std::error::Error>> {
    SystemMonitorsExtension::register(monitor_types)?;
    notification_types.register(Arc::new(LogNotificationType::new()))?;
    notification_types.register(Arc::new(WebhookNotificationType::new()))?;
    Ok(())
}

/// Build a service over an in-memory store seeded with the configured
/// definitions.
pub(crate) fn build_service(config: &Config) -> Result<MonitorService, Box<dyn std::error::Error>> {
    let monitor_types = Arc::new(MonitorTypeRegistry::new());
    let notification_types = Arc::new(NotificationTypeRegistry::new());
    register_builtins(&monitor_types, &notification_types)?;

    for monitor in &config.monitors {
        if monitor_types.get(&monitor.monitor_type).is_none() {
            warn!(
                "Monitor '{}' uses unknown type '{}'; it will be skipped",
                monitor.monitor_id, monitor.monitor_type
            );
        }
    }

    let store = Arc::new(MemoryMonitorStore::with_definitions(
        config.monitors.clone(),
        config.notifications.clone(),
    ));
    let host_name = resolve_host_name(config);
    info!(
        "Node {} (group {}, external id {}) on host {}: {} monitor(s), {} notification(s)",
        config.node.node_id,
        config.node.node_group_id,
        config.node.external_id,
        host_name,
        config.monitors.len(),
        config.notifications.len()
    );

    let service = MonitorService::builder()
        .store(store)
        .lock(Arc::new(LocalClusterLock::new(config.node.node_id.clone())))
        .identity(Arc::new(config.node.identity()))
        .monitor_types(monitor_types)
        .notification_types(notification_types)
        .host_name(host_name)
        .settings(MonitorSettings::from(config))
        .build()?;
    Ok(service)
}
