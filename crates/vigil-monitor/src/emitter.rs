//! Turns check values into persisted events.

#[cfg(test)]
#[path = "emitter_tests.rs"]
mod tests;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use vigil_protocols::{Monitor, MonitorError, MonitorEvent, MonitorStore, NodeIdentity};

use crate::window::WindowAverager;

/// Applies smoothing and the threshold test, and records crossings.
pub struct EventEmitter {
    store: Arc<dyn MonitorStore>,
    host_name: String,
    averager: WindowAverager,
}

impl EventEmitter {
    pub fn new(store: Arc<dyn MonitorStore>, host_name: impl Into<String>) -> Self {
        Self {
            store,
            host_name: host_name.into(),
            averager: WindowAverager::new(),
        }
    }

    /// Evaluate one observation of `monitor`.
    ///
    /// Node-local monitors with a run count are smoothed through a window
    /// keyed by monitor type; clustered monitors always use the raw value.
    /// Returns the recorded event when the value reached the threshold.
    pub async fn evaluate(
        &mut self,
        monitor: &Monitor,
        raw_value: i64,
        requires_cluster_lock: bool,
        identity: &NodeIdentity,
        now: DateTime<Utc>,
    ) -> Result<Option<MonitorEvent>, MonitorError> {
        let value = if !requires_cluster_lock && monitor.run_count > 0 {
            match self
                .averager
                .observe(&monitor.monitor_type, raw_value, monitor.run_count)
            {
                Some(average) => average,
                None => {
                    debug!(
                        "Monitor '{}' window not full ({}/{})",
                        monitor.monitor_id,
                        self.averager.len(&monitor.monitor_type),
                        monitor.run_count
                    );
                    return Ok(None);
                }
            }
        } else {
            raw_value
        };

        if value < monitor.threshold {
            return Ok(None);
        }

        let event = MonitorEvent::fired(monitor, &identity.node_id, &self.host_name, value, now);
        self.store.save_monitor_event(&event).await?;
        info!(
            "Monitor '{}' fired: {} value {} >= threshold {} (severity {})",
            monitor.monitor_id, monitor.monitor_type, value, monitor.threshold, monitor.severity_level
        );
        Ok(Some(event))
    }

    pub fn host_name(&self) -> &str {
        &self.host_name
    }

    pub fn averager(&self) -> &WindowAverager {
        &self.averager
    }
}
