//! Global CPU usage check.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use sysinfo::{MINIMUM_CPU_UPDATE_INTERVAL, System};
use tracing::debug;

use vigil_protocols::{Monitor, MonitorError, MonitorType};

/// Reports global CPU usage as a whole percentage.
///
/// Usage is measured between two refreshes, so the first check waits one
/// sampling interval; later checks measure since the previous check.
pub struct CpuMonitorType {
    system: Mutex<System>,
    primed: AtomicBool,
}

impl CpuMonitorType {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
            primed: AtomicBool::new(false),
        }
    }
}

impl Default for CpuMonitorType {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MonitorType for CpuMonitorType {
    fn name(&self) -> &str {
        "cpu"
    }

    async fn check(&self, monitor: &Monitor) -> Result<i64, MonitorError> {
        if !self.primed.swap(true, Ordering::SeqCst) {
            self.system.lock().refresh_cpu();
            tokio::time::sleep(MINIMUM_CPU_UPDATE_INTERVAL).await;
        }

        let mut system = self.system.lock();
        system.refresh_cpu();
        let usage = system.global_cpu_info().cpu_usage();
        debug!("Monitor '{}' cpu usage {:.1}%", monitor.monitor_id, usage);
        Ok(usage.round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cpu_usage_is_a_percentage() {
        let check = CpuMonitorType::new();
        let monitor = Monitor::new("cpu-high", "cpu", 90);

        for _ in 0..2 {
            let value = check.check(&monitor).await.unwrap();
            assert!((0..=100).contains(&value), "cpu usage {value}");
        }
        assert!(!check.requires_cluster_lock());
    }
}
