//! Used disk space check.

use std::path::Path;

use async_trait::async_trait;
use parking_lot::Mutex;
use sysinfo::Disks;
use tracing::debug;

use vigil_protocols::{Monitor, MonitorError, MonitorType};

use crate::percent;

/// Reports used space as a whole percentage.
///
/// When the monitor's expression names a mount point, that disk is measured
/// and a missing mount is a check failure. Otherwise the fullest mounted
/// disk is reported, or 0 when none are visible.
pub struct DiskMonitorType {
    disks: Mutex<Disks>,
}

impl DiskMonitorType {
    pub fn new() -> Self {
        Self {
            disks: Mutex::new(Disks::new_with_refreshed_list()),
        }
    }
}

impl Default for DiskMonitorType {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MonitorType for DiskMonitorType {
    fn name(&self) -> &str {
        "disk"
    }

    async fn check(&self, monitor: &Monitor) -> Result<i64, MonitorError> {
        let mut disks = self.disks.lock();
        disks.refresh_list();

        let usage = |disk: &sysinfo::Disk| {
            let total = disk.total_space();
            percent(total.saturating_sub(disk.available_space()), total)
        };

        match monitor
            .expression
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
        {
            Some(mount) => disks
                .list()
                .iter()
                .find(|d| d.mount_point() == Path::new(mount))
                .map(usage)
                .ok_or_else(|| {
                    MonitorError::check(
                        &monitor.monitor_id,
                        format!("no disk mounted at '{}'", mount),
                    )
                }),
            None => {
                let fullest = disks.list().iter().map(usage).max().unwrap_or(0);
                debug!(
                    "Monitor '{}' fullest of {} disk(s) at {}%",
                    monitor.monitor_id,
                    disks.list().len(),
                    fullest
                );
                Ok(fullest)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fullest_disk_is_a_percentage() {
        let value = DiskMonitorType::new()
            .check(&Monitor::new("disk-full", "disk", 90))
            .await
            .unwrap();
        assert!((0..=100).contains(&value));
    }

    #[tokio::test]
    async fn test_unknown_mount_point_fails() {
        let monitor =
            Monitor::new("disk-full", "disk", 90).with_expression("/vigil/not/a/mount/point");
        let result = DiskMonitorType::new().check(&monitor).await;
        assert!(matches!(result, Err(MonitorError::CheckFailed { .. })));
    }
}
