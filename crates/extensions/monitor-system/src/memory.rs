//! Used memory check.

use async_trait::async_trait;
use parking_lot::Mutex;
use sysinfo::System;

use vigil_protocols::{Monitor, MonitorError, MonitorType};

use crate::percent;

/// Reports used physical memory as a whole percentage of total memory.
pub struct MemoryMonitorType {
    system: Mutex<System>,
}

impl MemoryMonitorType {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
        }
    }
}

impl Default for MemoryMonitorType {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MonitorType for MemoryMonitorType {
    fn name(&self) -> &str {
        "memory"
    }

    async fn check(&self, _monitor: &Monitor) -> Result<i64, MonitorError> {
        let mut system = self.system.lock();
        system.refresh_memory();
        Ok(percent(system.used_memory(), system.total_memory()))
    }
}
