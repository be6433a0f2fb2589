//! Registration of the host resource checks.

use std::sync::Arc;

use vigil_core::MonitorTypeRegistry;
use vigil_protocols::ExtensionError;

use crate::{CpuMonitorType, DiskMonitorType, MemoryMonitorType};

/// Registers the `cpu`, `memory` and `disk` checks.
pub struct SystemMonitorsExtension;

impl SystemMonitorsExtension {
    pub const MONITOR_TYPES: [&'static str; 3] = ["cpu", "disk", "memory"];

    pub fn register(registry: &MonitorTypeRegistry) -> Result<(), ExtensionError> {
        registry.register(Arc::new(CpuMonitorType::new()))?;
        registry.register(Arc::new(MemoryMonitorType::new()))?;
        registry.register(Arc::new(DiskMonitorType::new()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registers_all_types() {
        let registry = MonitorTypeRegistry::new();
        SystemMonitorsExtension::register(&registry).unwrap();
        assert_eq!(registry.names(), SystemMonitorsExtension::MONITOR_TYPES.to_vec());
    }

    #[test]
    fn test_register_twice_fails() {
        let registry = MonitorTypeRegistry::new();
        SystemMonitorsExtension::register(&registry).unwrap();
        assert!(matches!(
            SystemMonitorsExtension::register(&registry),
            Err(ExtensionError::AlreadyRegistered(_))
        ));
    }
}
