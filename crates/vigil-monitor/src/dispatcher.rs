//! Resolves monitors to their check implementations.

use std::sync::Arc;

use tracing::debug;

use vigil_core::MonitorTypeRegistry;
use vigil_protocols::{Monitor, MonitorError, MonitorType};

/// Looks up a monitor's `type` in the check registry and runs it.
#[derive(Clone)]
pub struct CheckDispatcher {
    registry: Arc<MonitorTypeRegistry>,
}

impl CheckDispatcher {
    pub fn new(registry: Arc<MonitorTypeRegistry>) -> Self {
        Self { registry }
    }

    /// The registered check for `monitor`, if any.
    pub fn resolve(&self, monitor: &Monitor) -> Option<Arc<dyn MonitorType>> {
        self.registry.get(&monitor.monitor_type)
    }

    /// Run `monitor_type` against `monitor`.
    pub async fn check(
        &self,
        monitor_type: &dyn MonitorType,
        monitor: &Monitor,
    ) -> Result<i64, MonitorError> {
        let value = monitor_type.check(monitor).await?;
        debug!(
            "Monitor '{}' ({}) observed {}",
            monitor.monitor_id, monitor.monitor_type, value
        );
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedCheck;

    #[tokio::test]
    async fn test_resolve_and_check() {
        let registry = Arc::new(MonitorTypeRegistry::new());
        registry
            .register(Arc::new(ScriptedCheck::new("cpu", false, &[73])))
            .unwrap();
        let dispatcher = CheckDispatcher::new(registry);

        let monitor = Monitor::new("cpu-high", "cpu", 90);
        let check = dispatcher.resolve(&monitor).unwrap();
        assert_eq!(dispatcher.check(check.as_ref(), &monitor).await.unwrap(), 73);
    }

    #[test]
    fn test_unregistered_type() {
        let dispatcher = CheckDispatcher::new(Arc::new(MonitorTypeRegistry::new()));
        assert!(dispatcher.resolve(&Monitor::new("m", "gpu", 1)).is_none());
    }

    #[tokio::test]
    async fn test_check_failure_propagates() {
        let registry = Arc::new(MonitorTypeRegistry::new());
        registry
            .register(Arc::new(ScriptedCheck::failing("cpu", false)))
            .unwrap();
        let dispatcher = CheckDispatcher::new(registry);

        let monitor = Monitor::new("cpu-high", "cpu", 90);
        let check = dispatcher.resolve(&monitor).unwrap();
        let result = dispatcher.check(check.as_ref(), &monitor).await;
        assert!(matches!(result, Err(MonitorError::CheckFailed { .. })));
    }
}
