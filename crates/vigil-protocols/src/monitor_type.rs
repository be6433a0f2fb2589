//! Check plugin protocol.

use async_trait::async_trait;

use crate::error::MonitorError;
use crate::model::Monitor;

/// A check implementation, looked up by [`MonitorType::name`] from a
/// monitor's `type`.
#[async_trait]
pub trait MonitorType: Send + Sync {
    /// Registered type name.
    fn name(&self) -> &str;

    /// Whether the check must run on at most one node of the cluster.
    fn requires_cluster_lock(&self) -> bool {
        false
    }

    /// Produce one observation for `monitor`.
    async fn check(&self, monitor: &Monitor) -> Result<i64, MonitorError>;
}
