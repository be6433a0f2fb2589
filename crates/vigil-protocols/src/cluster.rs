//! Cluster coordination and node identity protocols.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::MonitorError;
use crate::model::{LockInfo, NodeIdentity};

/// Named cross-process mutual exclusion.
#[async_trait]
pub trait ClusterLock: Send + Sync {
    /// Attempt to take the lock without waiting, stamping `now` as the lock
    /// time. On unlock that stamp becomes [`LockInfo::last_lock_time`].
    ///
    /// `Ok(false)` means another holder has it; errors are backend failures.
    async fn try_lock(&self, name: &str, now: DateTime<Utc>) -> Result<bool, MonitorError>;

    /// Release a lock held by this process.
    async fn unlock(&self, name: &str) -> Result<(), MonitorError>;

    /// Metadata for a lock, if the backend knows it.
    async fn lock_info(&self, name: &str) -> Result<Option<LockInfo>, MonitorError>;
}

/// Resolves the identity of the node running the engine.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// `Ok(None)` while the node has no identity yet (e.g. not registered).
    async fn find_identity(&self) -> Result<Option<NodeIdentity>, MonitorError>;
}

#[async_trait]
impl IdentityProvider for NodeIdentity {
    async fn find_identity(&self) -> Result<Option<NodeIdentity>, MonitorError> {
        if self.node_id.trim().is_empty() {
            return Err(MonitorError::Identity("node id is empty".to_string()));
        }
        Ok(Some(self.clone()))
    }
}
