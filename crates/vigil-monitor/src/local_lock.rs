//! In-process cluster lock for single-node deployments and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use vigil_protocols::{ClusterLock, LockInfo, MonitorError};

/// [`ClusterLock`] whose scope is the current process.
///
/// Releasing a lock moves its acquisition time into `last_lock_time`, which
/// is what the clustered scheduler reads as the shared last-check time.
pub struct LocalClusterLock {
    server_id: String,
    locks: Mutex<HashMap<String, LockInfo>>,
}

impl LocalClusterLock {
    pub fn new(server_id: impl Into<String>) -> Self {
        Self {
            server_id: server_id.into(),
            locks: Mutex::new(HashMap::new()),
        }
    }
}

fn check_name(name: &str) -> Result<(), MonitorError> {
    if name.trim().is_empty() {
        return Err(MonitorError::Lock("lock name is empty".to_string()));
    }
    Ok(())
}

#[async_trait]
impl ClusterLock for LocalClusterLock {
    async fn try_lock(&self, name: &str, now: DateTime<Utc>) -> Result<bool, MonitorError> {
        check_name(name)?;
        let mut locks = self.locks.lock();
        let info = locks
            .entry(name.to_string())
            .or_insert_with(|| LockInfo::new(name));
        if info.is_locked() {
            return Ok(false);
        }
        info.locking_server_id = Some(self.server_id.clone());
        info.lock_time = Some(now);
        Ok(true)
    }

    async fn unlock(&self, name: &str) -> Result<(), MonitorError> {
        check_name(name)?;
        let mut locks = self.locks.lock();
        if let Some(info) = locks.get_mut(name) {
            if info.is_locked() {
                info.last_locking_server_id = info.locking_server_id.take();
                info.last_lock_time = info.lock_time.take();
            }
        }
        Ok(())
    }

    async fn lock_info(&self, name: &str) -> Result<Option<LockInfo>, MonitorError> {
        Ok(self.locks.lock().get(name).cloned())
    }
}
