//! Scoped ownership of a cluster lock.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, warn};

use vigil_protocols::{ClusterLock, MonitorError};

/// Holds a named [`ClusterLock`] until released.
///
/// Callers release with [`ClusterLockGuard::release`] on both success and
/// error paths. If the guard is dropped without that (panic or a cancelled
/// future), the unlock is spawned onto the current tokio runtime.
pub struct ClusterLockGuard {
    lock: Arc<dyn ClusterLock>,
    name: String,
    released: bool,
}

impl ClusterLockGuard {
    /// Try once to take `name` as of `now`. `Ok(None)` means another holder
    /// has it.
    pub async fn try_acquire(
        lock: Arc<dyn ClusterLock>,
        name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Option<Self>, MonitorError> {
        let name = name.into();
        if lock.try_lock(&name, now).await? {
            debug!("Acquired cluster lock '{}'", name);
            Ok(Some(Self {
                lock,
                name,
                released: false,
            }))
        } else {
            debug!("Cluster lock '{}' is held elsewhere", name);
            Ok(None)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Release the lock.
    pub async fn release(mut self) -> Result<(), MonitorError> {
        self.released = true;
        let result = self.lock.unlock(&self.name).await;
        match &result {
            Ok(()) => debug!("Released cluster lock '{}'", self.name),
            Err(e) => error!("Failed to release cluster lock '{}': {}", self.name, e),
        }
        result
    }
}

impl Drop for ClusterLockGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        let lock = self.lock.clone();
        let name = std::mem::take(&mut self.name);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                warn!("Cluster lock '{}' dropped while held, releasing", name);
                handle.spawn(async move {
                    if let Err(e) = lock.unlock(&name).await {
                        error!("Failed to release cluster lock '{}': {}", name, e);
                    }
                });
            }
            Err(_) => error!(
                "Cluster lock '{}' dropped outside a tokio runtime and was not released",
                name
            ),
        }
    }
}
