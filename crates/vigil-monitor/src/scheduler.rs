//! Run-period scheduling for node-local and cluster-gated monitors.

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use vigil_protocols::{Monitor, MonitorError, NodeIdentity};

use crate::dispatcher::CheckDispatcher;
use crate::emitter::EventEmitter;

fn period_elapsed(since: DateTime<Utc>, now: DateTime<Utc>, run_period: u64) -> bool {
    let elapsed = (now - since).num_seconds();
    elapsed >= 0 && elapsed as u64 >= run_period
}

/// Runs monitors whose checks need no cluster coordination.
///
/// Last-run times are kept per monitor id for as long as the monitor stays in
/// the active list.
#[derive(Debug, Default)]
pub struct LocalScheduler {
    last_check_times: HashMap<String, DateTime<Utc>>,
}

impl LocalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate every eligible node-local monitor. Returns the number of
    /// events recorded.
    pub async fn run(
        &mut self,
        monitors: &[Monitor],
        dispatcher: &CheckDispatcher,
        emitter: &mut EventEmitter,
        identity: &NodeIdentity,
        now: DateTime<Utc>,
    ) -> Result<usize, MonitorError> {
        self.last_check_times
            .retain(|id, _| monitors.iter().any(|m| &m.monitor_id == id));
        let mut fired = 0;

        for monitor in monitors.iter().filter(|m| m.enabled) {
            let Some(check) = dispatcher.resolve(monitor) else {
                warn!(
                    "Could not find monitor type '{}' for monitor '{}'",
                    monitor.monitor_type, monitor.monitor_id
                );
                continue;
            };
            if check.requires_cluster_lock() {
                continue;
            }

            let due = self
                .last_check_times
                .get(&monitor.monitor_id)
                .is_none_or(|last| period_elapsed(*last, now, monitor.run_period));
            if !due {
                continue;
            }

            self.last_check_times
                .insert(monitor.monitor_id.clone(), now);
            let value = dispatcher.check(check.as_ref(), monitor).await?;
            if emitter
                .evaluate(monitor, value, false, identity, now)
                .await?
                .is_some()
            {
                fired += 1;
            }
        }

        Ok(fired)
    }

    /// When `monitor_id` last ran on this node.
    pub fn last_check_time(&self, monitor_id: &str) -> Option<DateTime<Utc>> {
        self.last_check_times.get(monitor_id).copied()
    }
}

/// Runs monitors whose checks must execute on one node at a time.
///
/// Every cluster-gated monitor is measured against the same timestamp: the
/// last lock time recorded on the monitor lock.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClusterScheduler;

impl ClusterScheduler {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate every eligible cluster-gated monitor. Must be called while
    /// holding the monitor lock.
    pub async fn run(
        &self,
        last_lock_time: Option<DateTime<Utc>>,
        monitors: &[Monitor],
        dispatcher: &CheckDispatcher,
        emitter: &mut EventEmitter,
        identity: &NodeIdentity,
        now: DateTime<Utc>,
    ) -> Result<usize, MonitorError> {
        let since = last_lock_time.unwrap_or(DateTime::UNIX_EPOCH);
        let mut fired = 0;

        for monitor in monitors.iter().filter(|m| m.enabled) {
            let Some(check) = dispatcher.resolve(monitor) else {
                continue;
            };
            if !check.requires_cluster_lock() {
                continue;
            }
            if !period_elapsed(since, now, monitor.run_period) {
                debug!(
                    "Cluster monitor '{}' not due (last lock {})",
                    monitor.monitor_id, since
                );
                continue;
            }

            let value = dispatcher.check(check.as_ref(), monitor).await?;
            if emitter
                .evaluate(monitor, value, true, identity, now)
                .await?
                .is_some()
            {
                fired += 1;
            }
        }

        Ok(fired)
    }
}
