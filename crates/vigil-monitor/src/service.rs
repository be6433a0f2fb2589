//! The monitoring engine.
//!
//! A [`MonitorService`] owns all process-local state (cached definitions,
//! last-run times, smoothing windows) and runs one evaluation cycle per
//! [`MonitorService::update`] call:
//!
//! 1. node-local monitors whose run period has elapsed are checked;
//! 2. if the cluster lock is free, cluster-gated monitors are checked and
//!    pending events are fanned out to notifications;
//! 3. the lock is released.

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use vigil_core::{MonitorTypeRegistry, NotificationTypeRegistry};
use vigil_protocols::{
    ClusterLock, EventFilter, EventKey, IdentityProvider, Monitor, MonitorError, MonitorEvent,
    MonitorStore, NodeIdentity, Notification,
};

use crate::cache::DefinitionCache;
use crate::config::MonitorSettings;
use crate::dispatcher::CheckDispatcher;
use crate::emitter::EventEmitter;
use crate::fanout::NotificationFanout;
use crate::local_lock::LocalClusterLock;
use crate::lock::ClusterLockGuard;
use crate::scheduler::{ClusterScheduler, LocalScheduler};

/// Outcome of one evaluation cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Events recorded by node-local monitors.
    pub local_events: usize,
    /// Whether this node held the cluster lock for the cycle.
    pub lock_acquired: bool,
    /// Events recorded by cluster-gated monitors.
    pub cluster_events: usize,
    /// Notifications that received a batch.
    pub deliveries: usize,
}

struct CycleState {
    local: LocalScheduler,
    emitter: EventEmitter,
}

/// Periodic health-monitoring engine.
pub struct MonitorService {
    store: Arc<dyn MonitorStore>,
    lock: Arc<dyn ClusterLock>,
    identity: Arc<dyn IdentityProvider>,
    settings: MonitorSettings,
    cache: DefinitionCache,
    dispatcher: CheckDispatcher,
    cluster: ClusterScheduler,
    fanout: NotificationFanout,
    cycle: Mutex<CycleState>,
}

impl MonitorService {
    pub fn builder() -> MonitorServiceBuilder {
        MonitorServiceBuilder::default()
    }

    /// Run one evaluation cycle at the current time.
    pub async fn update(&self) -> Result<CycleReport, MonitorError> {
        self.update_at(Utc::now()).await
    }

    /// Run one evaluation cycle as of `now`.
    ///
    /// Concurrent calls are serialized. Store and plugin errors abort the
    /// cycle and are returned; the cluster lock is released either way.
    pub async fn update_at(&self, now: DateTime<Utc>) -> Result<CycleReport, MonitorError> {
        let mut state = self.cycle.lock().await;
        let CycleState { local, emitter } = &mut *state;

        let Some(identity) = self.identity.find_identity().await? else {
            debug!("Node identity not yet available, skipping monitor cycle");
            return Ok(CycleReport::default());
        };

        let monitors = self
            .cache
            .get_active_monitors(&identity.node_group_id, &identity.external_id)
            .await?;

        let mut report = CycleReport {
            local_events: local
                .run(&monitors, &self.dispatcher, emitter, &identity, now)
                .await?,
            ..CycleReport::default()
        };

        let Some(guard) = ClusterLockGuard::try_acquire(
            self.lock.clone(),
            self.settings.lock_name.as_str(),
            now,
        )
        .await?
        else {
            return Ok(report);
        };
        report.lock_acquired = true;

        let result = self
            .run_clustered(&monitors, emitter, &identity, now, &mut report)
            .await;
        let released = guard.release().await;
        result.and(released)?;

        if report.local_events + report.cluster_events + report.deliveries > 0 {
            info!(
                "Monitor cycle: {} local event(s), {} cluster event(s), {} notification(s) delivered",
                report.local_events, report.cluster_events, report.deliveries
            );
        }
        Ok(report)
    }

    async fn run_clustered(
        &self,
        monitors: &[Monitor],
        emitter: &mut EventEmitter,
        identity: &NodeIdentity,
        now: DateTime<Utc>,
        report: &mut CycleReport,
    ) -> Result<(), MonitorError> {
        let last_lock_time = self
            .lock
            .lock_info(&self.settings.lock_name)
            .await?
            .and_then(|info| info.last_lock_time);

        report.cluster_events = self
            .cluster
            .run(last_lock_time, monitors, &self.dispatcher, emitter, identity, now)
            .await?;

        let notifications = self
            .cache
            .get_active_notifications(&identity.node_group_id, &identity.external_id)
            .await?;
        report.deliveries = self.fanout.run(&notifications).await?;
        Ok(())
    }

    pub async fn get_monitors(&self) -> Result<Vec<Monitor>, MonitorError> {
        self.store.get_monitors().await
    }

    /// Insert or replace a monitor; the next cycle sees the change.
    pub async fn save_monitor(&self, monitor: &Monitor) -> Result<(), MonitorError> {
        self.store.save_monitor(monitor).await?;
        self.cache.flush_monitors();
        Ok(())
    }

    pub async fn delete_monitor(&self, monitor_id: &str) -> Result<(), MonitorError> {
        self.store.delete_monitor(monitor_id).await?;
        self.cache.flush_monitors();
        Ok(())
    }

    pub async fn get_notifications(&self) -> Result<Vec<Notification>, MonitorError> {
        self.store.get_notifications().await
    }

    /// Insert or replace a notification; the next cycle sees the change.
    pub async fn save_notification(&self, notification: &Notification) -> Result<(), MonitorError> {
        self.store.save_notification(notification).await?;
        self.cache.flush_notifications();
        Ok(())
    }

    pub async fn delete_notification(&self, notification_id: &str) -> Result<(), MonitorError> {
        self.store.delete_notification(notification_id).await?;
        self.cache.flush_notifications();
        Ok(())
    }

    pub async fn get_monitor_events(&self) -> Result<Vec<MonitorEvent>, MonitorError> {
        self.store.get_monitor_events().await
    }

    pub async fn get_monitor_events_filtered(
        &self,
        filter: &EventFilter,
    ) -> Result<Vec<MonitorEvent>, MonitorError> {
        self.store.get_monitor_events_filtered(filter).await
    }

    /// Events matching the configured default filter.
    pub async fn recent_events(&self) -> Result<Vec<MonitorEvent>, MonitorError> {
        self.store
            .get_monitor_events_filtered(&self.settings.event_filter)
            .await
    }

    pub async fn save_monitor_event(&self, event: &MonitorEvent) -> Result<(), MonitorError> {
        self.store.save_monitor_event(event).await
    }

    pub async fn delete_monitor_event(&self, key: &EventKey) -> Result<(), MonitorError> {
        self.store.delete_monitor_event(key).await
    }

    pub fn flush_monitor_cache(&self) {
        self.cache.flush_monitors();
    }

    pub fn flush_notification_cache(&self) {
        self.cache.flush_notifications();
    }

    pub fn settings(&self) -> &MonitorSettings {
        &self.settings
    }
}

/// Builder for [`MonitorService`].
///
/// A store and an identity provider are required. Without an explicit lock
/// the service uses a [`LocalClusterLock`], which only excludes within this
/// process.
#[derive(Default)]
pub struct MonitorServiceBuilder {
    store: Option<Arc<dyn MonitorStore>>,
    lock: Option<Arc<dyn ClusterLock>>,
    identity: Option<Arc<dyn IdentityProvider>>,
    monitor_types: Option<Arc<MonitorTypeRegistry>>,
    notification_types: Option<Arc<NotificationTypeRegistry>>,
    host_name: Option<String>,
    settings: Option<MonitorSettings>,
}

impl MonitorServiceBuilder {
    pub fn store(mut self, store: Arc<dyn MonitorStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn lock(mut self, lock: Arc<dyn ClusterLock>) -> Self {
        self.lock = Some(lock);
        self
    }

    pub fn identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn monitor_types(mut self, registry: Arc<MonitorTypeRegistry>) -> Self {
        self.monitor_types = Some(registry);
        self
    }

    pub fn notification_types(mut self, registry: Arc<NotificationTypeRegistry>) -> Self {
        self.notification_types = Some(registry);
        self
    }

    /// Host name stamped on recorded events.
    pub fn host_name(mut self, host_name: impl Into<String>) -> Self {
        self.host_name = Some(host_name.into());
        self
    }

    pub fn settings(mut self, settings: MonitorSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn build(self) -> Result<MonitorService, MonitorError> {
        let store = self
            .store
            .ok_or_else(|| MonitorError::InvalidConfig("a monitor store is required".into()))?;
        let identity = self.identity.ok_or_else(|| {
            MonitorError::InvalidConfig("an identity provider is required".into())
        })?;
        let host_name = self.host_name.unwrap_or_else(|| "localhost".to_string());
        let lock = self
            .lock
            .unwrap_or_else(|| Arc::new(LocalClusterLock::new(host_name.clone())));
        let monitor_types = self.monitor_types.unwrap_or_default();
        let notification_types = self.notification_types.unwrap_or_default();
        let settings = self.settings.unwrap_or_default();

        let cache = DefinitionCache::new(
            store.clone(),
            settings.monitor_cache_ttl,
            settings.notification_cache_ttl,
        );

        Ok(MonitorService {
            dispatcher: CheckDispatcher::new(monitor_types),
            fanout: NotificationFanout::new(notification_types, store.clone()),
            cycle: Mutex::new(CycleState {
                local: LocalScheduler::new(),
                emitter: EventEmitter::new(store.clone(), host_name),
            }),
            cluster: ClusterScheduler::new(),
            cache,
            store,
            lock,
            identity,
            settings,
        })
    }
}
