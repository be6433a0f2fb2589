//! Shared doubles for engine tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use vigil_protocols::{
    EventFilter, EventKey, Monitor, MonitorError, MonitorEvent, MonitorStore, MonitorType,
    Notification, NotificationType,
};

use crate::memory_store::MemoryMonitorStore;

/// Check returning queued values, then repeating the last one.
pub struct ScriptedCheck {
    name: String,
    clustered: bool,
    values: Mutex<VecDeque<i64>>,
    last: Mutex<i64>,
    fail: AtomicBool,
    pub calls: AtomicUsize,
}

impl ScriptedCheck {
    pub fn new(name: &str, clustered: bool, values: &[i64]) -> Self {
        Self {
            name: name.to_string(),
            clustered,
            values: Mutex::new(values.iter().copied().collect()),
            last: Mutex::new(values.last().copied().unwrap_or(0)),
            fail: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(name: &str, clustered: bool) -> Self {
        let check = Self::new(name, clustered, &[]);
        check.fail.store(true, Ordering::SeqCst);
        check
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MonitorType for ScriptedCheck {
    fn name(&self) -> &str {
        &self.name
    }

    fn requires_cluster_lock(&self) -> bool {
        self.clustered
    }

    async fn check(&self, monitor: &Monitor) -> Result<i64, MonitorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(MonitorError::check(&monitor.monitor_id, "scripted failure"));
        }
        let next = self.values.lock().pop_front();
        let mut last = self.last.lock();
        if let Some(value) = next {
            *last = value;
        }
        Ok(*last)
    }
}

/// Notification recording every delivered batch.
pub struct RecordingNotification {
    name: String,
    fail: bool,
    pub deliveries: Mutex<Vec<(String, Vec<i32>)>>,
}

impl RecordingNotification {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fail: false,
            deliveries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(name: &str) -> Self {
        Self {
            fail: true,
            ..Self::new(name)
        }
    }

    /// Severities delivered to `notification_id`, per batch.
    pub fn delivered_to(&self, notification_id: &str) -> Vec<Vec<i32>> {
        self.deliveries
            .lock()
            .iter()
            .filter(|(id, _)| id == notification_id)
            .map(|(_, severities)| severities.clone())
            .collect()
    }
}

#[async_trait]
impl NotificationType for RecordingNotification {
    fn name(&self) -> &str {
        &self.name
    }

    async fn notify(
        &self,
        notification: &Notification,
        events: &[MonitorEvent],
    ) -> Result<(), MonitorError> {
        if self.fail {
            return Err(MonitorError::delivery(
                &notification.notification_id,
                "scripted failure",
            ));
        }
        let mut severities: Vec<i32> = events.iter().map(|e| e.severity_level).collect();
        severities.sort();
        self.deliveries
            .lock()
            .push((notification.notification_id.clone(), severities));
        Ok(())
    }
}

/// Store counting scoped definition reads, optionally failing them.
pub struct CountingStore {
    pub inner: MemoryMonitorStore,
    pub monitor_reads: AtomicUsize,
    pub notification_reads: AtomicUsize,
    pub fail_reads: AtomicBool,
    pub fail_event_writes: AtomicBool,
}

impl CountingStore {
    pub fn new(inner: MemoryMonitorStore) -> Self {
        Self {
            inner,
            monitor_reads: AtomicUsize::new(0),
            notification_reads: AtomicUsize::new(0),
            fail_reads: AtomicBool::new(false),
            fail_event_writes: AtomicBool::new(false),
        }
    }

    pub fn monitor_reads(&self) -> usize {
        self.monitor_reads.load(Ordering::SeqCst)
    }

    pub fn notification_reads(&self) -> usize {
        self.notification_reads.load(Ordering::SeqCst)
    }

    fn check_read(&self) -> Result<(), MonitorError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(MonitorError::Store("read failed".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl MonitorStore for CountingStore {
    async fn get_monitors(&self) -> Result<Vec<Monitor>, MonitorError> {
        self.inner.get_monitors().await
    }

    async fn get_active_monitors_for_node(
        &self,
        node_group_id: &str,
        external_id: &str,
    ) -> Result<Vec<Monitor>, MonitorError> {
        self.monitor_reads.fetch_add(1, Ordering::SeqCst);
        self.check_read()?;
        self.inner
            .get_active_monitors_for_node(node_group_id, external_id)
            .await
    }

    async fn save_monitor(&self, monitor: &Monitor) -> Result<(), MonitorError> {
        self.inner.save_monitor(monitor).await
    }

    async fn delete_monitor(&self, monitor_id: &str) -> Result<(), MonitorError> {
        self.inner.delete_monitor(monitor_id).await
    }

    async fn get_notifications(&self) -> Result<Vec<Notification>, MonitorError> {
        self.inner.get_notifications().await
    }

    async fn get_active_notifications_for_node(
        &self,
        node_group_id: &str,
        external_id: &str,
    ) -> Result<Vec<Notification>, MonitorError> {
        self.notification_reads.fetch_add(1, Ordering::SeqCst);
        self.check_read()?;
        self.inner
            .get_active_notifications_for_node(node_group_id, external_id)
            .await
    }

    async fn save_notification(&self, notification: &Notification) -> Result<(), MonitorError> {
        self.inner.save_notification(notification).await
    }

    async fn delete_notification(&self, notification_id: &str) -> Result<(), MonitorError> {
        self.inner.delete_notification(notification_id).await
    }

    async fn get_monitor_events(&self) -> Result<Vec<MonitorEvent>, MonitorError> {
        self.inner.get_monitor_events().await
    }

    async fn get_monitor_events_filtered(
        &self,
        filter: &EventFilter,
    ) -> Result<Vec<MonitorEvent>, MonitorError> {
        self.inner.get_monitor_events_filtered(filter).await
    }

    async fn get_monitor_events_for_notification(
        &self,
        severity_level: i32,
    ) -> Result<Vec<MonitorEvent>, MonitorError> {
        self.inner
            .get_monitor_events_for_notification(severity_level)
            .await
    }

    async fn save_monitor_event(&self, event: &MonitorEvent) -> Result<(), MonitorError> {
        if self.fail_event_writes.load(Ordering::SeqCst) {
            return Err(MonitorError::Store("write failed".to_string()));
        }
        self.inner.save_monitor_event(event).await
    }

    async fn delete_monitor_event(&self, key: &EventKey) -> Result<(), MonitorError> {
        self.inner.delete_monitor_event(key).await
    }

    async fn mark_monitor_event_notified(&self, key: &EventKey) -> Result<(), MonitorError> {
        self.inner.mark_monitor_event_notified(key).await
    }
}
