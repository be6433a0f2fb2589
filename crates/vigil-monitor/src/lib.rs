//! # Vigil Monitor
//!
//! Periodic health-monitoring and alerting engine.
//!
//! ## Features
//!
//! - Per-monitor run periods for node-local checks
//! - Cluster-gated checks and notification fan-out under a named lock
//! - Sliding-window smoothing of raw check values
//! - Severity-based delivery to pluggable notification types
//! - TTL-bounded caching of monitor and notification definitions

pub mod cache;
pub mod config;
pub mod dispatcher;
pub mod emitter;
pub mod fanout;
pub mod local_lock;
pub mod lock;
pub mod memory_store;
pub mod notification_types;
pub mod scheduler;
pub mod service;
pub mod window;

#[cfg(test)]
mod test_support;

pub use cache::DefinitionCache;
pub use config::MonitorSettings;
pub use dispatcher::CheckDispatcher;
pub use emitter::EventEmitter;
pub use fanout::NotificationFanout;
pub use local_lock::LocalClusterLock;
pub use lock::ClusterLockGuard;
pub use memory_store::MemoryMonitorStore;
pub use notification_types::{LogNotificationType, WebhookNotificationType};
pub use scheduler::{ClusterScheduler, LocalScheduler};
pub use service::{CycleReport, MonitorService, MonitorServiceBuilder};
pub use window::WindowAverager;

pub use vigil_protocols::MonitorError;
