//! # Vigil Protocols
//!
//! Entity types and trait definitions shared by the Vigil monitoring engine
//! and its plugins.
//!
//! ## Contents
//!
//! - Definitions: [`Monitor`], [`Notification`]
//! - Occurrences: [`MonitorEvent`]
//! - Plugin traits: [`MonitorType`], [`NotificationType`]
//! - Collaborators: [`MonitorStore`], [`ClusterLock`], [`IdentityProvider`]

pub mod cluster;
pub mod error;
pub mod model;
pub mod monitor_type;
pub mod notification_type;
pub mod severity;
pub mod store;

pub use cluster::{ClusterLock, IdentityProvider};
pub use error::{ExtensionError, MonitorError};
pub use model::{
    EventFilter, EventKey, LockInfo, Monitor, MonitorEvent, NodeIdentity, Notification, SCOPE_ALL,
};
pub use monitor_type::MonitorType;
pub use notification_type::NotificationType;
pub use store::MonitorStore;
