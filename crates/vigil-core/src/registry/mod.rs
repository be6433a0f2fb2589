//! Registries for check and notification plugins.

mod base;
mod monitor_type;
mod notification_type;

pub use base::{BaseRegistry, Registerable};
pub use monitor_type::MonitorTypeRegistry;
pub use notification_type::NotificationTypeRegistry;
