//! Notification plugin protocol.

use async_trait::async_trait;

use crate::error::MonitorError;
use crate::model::{MonitorEvent, Notification};

/// A delivery channel, looked up by [`NotificationType::name`] from a
/// notification's `type`.
#[async_trait]
pub trait NotificationType: Send + Sync {
    /// Registered type name.
    fn name(&self) -> &str;

    /// Deliver `events` according to `notification`.
    ///
    /// Returning an error leaves the events unnotified so they are offered
    /// again on a later cycle.
    async fn notify(
        &self,
        notification: &Notification,
        events: &[MonitorEvent],
    ) -> Result<(), MonitorError>;
}
