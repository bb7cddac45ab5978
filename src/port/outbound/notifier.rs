//! Notifier port for alert delivery.

use async_trait::async_trait;

use crate::domain::AlertMessage;
use crate::error::DeliveryError;

/// Delivers alert text to an external channel.
///
/// Unlike fire-and-forget event sinks, delivery here is confirmed: `Ok(())`
/// means the transport acknowledged the message with a success status.
/// Implementations make exactly one attempt per call.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short transport name for logs.
    fn name(&self) -> &'static str;

    /// Send a message.
    async fn send(&self, message: &AlertMessage) -> Result<(), DeliveryError>;
}
