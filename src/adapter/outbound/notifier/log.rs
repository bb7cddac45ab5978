//! Dry-run transport.

use async_trait::async_trait;
use tracing::info;

use crate::domain::AlertMessage;
use crate::error::DeliveryError;
use crate::port::Notifier;

/// A notifier that logs the alert via tracing and reports it delivered.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, message: &AlertMessage) -> Result<(), DeliveryError> {
        info!(message = %message.as_str().trim(), "Dry run, notification not sent");
        Ok(())
    }
}
