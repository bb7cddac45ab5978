//! Persistence port for the notification record.

use async_trait::async_trait;

use crate::domain::NotificationRecord;
use crate::error::StoreError;

/// Storage for the single notification record.
///
/// Kept deliberately small so the backing medium (a JSON file, a database
/// row, a key-value entry) can change without touching decision logic.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Read the record. `Ok(None)` means no record has been written yet.
    ///
    /// A record that exists but cannot be decoded is reported as
    /// [`StoreError::Corrupt`].
    async fn read(&self) -> Result<Option<NotificationRecord>, StoreError>;

    /// Replace the record. Must be all-or-nothing.
    async fn write(&self, record: &NotificationRecord) -> Result<(), StoreError>;
}
