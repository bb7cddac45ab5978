//! In-process store implementation.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::NotificationRecord;
use crate::error::StoreError;
use crate::port::StateStore;

/// In-memory [`StateStore`] for embedding and tests.
///
/// Holds at most one record and forgets it when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: RwLock<Option<NotificationRecord>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `record`.
    pub fn with_record(record: NotificationRecord) -> Self {
        Self {
            record: RwLock::new(Some(record)),
        }
    }

    /// Snapshot of the stored record.
    pub fn snapshot(&self) -> Option<NotificationRecord> {
        *self.record.read()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn read(&self) -> Result<Option<NotificationRecord>, StoreError> {
        Ok(*self.record.read())
    }

    async fn write(&self, record: &NotificationRecord) -> Result<(), StoreError> {
        *self.record.write() = Some(*record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn empty_store_reads_none() {
        let store = MemoryStore::new();
        assert!(store.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn write_replaces_record() {
        let first = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let store = MemoryStore::with_record(NotificationRecord::notified_at(first));

        store
            .write(&NotificationRecord::notified_at(second))
            .await
            .unwrap();

        let record = store.read().await.unwrap().unwrap();
        assert_eq!(record.last_notification(), second);
        assert_eq!(store.snapshot(), Some(record));
    }
}
