//! Notification state service.
//!
//! Wraps a [`StateStore`] with the load/save contract the cycle relies on:
//! loading never fails (missing, corrupt or unreadable records fall back to
//! the "never notified" sentinel) and saving reports errors without
//! propagating them as fatal.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::record::never;
use crate::domain::NotificationRecord;
use crate::error::StoreError;
use crate::port::{CycleEvent, CycleObserver, StateStore};

/// Load and save access to the last-notification timestamp.
pub struct NotificationState {
    store: Arc<dyn StateStore>,
    observer: Arc<dyn CycleObserver>,
}

impl NotificationState {
    pub fn new(store: Arc<dyn StateStore>, observer: Arc<dyn CycleObserver>) -> Self {
        Self { store, observer }
    }

    /// Return the last notification time, or the sentinel.
    ///
    /// A missing or corrupt record is replaced immediately by a fresh
    /// sentinel record so later loads are well-formed. An unreadable record
    /// is left alone.
    pub async fn load(&self) -> DateTime<Utc> {
        match self.store.read().await {
            Ok(Some(record)) => record.last_notification(),
            Ok(None) => {
                self.observer.observe(&CycleEvent::StateMissing);
                self.repair().await;
                never()
            }
            Err(StoreError::Corrupt(reason)) => {
                self.observer.observe(&CycleEvent::StateCorrupt { reason });
                self.repair().await;
                never()
            }
            Err(e) => {
                self.observer.observe(&CycleEvent::StateUnreadable {
                    reason: e.to_string(),
                });
                never()
            }
        }
    }

    /// Persist `at` as the last notification time.
    pub async fn save(&self, at: DateTime<Utc>) -> Result<(), StoreError> {
        match self.store.write(&NotificationRecord::notified_at(at)).await {
            Ok(()) => {
                self.observer.observe(&CycleEvent::StatePersisted { at });
                Ok(())
            }
            Err(e) => {
                self.observer.observe(&CycleEvent::StateSaveFailed {
                    at,
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    async fn repair(&self) {
        match self.store.write(&NotificationRecord::never()).await {
            Ok(()) => self.observer.observe(&CycleEvent::StateRepaired),
            Err(e) => self.observer.observe(&CycleEvent::StateRepairFailed {
                reason: e.to_string(),
            }),
        }
    }
}
