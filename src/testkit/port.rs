//! Fakes for the outbound ports.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{AlertMessage, NotificationRecord, Rate};
use crate::error::{DeliveryError, FetchError, StoreError};
use crate::port::{CycleEvent, CycleObserver, Notifier, RateSource, StateStore};

/// Rate source that always returns the same answer.
pub struct StaticRateSource {
    rate: Option<f64>,
}

impl StaticRateSource {
    /// Always return `value`.
    pub fn rate(value: f64) -> Self {
        Self { rate: Some(value) }
    }

    /// Always report that no price is available.
    pub fn unavailable() -> Self {
        Self { rate: None }
    }
}

#[async_trait]
impl RateSource for StaticRateSource {
    async fn fetch(&self) -> Result<Rate, FetchError> {
        match self.rate {
            Some(value) => Ok(Rate::try_new(value)?),
            None => Err(FetchError::NoPrice {
                symbol: "USDJPY=X".into(),
            }),
        }
    }
}

/// Notifier that follows a script of delivery results.
///
/// Results are consumed in order; once the script runs out every further
/// call uses the fallback.
pub struct ScriptedNotifier {
    script: Mutex<VecDeque<bool>>,
    fallback: bool,
    messages: Mutex<Vec<String>>,
}

impl ScriptedNotifier {
    /// Every send succeeds.
    pub fn delivering() -> Self {
        Self::with_script(Vec::new(), true)
    }

    /// Every send fails.
    pub fn failing() -> Self {
        Self::with_script(Vec::new(), false)
    }

    /// Follow `script`, then `fallback`.
    pub fn with_script(script: Vec<bool>, fallback: bool) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Number of send attempts so far.
    pub fn attempts(&self) -> usize {
        self.messages.lock().len()
    }

    /// Text of every attempted message.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

#[async_trait]
impl Notifier for ScriptedNotifier {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn send(&self, message: &AlertMessage) -> Result<(), DeliveryError> {
        self.messages.lock().push(message.as_str().to_string());
        let deliver = self.script.lock().pop_front().unwrap_or(self.fallback);
        if deliver {
            Ok(())
        } else {
            Err(DeliveryError::Rejected {
                status: 500,
                body: "scripted failure".into(),
            })
        }
    }
}

#[derive(Default)]
struct SpyState {
    record: Option<NotificationRecord>,
    corrupt: Option<String>,
    fail_writes: bool,
    reads: usize,
    writes: usize,
}

/// In-memory store that counts calls and can simulate failures.
#[derive(Default)]
pub struct SpyStore {
    state: Mutex<SpyState>,
}

impl SpyStore {
    /// A store with no record.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A store holding `record`.
    pub fn with(record: NotificationRecord) -> Self {
        let store = Self::default();
        store.state.lock().record = Some(record);
        store
    }

    /// A store whose record fails to decode until overwritten.
    pub fn corrupt(reason: &str) -> Self {
        let store = Self::default();
        store.state.lock().corrupt = Some(reason.to_string());
        store
    }

    /// Make every write fail with an I/O error.
    #[must_use]
    pub fn failing_writes(self) -> Self {
        self.state.lock().fail_writes = true;
        self
    }

    /// The record currently held, if any.
    pub fn current(&self) -> Option<NotificationRecord> {
        self.state.lock().record
    }

    /// Number of read calls.
    pub fn reads(&self) -> usize {
        self.state.lock().reads
    }

    /// Number of write calls, including failed ones.
    pub fn writes(&self) -> usize {
        self.state.lock().writes
    }
}

#[async_trait]
impl StateStore for SpyStore {
    async fn read(&self) -> Result<Option<NotificationRecord>, StoreError> {
        let mut state = self.state.lock();
        state.reads += 1;
        if let Some(reason) = &state.corrupt {
            return Err(StoreError::Corrupt(reason.clone()));
        }
        Ok(state.record)
    }

    async fn write(&self, record: &NotificationRecord) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        state.writes += 1;
        if state.fail_writes {
            return Err(StoreError::Io(std::io::Error::other("disk full")));
        }
        state.record = Some(*record);
        state.corrupt = None;
        Ok(())
    }
}

/// Observer that records every event.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<CycleEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<CycleEvent> {
        self.events.lock().clone()
    }

    pub fn contains(&self, event: &CycleEvent) -> bool {
        self.events.lock().contains(event)
    }
}

impl CycleObserver for RecordingObserver {
    fn observe(&self, event: &CycleEvent) {
        self.events.lock().push(event.clone());
    }
}
