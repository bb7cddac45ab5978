//! Observer port for cycle transitions.
//!
//! The orchestrator reports every step of a cycle as a [`CycleEvent`] to an
//! injected [`CycleObserver`] instead of writing to a global logger.

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::domain::record::format_timestamp;
use crate::domain::{Decision, Rate};

/// Transitions observed during one cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleEvent {
    /// A rate snapshot was obtained.
    RateFetched { rate: Rate },
    /// The rate source failed; the cycle is skipped.
    RateUnavailable { reason: String },
    /// No record existed yet; the sentinel was used.
    StateMissing,
    /// The stored record could not be decoded; the sentinel was used.
    StateCorrupt { reason: String },
    /// The stored record could not be read; the sentinel was used.
    StateUnreadable { reason: String },
    /// A fresh sentinel record was written after a missing or corrupt load.
    StateRepaired,
    /// Writing the fresh sentinel record failed.
    StateRepairFailed { reason: String },
    /// The throttle policy was evaluated.
    Evaluated {
        rate: Rate,
        threshold: f64,
        last_notified: DateTime<Utc>,
        decision: Decision,
    },
    /// The notifier confirmed delivery.
    NotificationDelivered { notifier: &'static str },
    /// The notifier failed; nothing is persisted.
    NotificationFailed {
        notifier: &'static str,
        reason: String,
    },
    /// The new last-notification time was saved.
    StatePersisted { at: DateTime<Utc> },
    /// Saving after a delivered notification failed.
    StateSaveFailed { at: DateTime<Utc>, reason: String },
}

/// Receives cycle events.
pub trait CycleObserver: Send + Sync {
    fn observe(&self, event: &CycleEvent);
}

/// Observer that discards every event.
pub struct NullObserver;

impl CycleObserver for NullObserver {
    fn observe(&self, _event: &CycleEvent) {}
}

/// Observer that writes events via tracing.
pub struct TracingObserver;

impl CycleObserver for TracingObserver {
    fn observe(&self, event: &CycleEvent) {
        match event {
            CycleEvent::RateFetched { rate } => {
                info!(rate = %rate, "Current rate");
            }
            CycleEvent::RateUnavailable { reason } => {
                warn!(reason = %reason, "Rate unavailable, skipping cycle");
            }
            CycleEvent::StateMissing => {
                info!("No notification record yet, starting from sentinel");
            }
            CycleEvent::StateCorrupt { reason } => {
                error!(reason = %reason, "Notification record is corrupt, treating as never notified");
            }
            CycleEvent::StateUnreadable { reason } => {
                error!(reason = %reason, "Notification record unreadable, treating as never notified");
            }
            CycleEvent::StateRepaired => {
                info!("Wrote fresh notification record");
            }
            CycleEvent::StateRepairFailed { reason } => {
                error!(reason = %reason, "Failed to write fresh notification record");
            }
            CycleEvent::Evaluated {
                rate,
                threshold,
                last_notified,
                decision,
            } => {
                let last = format_timestamp(*last_notified);
                match decision {
                    Decision::BelowThreshold => {
                        info!(rate = %rate, threshold, "Rate below threshold, no notification");
                    }
                    Decision::CoolingDown { remaining } => {
                        info!(
                            rate = %rate,
                            threshold,
                            last_notified = %last,
                            remaining_secs = remaining.num_seconds(),
                            "Within notification interval, no notification"
                        );
                    }
                    Decision::Notify => {
                        info!(
                            rate = %rate,
                            threshold,
                            last_notified = %last,
                            "Threshold reached, sending notification"
                        );
                    }
                }
            }
            CycleEvent::NotificationDelivered { notifier } => {
                info!(notifier, "Notification delivered");
            }
            CycleEvent::NotificationFailed { notifier, reason } => {
                error!(notifier, reason = %reason, "Notification failed");
            }
            CycleEvent::StatePersisted { at } => {
                info!(at = %format_timestamp(*at), "Saved last notification time");
            }
            CycleEvent::StateSaveFailed { at, reason } => {
                error!(
                    at = %format_timestamp(*at),
                    reason = %reason,
                    "Failed to save last notification time; a duplicate alert is possible"
                );
            }
        }
    }
}
