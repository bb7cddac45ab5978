//! One alerting cycle.
//!
//! A cycle runs strictly in sequence:
//!
//! ```text
//! fetch rate ─┬─ unavailable ──────────────────────────────▶ Skipped
//!             └─ load state ─▶ evaluate ─┬─ withheld ───────▶ NoAction
//!                                        └─ send ─┬─ failed ▶ NoAction
//!                                                 └─ ok ────▶ Notified (save)
//! ```
//!
//! The record is written only after the notifier confirmed delivery, and
//! never when the policy withholds the alert.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

use crate::application::state::NotificationState;
use crate::domain::{AlertMessage, CurrencyPair, Decision, Rate, ThrottlePolicy};
use crate::port::{CycleEvent, CycleObserver, Notifier, RateSource, StateStore};

/// Why a cycle that evaluated a rate sent nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum NoAction {
    BelowThreshold { rate: Rate },
    CoolingDown { rate: Rate, remaining: TimeDelta },
    DeliveryFailed { rate: Rate, reason: String },
}

/// Whether the record was saved after a delivered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    Saved,
    Failed { reason: String },
}

/// Terminal state of a cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// No rate was available (or another invocation was running).
    Skipped { reason: String },
    /// A rate was evaluated and nothing was persisted.
    NoAction(NoAction),
    /// A notification was delivered.
    Notified {
        rate: Rate,
        at: DateTime<Utc>,
        persistence: Persistence,
    },
}

impl CycleOutcome {
    /// True when a notification was delivered.
    #[must_use]
    pub const fn notified(&self) -> bool {
        matches!(self, Self::Notified { .. })
    }

    /// True when the cycle ended in a state that an operator should look at.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::NoAction(NoAction::DeliveryFailed { .. })
                | Self::Notified {
                    persistence: Persistence::Failed { .. },
                    ..
                }
        )
    }
}

/// Wires the rate source, policy, notifier and state for one invocation.
pub struct Orchestrator {
    pair: CurrencyPair,
    policy: ThrottlePolicy,
    source: Arc<dyn RateSource>,
    notifier: Arc<dyn Notifier>,
    state: NotificationState,
    observer: Arc<dyn CycleObserver>,
}

impl Orchestrator {
    pub fn new(
        pair: CurrencyPair,
        policy: ThrottlePolicy,
        source: Arc<dyn RateSource>,
        notifier: Arc<dyn Notifier>,
        store: Arc<dyn StateStore>,
        observer: Arc<dyn CycleObserver>,
    ) -> Self {
        Self {
            pair,
            policy,
            source,
            notifier,
            state: NotificationState::new(store, Arc::clone(&observer)),
            observer,
        }
    }

    #[must_use]
    pub const fn policy(&self) -> &ThrottlePolicy {
        &self.policy
    }

    /// Run one cycle against the wall clock.
    pub async fn run_cycle(&self) -> CycleOutcome {
        self.run_cycle_at(Utc::now()).await
    }

    /// Run one cycle with an explicit `now`.
    ///
    /// `now` is the single time snapshot used both for the cooldown check
    /// and as the persisted timestamp.
    pub async fn run_cycle_at(&self, now: DateTime<Utc>) -> CycleOutcome {
        let rate = match self.source.fetch().await {
            Ok(rate) => rate,
            Err(e) => {
                let reason = e.to_string();
                self.observer.observe(&CycleEvent::RateUnavailable {
                    reason: reason.clone(),
                });
                return CycleOutcome::Skipped { reason };
            }
        };
        self.observer.observe(&CycleEvent::RateFetched { rate });

        let last_notified = self.state.load().await;
        let decision = self.policy.evaluate(rate, now, last_notified);
        self.observer.observe(&CycleEvent::Evaluated {
            rate,
            threshold: self.policy.threshold(),
            last_notified,
            decision,
        });

        match decision {
            Decision::BelowThreshold => CycleOutcome::NoAction(NoAction::BelowThreshold { rate }),
            Decision::CoolingDown { remaining } => {
                CycleOutcome::NoAction(NoAction::CoolingDown { rate, remaining })
            }
            Decision::Notify => self.notify(rate, now).await,
        }
    }

    async fn notify(&self, rate: Rate, now: DateTime<Utc>) -> CycleOutcome {
        let message = AlertMessage::threshold_reached(&self.pair, self.policy.threshold(), rate);
        let notifier = self.notifier.name();

        if let Err(e) = self.notifier.send(&message).await {
            let reason = e.to_string();
            self.observer.observe(&CycleEvent::NotificationFailed {
                notifier,
                reason: reason.clone(),
            });
            return CycleOutcome::NoAction(NoAction::DeliveryFailed { rate, reason });
        }
        self.observer
            .observe(&CycleEvent::NotificationDelivered { notifier });

        let persistence = match self.state.save(now).await {
            Ok(()) => Persistence::Saved,
            Err(e) => Persistence::Failed {
                reason: e.to_string(),
            },
        };

        CycleOutcome::Notified {
            rate,
            at: now,
            persistence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::never;
    use crate::domain::NotificationRecord;
    use crate::testkit::config;
    use crate::testkit::port::{RecordingObserver, ScriptedNotifier, SpyStore, StaticRateSource};
    use chrono::Duration;

    struct Harness {
        notifier: Arc<ScriptedNotifier>,
        store: Arc<SpyStore>,
        observer: Arc<RecordingObserver>,
        orchestrator: Orchestrator,
    }

    fn harness(source: StaticRateSource, notifier: ScriptedNotifier, store: SpyStore) -> Harness {
        let notifier = Arc::new(notifier);
        let store = Arc::new(store);
        let observer = Arc::new(RecordingObserver::new());
        let orchestrator = config::orchestrator(
            Arc::new(source),
            notifier.clone(),
            store.clone(),
            observer.clone(),
        );
        Harness {
            notifier,
            store,
            observer,
            orchestrator,
        }
    }

    #[tokio::test]
    async fn unavailable_rate_skips_without_touching_state() {
        let h = harness(
            StaticRateSource::unavailable(),
            ScriptedNotifier::delivering(),
            SpyStore::empty(),
        );

        let outcome = h.orchestrator.run_cycle().await;

        assert!(matches!(outcome, CycleOutcome::Skipped { .. }));
        assert_eq!(h.notifier.attempts(), 0);
        assert_eq!(h.store.reads(), 0);
        assert_eq!(h.store.writes(), 0);
    }

    #[tokio::test]
    async fn first_run_notifies_and_persists_now() {
        let h = harness(
            StaticRateSource::rate(112.5),
            ScriptedNotifier::delivering(),
            SpyStore::empty(),
        );
        let now = Utc::now();

        let outcome = h.orchestrator.run_cycle_at(now).await;

        assert!(outcome.notified());
        assert_eq!(h.store.current(), Some(NotificationRecord::notified_at(now)));
        let message = h.notifier.messages().pop().unwrap();
        assert!(message.contains("110.00"));
        assert!(message.contains("112.50"));
    }

    #[tokio::test]
    async fn delivery_failure_never_saves() {
        let last = Utc::now() - Duration::hours(2);
        let h = harness(
            StaticRateSource::rate(112.5),
            ScriptedNotifier::failing(),
            SpyStore::with(NotificationRecord::notified_at(last)),
        );

        let outcome = h.orchestrator.run_cycle().await;

        assert!(matches!(
            outcome,
            CycleOutcome::NoAction(NoAction::DeliveryFailed { .. })
        ));
        assert!(outcome.is_failure());
        assert_eq!(h.notifier.attempts(), 1);
        assert_eq!(h.store.writes(), 0);
        assert_eq!(h.store.current().unwrap().last_notification(), last);
    }

    #[tokio::test]
    async fn save_failure_is_reported_after_delivery() {
        let h = harness(
            StaticRateSource::rate(112.5),
            ScriptedNotifier::delivering(),
            SpyStore::with(NotificationRecord::never()).failing_writes(),
        );

        let outcome = h.orchestrator.run_cycle().await;

        assert!(matches!(
            outcome,
            CycleOutcome::Notified {
                persistence: Persistence::Failed { .. },
                ..
            }
        ));
        assert!(outcome.is_failure());
        assert_eq!(h.notifier.attempts(), 1);
    }

    #[tokio::test]
    async fn events_follow_cycle_order() {
        let h = harness(
            StaticRateSource::rate(112.5),
            ScriptedNotifier::delivering(),
            SpyStore::with(NotificationRecord::never()),
        );
        let now = Utc::now();

        h.orchestrator.run_cycle_at(now).await;

        let events = h.observer.events();
        let rate = Rate::try_new(112.5).unwrap();
        assert_eq!(
            events,
            vec![
                CycleEvent::RateFetched { rate },
                CycleEvent::Evaluated {
                    rate,
                    threshold: 110.0,
                    last_notified: never(),
                    decision: Decision::Notify,
                },
                CycleEvent::NotificationDelivered {
                    notifier: "scripted"
                },
                CycleEvent::StatePersisted { at: now },
            ]
        );
    }
}
