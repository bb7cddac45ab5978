//! Notification throttling.
//!
//! The whole alerting policy reduces to one predicate:
//!
//! ```text
//! notify  <=>  rate >= threshold  AND  now - last_notified >= cooldown
//! ```
//!
//! Both comparisons are inclusive. [`ThrottlePolicy::evaluate`] additionally
//! reports *why* a notification is withheld.

use chrono::{DateTime, TimeDelta, Utc};

use super::error::DomainError;
use super::rate::Rate;

/// Longest accepted cooldown: 100 years of minutes.
pub const MAX_COOLDOWN_MINUTES: u64 = 100 * 365 * 24 * 60;

/// Pure form of the throttling predicate.
#[must_use]
pub fn should_notify(
    rate: Rate,
    threshold: f64,
    cooldown: TimeDelta,
    now: DateTime<Utc>,
    last_notified: DateTime<Utc>,
) -> bool {
    rate.value() >= threshold && now - last_notified >= cooldown
}

/// Outcome of evaluating one rate snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The rate has not reached the threshold.
    BelowThreshold,
    /// The threshold is met but the last notification is too recent.
    CoolingDown {
        /// Time left until the cooldown expires.
        remaining: TimeDelta,
    },
    /// Send a notification now.
    Notify,
}

impl Decision {
    #[must_use]
    pub const fn should_notify(&self) -> bool {
        matches!(self, Self::Notify)
    }
}

/// Threshold and cooldown for one run. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrottlePolicy {
    threshold: f64,
    cooldown: TimeDelta,
}

impl ThrottlePolicy {
    /// Build a policy from a threshold and a cooldown in minutes.
    ///
    /// # Errors
    ///
    /// Returns an error if the threshold is not finite or the cooldown
    /// exceeds [`MAX_COOLDOWN_MINUTES`].
    pub fn try_new(threshold: f64, cooldown_minutes: u64) -> Result<Self, DomainError> {
        if !threshold.is_finite() {
            return Err(DomainError::NonFiniteThreshold { value: threshold });
        }
        let cooldown = Some(cooldown_minutes)
            .filter(|minutes| *minutes <= MAX_COOLDOWN_MINUTES)
            .and_then(|minutes| i64::try_from(minutes).ok())
            .and_then(TimeDelta::try_minutes)
            .ok_or(DomainError::CooldownOutOfRange {
                minutes: cooldown_minutes,
            })?;
        Ok(Self {
            threshold,
            cooldown,
        })
    }

    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    #[must_use]
    pub const fn cooldown(&self) -> TimeDelta {
        self.cooldown
    }

    /// Evaluate a single rate snapshot against a single `now`.
    #[must_use]
    pub fn evaluate(&self, rate: Rate, now: DateTime<Utc>, last_notified: DateTime<Utc>) -> Decision {
        if rate.value() < self.threshold {
            return Decision::BelowThreshold;
        }
        let elapsed = now - last_notified;
        if elapsed < self.cooldown {
            return Decision::CoolingDown {
                remaining: self
                    .cooldown
                    .checked_sub(&elapsed)
                    .unwrap_or(TimeDelta::MAX),
            };
        }
        Decision::Notify
    }
}
