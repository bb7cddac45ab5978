//! Domain validation errors.
//!
//! Returned by validating constructors such as [`Rate::try_new`](super::rate::Rate::try_new)
//! and [`ThrottlePolicy::try_new`](super::throttle::ThrottlePolicy::try_new).

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Rates must be finite real numbers.
    #[error("rate must be finite, got {value}")]
    NonFiniteRate {
        /// The rejected value.
        value: f64,
    },

    /// Rates cannot be negative.
    #[error("rate must not be negative, got {value}")]
    NegativeRate {
        /// The rejected value.
        value: f64,
    },

    /// The alert threshold must be a finite real number.
    #[error("threshold must be finite, got {value}")]
    NonFiniteThreshold {
        /// The rejected value.
        value: f64,
    },

    /// The cooldown exceeds the supported maximum.
    #[error("cooldown of {minutes} minutes is out of range")]
    CooldownOutOfRange {
        /// The rejected cooldown, in minutes.
        minutes: u64,
    },

    /// Currency codes are three ASCII letters.
    #[error("invalid currency code '{code}'")]
    InvalidCurrency {
        /// The rejected code.
        code: String,
    },
}
