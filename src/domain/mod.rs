//! Exchange-agnostic domain types.
//!
//! - [`rate`] - Validated rates and currency pairs
//! - [`record`] - The persisted last-notification record and its sentinel
//! - [`throttle`] - The notification throttling policy
//! - [`alert`] - Alert message composition
//! - [`error`] - Domain validation errors

pub mod alert;
pub mod error;
pub mod rate;
pub mod record;
pub mod throttle;

pub use alert::AlertMessage;
pub use error::DomainError;
pub use rate::{CurrencyPair, Rate};
pub use record::NotificationRecord;
pub use throttle::{Decision, ThrottlePolicy};
