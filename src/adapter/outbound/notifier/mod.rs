//! Notification adapters.
//!
//! Implements the `port::Notifier` trait for the supported transports.

pub mod line;
pub mod log;
