//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the rate provider, the notification transport,
//! the record store, and the cycle observer.

pub mod notifier;
pub mod observer;
pub mod rate_source;
pub mod store;
