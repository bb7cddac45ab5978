//! Outbound adapters (driven side).

pub mod notifier;
pub mod state;
pub mod yahoo;
