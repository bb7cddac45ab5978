//! Implementations of ports (hexagonal adapters).
//!
//! - [`outbound::yahoo`] - Yahoo Finance rate source
//! - [`outbound::notifier`] - LINE Notify and dry-run notifiers
//! - [`outbound::state`] - JSON file and in-memory stores, and the cycle lock

pub mod outbound;
