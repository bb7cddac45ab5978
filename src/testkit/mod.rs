//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`port`] — In-memory fakes for every outbound port: `StaticRateSource`,
//!   `ScriptedNotifier`, `SpyStore`, `RecordingObserver`.
//! - [`config`] — Canonical test configurations.

pub mod config;
pub mod port;
