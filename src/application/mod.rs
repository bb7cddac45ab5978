//! Application services (use cases).
//!
//! - [`cycle`] - The per-invocation orchestrator and its outcomes
//! - [`state`] - Fail-open load and reported save of the notification record

pub mod cycle;
pub mod state;
