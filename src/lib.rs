//! fxwatch - Exchange-rate threshold alerts for scheduled jobs.
//!
//! Each invocation runs one cycle: fetch the current rate, decide whether a
//! notification is due, deliver it, and record the delivery time only after
//! the channel acknowledged it.
//!
//! # Architecture
//!
//! - **`domain`** - Pure types and the throttle decision
//!   - `ThrottlePolicy` - `rate >= threshold && now - last >= cooldown`
//!   - `NotificationRecord` - Single persisted record with a "never" sentinel
//!
//! - **`port`** - Outbound traits: `RateSource`, `Notifier`, `StateStore`,
//!   `CycleObserver`
//! - **`adapter`** - Yahoo Finance rates, LINE Notify, JSON file state
//! - **`application`** - The cycle orchestrator and fail-open state loading
//!
//! # Modules
//!
//! - [`infrastructure`] - Configuration loading and the composition root
//! - [`cli`] - Command-line entry points
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use fxwatch::infrastructure::bootstrap::build_orchestrator;
//! use fxwatch::infrastructure::config::settings::Config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let orchestrator = build_orchestrator(&config, true)?;
//! let outcome = orchestrator.run_cycle().await;
//! println!("notified: {}", outcome.notified());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
