//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │       Application       │
//!                    │   (cycle orchestrator)  │
//!                    └────────────┬────────────┘
//!          ┌──────────────┬───────┴──────┬──────────────┐
//!          ▼              ▼              ▼              ▼
//!   ┌────────────┐ ┌────────────┐ ┌────────────┐ ┌────────────┐
//!   │ RateSource │ │  Notifier  │ │ StateStore │ │  Observer  │
//!   └────────────┘ └────────────┘ └────────────┘ └────────────┘
//! ```

pub mod outbound;

pub use outbound::notifier::Notifier;
pub use outbound::observer::{CycleEvent, CycleObserver, NullObserver, TracingObserver};
pub use outbound::rate_source::RateSource;
pub use outbound::store::StateStore;
