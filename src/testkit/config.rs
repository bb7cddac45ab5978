//! Canonical test configurations.
//!
//! Single source of truth for the policy and HTTP settings used across
//! tests.

use std::sync::Arc;

use crate::application::cycle::Orchestrator;
use crate::domain::{CurrencyPair, ThrottlePolicy};
use crate::infrastructure::config::http::{HttpConfig, NotifierConfig, SourceConfig};
use crate::port::{CycleObserver, Notifier, RateSource, StateStore};

/// Threshold used by scenario tests.
pub const THRESHOLD: f64 = 110.0;

/// Cooldown in minutes used by scenario tests.
pub const COOLDOWN_MINUTES: u64 = 60;

/// The default USD/JPY policy: 110.00 with a one-hour cooldown.
pub fn policy() -> ThrottlePolicy {
    ThrottlePolicy::try_new(THRESHOLD, COOLDOWN_MINUTES).expect("valid test policy")
}

/// Short timeouts so tests against unresponsive servers finish quickly.
pub fn fast_http() -> HttpConfig {
    HttpConfig {
        timeout_ms: 500,
        connect_timeout_ms: 500,
    }
}

/// Source config pointing at `api_url`.
pub fn source(api_url: &str) -> SourceConfig {
    SourceConfig {
        api_url: api_url.to_string(),
        symbol: None,
        http: fast_http(),
    }
}

/// Notifier config pointing at `api_url`.
pub fn notifier(api_url: &str, token: Option<&str>) -> NotifierConfig {
    NotifierConfig {
        api_url: api_url.to_string(),
        token: token.map(str::to_string),
        http: fast_http(),
    }
}

/// Orchestrator for USD/JPY with the default [`policy`].
pub fn orchestrator(
    source: Arc<dyn RateSource>,
    notifier: Arc<dyn Notifier>,
    store: Arc<dyn StateStore>,
    observer: Arc<dyn CycleObserver>,
) -> Orchestrator {
    Orchestrator::new(
        CurrencyPair::default(),
        policy(),
        source,
        notifier,
        store,
        observer,
    )
}
