//! Alert threshold configuration.

use serde::Deserialize;

use crate::domain::CurrencyPair;

/// What to watch and when to alert.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertConfig {
    /// Currency pair, written as `"USD/JPY"`.
    #[serde(default)]
    pub pair: CurrencyPair,
    /// Alert when the rate is at or above this value (env: `TARGET_RATE`).
    #[serde(default = "default_target_rate")]
    pub target_rate: f64,
    /// Minimum minutes between alerts (env: `NOTIFICATION_INTERVAL`).
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,
}

const fn default_target_rate() -> f64 {
    110.0
}

const fn default_interval_minutes() -> u64 {
    60
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            pair: CurrencyPair::default(),
            target_rate: default_target_rate(),
            interval_minutes: default_interval_minutes(),
        }
    }
}
