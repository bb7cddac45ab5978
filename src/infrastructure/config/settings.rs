//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Values come from an optional TOML file, then environment variables
//! override them: `TARGET_RATE`, `NOTIFICATION_INTERVAL`,
//! `LINE_NOTIFY_TOKEN` and `FXWATCH_STATE_FILE`. The notify token is only
//! ever read from the environment.
//!
//! # Example
//!
//! ```no_run
//! use fxwatch::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use super::alert::AlertConfig;
use super::http::{HttpConfig, NotifierConfig, SourceConfig};
use super::logging::LoggingConfig;
use super::state::StateConfig;
use crate::domain::{DomainError, ThrottlePolicy};
use crate::error::{ConfigError, Result};

pub const ENV_TARGET_RATE: &str = "TARGET_RATE";
pub const ENV_NOTIFICATION_INTERVAL: &str = "NOTIFICATION_INTERVAL";
pub const ENV_LINE_NOTIFY_TOKEN: &str = "LINE_NOTIFY_TOKEN";
pub const ENV_STATE_FILE: &str = "FXWATCH_STATE_FILE";

/// Main application configuration.
///
/// Built once per invocation and passed explicitly to the components that
/// need it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Threshold, cooldown and currency pair.
    #[serde(default)]
    pub alert: AlertConfig,

    /// Market-data provider.
    #[serde(default)]
    pub source: SourceConfig,

    /// Push-notification endpoint.
    #[serde(default)]
    pub notifier: NotifierConfig,

    /// Notification record location.
    #[serde(default)]
    pub state: StateConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Build configuration from defaults and the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment value is malformed or validation
    /// fails.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(Self::default(), |key| std::env::var(key).ok())
    }

    /// Parse configuration from TOML content, then apply the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed, an environment value is
    /// malformed, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        Self::from_lookup(config, |key| std::env::var(key).ok())
    }

    /// Load configuration from a TOML file, then apply the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or [`Config::parse_toml`]
    /// fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Resolve configuration for the CLI.
    ///
    /// An explicit path must exist. Without one, `fxwatch.toml` in the
    /// working directory is used when present, otherwise defaults.
    #[allow(clippy::result_large_err)]
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Self::from_env()
                }
            }
        }
    }

    /// Apply overrides from `lookup` to `config` and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if an override is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn from_lookup<F>(mut config: Self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_TARGET_RATE) {
            config.alert.target_rate =
                raw.trim()
                    .parse::<f64>()
                    .map_err(|e| ConfigError::InvalidValue {
                        field: ENV_TARGET_RATE,
                        reason: format!("'{raw}' is not a number: {e}"),
                    })?;
        }

        if let Some(raw) = lookup(ENV_NOTIFICATION_INTERVAL) {
            let minutes = raw
                .trim()
                .parse::<i64>()
                .map_err(|e| ConfigError::InvalidValue {
                    field: ENV_NOTIFICATION_INTERVAL,
                    reason: format!("'{raw}' is not an integer: {e}"),
                })?;
            config.alert.interval_minutes =
                u64::try_from(minutes).map_err(|_| ConfigError::InvalidValue {
                    field: ENV_NOTIFICATION_INTERVAL,
                    reason: "must be 0 or greater".to_string(),
                })?;
        }

        config.notifier.token = lookup(ENV_LINE_NOTIFY_TOKEN)
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        if let Some(path) = lookup(ENV_STATE_FILE).filter(|p| !p.trim().is_empty()) {
            config.state.path = PathBuf::from(path.trim());
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        self.policy()?;

        validate_url("source.api_url", &self.source.api_url)?;
        validate_url("notifier.api_url", &self.notifier.api_url)?;
        validate_http("source.http", &self.source.http)?;
        validate_http("notifier.http", &self.notifier.http)?;

        if let Some(symbol) = &self.source.symbol {
            if symbol.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "source.symbol",
                    reason: "must not be empty".to_string(),
                }
                .into());
            }
        }

        if self.state.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "state.path",
            }
            .into());
        }
        if self.state.lock_stale_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "state.lock_stale_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// The throttle policy described by the alert settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the threshold is not finite
    /// or the interval is out of range.
    pub fn policy(&self) -> std::result::Result<ThrottlePolicy, ConfigError> {
        ThrottlePolicy::try_new(self.alert.target_rate, self.alert.interval_minutes).map_err(
            |e| {
                let field = match e {
                    DomainError::CooldownOutOfRange { .. } => "alert.interval_minutes",
                    _ => "alert.target_rate",
                };
                ConfigError::InvalidValue {
                    field,
                    reason: e.to_string(),
                }
            },
        )
    }

    /// Provider symbol to query.
    #[must_use]
    pub fn symbol(&self) -> String {
        self.source
            .symbol
            .clone()
            .unwrap_or_else(|| self.alert.pair.provider_symbol())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "fxwatch.toml";

#[allow(clippy::result_large_err)]
fn validate_url(field: &'static str, raw: &str) -> Result<()> {
    if raw.trim().is_empty() {
        return Err(ConfigError::MissingField { field }.into());
    }
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }
        .into());
    }
    Ok(())
}

#[allow(clippy::result_large_err)]
fn validate_http(field: &'static str, http: &HttpConfig) -> Result<()> {
    if http.timeout_ms == 0 || http.connect_timeout_ms == 0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "timeouts must be greater than 0".to_string(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::from_lookup(Config::default(), lookup(&[])).unwrap();
        assert_eq!(config.alert.target_rate, 110.0);
        assert_eq!(config.alert.interval_minutes, 60);
        assert_eq!(config.symbol(), "USDJPY=X");
        assert_eq!(config.state.path, PathBuf::from("last_notification.json"));
        assert!(config.notifier.token.is_none());
    }

    #[test]
    fn env_overrides_are_applied() {
        let config = Config::from_lookup(
            Config::default(),
            lookup(&[
                ("TARGET_RATE", "150.25"),
                ("NOTIFICATION_INTERVAL", "15"),
                ("LINE_NOTIFY_TOKEN", " secret "),
                ("FXWATCH_STATE_FILE", "/tmp/fx.json"),
            ]),
        )
        .unwrap();
        assert_eq!(config.alert.target_rate, 150.25);
        assert_eq!(config.alert.interval_minutes, 15);
        assert_eq!(config.notifier.token.as_deref(), Some("secret"));
        assert_eq!(config.state.path, PathBuf::from("/tmp/fx.json"));
        assert_eq!(config.state.lock_path(), PathBuf::from("/tmp/fx.json.lock"));
    }

    #[test]
    fn rejects_non_numeric_target_rate() {
        let result = Config::from_lookup(Config::default(), lookup(&[("TARGET_RATE", "abc")]));
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "TARGET_RATE",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_nan_target_rate() {
        let result = Config::from_lookup(Config::default(), lookup(&[("TARGET_RATE", "NaN")]));
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "alert.target_rate",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_negative_interval() {
        let result = Config::from_lookup(
            Config::default(),
            lookup(&[("NOTIFICATION_INTERVAL", "-5")]),
        );
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "NOTIFICATION_INTERVAL",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_interval_beyond_limit() {
        let result = Config::from_lookup(
            Config::default(),
            lookup(&[("NOTIFICATION_INTERVAL", "1000000000000")]),
        );
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "alert.interval_minutes",
                ..
            }))
        ));
    }

    #[test]
    fn blank_token_is_treated_as_missing() {
        let config =
            Config::from_lookup(Config::default(), lookup(&[("LINE_NOTIFY_TOKEN", "  ")])).unwrap();
        assert!(config.notifier.token.is_none());
    }

    #[test]
    fn toml_sections_are_read() {
        let config: Config = toml::from_str(
            r#"
[alert]
pair = "EUR/USD"
target_rate = 1.25
interval_minutes = 30

[source]
symbol = "EURUSD=X"

[source.http]
timeout_ms = 2000

[state]
path = "state/eur.json"

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();
        let config = Config::from_lookup(config, lookup(&[])).unwrap();
        assert_eq!(config.alert.pair.to_string(), "EUR/USD");
        assert_eq!(config.alert.target_rate, 1.25);
        assert_eq!(config.source.http.timeout_ms, 2000);
        assert_eq!(config.source.http.connect_timeout_ms, 5000);
        assert_eq!(config.symbol(), "EURUSD=X");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn env_wins_over_file() {
        let config: Config = toml::from_str("[alert]\ntarget_rate = 120.0\n").unwrap();
        let config = Config::from_lookup(config, lookup(&[("TARGET_RATE", "130")])).unwrap();
        assert_eq!(config.alert.target_rate, 130.0);
    }

    #[test]
    fn rejects_bad_urls() {
        let mut config = Config::default();
        config.notifier.api_url = "ftp://notify.example".into();
        let result = Config::from_lookup(config, lookup(&[]));
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "notifier.api_url",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_zero_timeouts() {
        let mut config = Config::default();
        config.source.http.timeout_ms = 0;
        assert!(Config::from_lookup(config, lookup(&[])).is_err());
    }
}
