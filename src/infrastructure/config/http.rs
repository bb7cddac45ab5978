//! Rate source and notifier endpoint configuration.

use serde::Deserialize;

/// Timeouts shared by outbound HTTP clients.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connection timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

/// Market-data provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the chart API.
    #[serde(default = "default_source_url")]
    pub api_url: String,
    /// Provider symbol override. Derived from the pair when unset.
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_source_url() -> String {
    "https://query1.finance.yahoo.com".into()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_url: default_source_url(),
            symbol: None,
            http: HttpConfig::default(),
        }
    }
}

/// Push-notification endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifierConfig {
    /// Notify API endpoint.
    #[serde(default = "default_notifier_url")]
    pub api_url: String,
    /// Bearer token. Loaded from `LINE_NOTIFY_TOKEN`, never from the file.
    #[serde(skip)]
    pub token: Option<String>,
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_notifier_url() -> String {
    "https://notify-api.line.me/api/notify".into()
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            api_url: default_notifier_url(),
            token: None,
            http: HttpConfig::default(),
        }
    }
}
