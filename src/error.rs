use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Reasons the rate source could not produce a usable rate.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("rate request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate provider returned status {status}")]
    Status { status: u16 },

    #[error("malformed rate payload: {0}")]
    Malformed(String),

    #[error("no price available for {symbol}")]
    NoPrice { symbol: String },

    #[error(transparent)]
    InvalidRate(#[from] DomainError),
}

/// Reasons a notification was not delivered.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("notification request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("notification rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("missing credential: {0}")]
    MissingCredential(&'static str),
}

/// Persistence errors for the notification record.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("state I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt state record: {0}")]
    Corrupt(String),

    #[error("failed to encode state record: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Errors from the invocation lock.
#[derive(Error, Debug)]
pub enum LockError {
    #[error("another invocation holds {path}")]
    Held { path: String },

    #[error("lock I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Lock(#[from] LockError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
