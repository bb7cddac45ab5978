//! Rate source port.

use async_trait::async_trait;

use crate::domain::Rate;
use crate::error::FetchError;

/// Supplies the current exchange rate for a fixed currency pair.
///
/// Implementations must resolve every failure (network errors, timeouts,
/// missing or malformed prices) to a [`FetchError`] rather than panicking.
/// Callers treat any error as "skip this cycle".
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetch one rate snapshot.
    async fn fetch(&self) -> Result<Rate, FetchError>;
}
