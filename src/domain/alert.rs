//! Alert message text.

use std::fmt;

use super::rate::{CurrencyPair, Rate};

/// Human-readable alert sent when the threshold is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage(String);

impl AlertMessage {
    /// Compose the alert for `pair` crossing `threshold` at `rate`.
    ///
    /// The leading newline separates the text from the sender name that
    /// push services prepend.
    #[must_use]
    pub fn threshold_reached(pair: &CurrencyPair, threshold: f64, rate: Rate) -> Self {
        Self(format!(
            "\n{pair} has reached the target rate of {threshold:.2} {quote}.\nCurrent rate: {rate:.2} {quote}",
            quote = pair.quote(),
            rate = rate.value(),
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlertMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
