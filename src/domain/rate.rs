//! Exchange-rate value types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// An observed exchange rate: units of quote currency per unit of base.
///
/// Always finite and non-negative. The inner value is private so every
/// rate goes through [`Rate::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Rate(f64);

impl Rate {
    /// Validate and wrap a raw rate.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NonFiniteRate`] for NaN or infinite values and
    /// [`DomainError::NegativeRate`] for values below zero.
    pub fn try_new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::NonFiniteRate { value });
        }
        if value < 0.0 {
            return Err(DomainError::NegativeRate { value });
        }
        Ok(Self(value))
    }

    /// The raw rate value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A base/quote currency pair such as USD/JPY.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyPair {
    base: String,
    quote: String,
}

impl CurrencyPair {
    /// Create a pair from two ISO 4217 codes.
    ///
    /// Codes are upper-cased; anything other than three ASCII letters is
    /// rejected.
    pub fn try_new(base: &str, quote: &str) -> Result<Self, DomainError> {
        Ok(Self {
            base: normalize_code(base)?,
            quote: normalize_code(quote)?,
        })
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    #[must_use]
    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// Symbol used by Yahoo-style quote providers, e.g. `USDJPY=X`.
    #[must_use]
    pub fn provider_symbol(&self) -> String {
        format!("{}{}=X", self.base, self.quote)
    }
}

impl Default for CurrencyPair {
    fn default() -> Self {
        Self {
            base: "USD".into(),
            quote: "JPY".into(),
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl TryFrom<String> for CurrencyPair {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let (base, quote) = s
            .split_once('/')
            .ok_or_else(|| DomainError::InvalidCurrency { code: s.clone() })?;
        Self::try_new(base, quote)
    }
}

impl From<CurrencyPair> for String {
    fn from(pair: CurrencyPair) -> Self {
        pair.to_string()
    }
}

fn normalize_code(code: &str) -> Result<String, DomainError> {
    let code = code.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(DomainError::InvalidCurrency {
            code: code.to_string(),
        });
    }
    Ok(code.to_ascii_uppercase())
}
