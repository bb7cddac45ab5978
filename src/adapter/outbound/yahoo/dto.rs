//! Yahoo Finance chart API response types.
//!
//! Example payload (trimmed):
//! ```json
//! {"chart":{"result":[{"meta":{"regularMarketPrice":151.2},
//!   "indicators":{"quote":[{"close":[150.9,null,151.1]}]}}],"error":null}}
//! ```

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub indicators: Option<Indicators>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

impl ChartResponse {
    /// The current market price, falling back to the day's last close.
    #[must_use]
    pub fn latest_price(&self) -> Option<f64> {
        let result = self.chart.result.as_ref()?.first()?;
        if let Some(price) = result.meta.regular_market_price {
            return Some(price);
        }
        result
            .indicators
            .as_ref()?
            .quote
            .first()?
            .close
            .iter()
            .rev()
            .find_map(|close| *close)
    }

    /// Provider error description, if the payload carries one.
    #[must_use]
    pub fn error_description(&self) -> Option<String> {
        let error = self.chart.error.as_ref()?;
        Some(match (&error.code, &error.description) {
            (Some(code), Some(desc)) => format!("{code}: {desc}"),
            (Some(code), None) => code.clone(),
            (None, Some(desc)) => desc.clone(),
            (None, None) => "unknown error".to_string(),
        })
    }
}
