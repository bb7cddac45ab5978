//! Yahoo Finance rate source.
//!
//! Queries the chart endpoint for a single symbol:
//! `GET {api_url}/v8/finance/chart/{symbol}?range=1d&interval=1d`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::debug;

use super::dto::ChartResponse;
use crate::domain::Rate;
use crate::error::FetchError;
use crate::infrastructure::config::http::SourceConfig;
use crate::port::RateSource;

const USER_AGENT: &str = concat!("fxwatch/", env!("CARGO_PKG_VERSION"));

/// Rate source backed by the Yahoo Finance chart API.
pub struct YahooRateSource {
    http: HttpClient,
    base_url: String,
    symbol: String,
}

impl YahooRateSource {
    /// Build a source with bounded timeouts from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &SourceConfig, symbol: String) -> Result<Self, reqwest::Error> {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.http.timeout_ms))
            .connect_timeout(Duration::from_millis(config.http.connect_timeout_ms))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            symbol,
        })
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

#[async_trait]
impl RateSource for YahooRateSource {
    async fn fetch(&self) -> Result<Rate, FetchError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, self.symbol);
        debug!(url = %url, "Fetching rate");

        let response = self
            .http
            .get(&url)
            .query(&[("range", "1d"), ("interval", "1d")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let chart: ChartResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Malformed(e.to_string()))?;

        let Some(price) = chart.latest_price() else {
            if let Some(description) = chart.error_description() {
                debug!(symbol = %self.symbol, error = %description, "Provider reported an error");
            }
            return Err(FetchError::NoPrice {
                symbol: self.symbol.clone(),
            });
        };

        debug!(symbol = %self.symbol, price, "Fetched rate");
        Ok(Rate::try_new(price)?)
    }
}
