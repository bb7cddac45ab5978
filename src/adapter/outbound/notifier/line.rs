//! LINE Notify transport.
//!
//! Sends `POST {api_url}` with `Authorization: Bearer <token>` and a form
//! body carrying a single `message` field. Any 2xx response counts as
//! delivered.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::debug;

use crate::domain::AlertMessage;
use crate::error::DeliveryError;
use crate::infrastructure::config::http::NotifierConfig;
use crate::infrastructure::config::settings::ENV_LINE_NOTIFY_TOKEN;
use crate::port::Notifier;

/// Longest response body kept in a rejection error.
const MAX_ERROR_BODY: usize = 200;

/// Notifier that posts to LINE Notify.
pub struct LineNotifier {
    http: HttpClient,
    api_url: String,
    token: Option<String>,
}

impl LineNotifier {
    /// Build a notifier with bounded timeouts from configuration.
    ///
    /// A missing token is not an error here; every send then fails with
    /// [`DeliveryError::MissingCredential`] so nothing is ever persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &NotifierConfig) -> Result<Self, reqwest::Error> {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.http.timeout_ms))
            .connect_timeout(Duration::from_millis(config.http.connect_timeout_ms))
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            token: config.token.clone(),
        })
    }
}

#[async_trait]
impl Notifier for LineNotifier {
    fn name(&self) -> &'static str {
        "line"
    }

    async fn send(&self, message: &AlertMessage) -> Result<(), DeliveryError> {
        let token = self
            .token
            .as_deref()
            .ok_or(DeliveryError::MissingCredential(ENV_LINE_NOTIFY_TOKEN))?;

        debug!(url = %self.api_url, "Sending LINE notification");
        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(token)
            .form(&[("message", message.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "LINE notification accepted");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(DeliveryError::Rejected {
            status: status.as_u16(),
            body: body.chars().take(MAX_ERROR_BODY).collect(),
        })
    }
}
