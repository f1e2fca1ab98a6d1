//! HTTP implementation of the `ExpiryNotifier` port.
//!
//! POSTs an empty body to the expiry-notification endpoint and hands back
//! the JSON it answers with.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::NotificationConfig;
use crate::ports::{ExpiryNotifier, NotifierError};

/// Calls the expiry-notification endpoint over HTTP.
pub struct HttpExpiryNotifier {
    client: Client,
    url: String,
    token: Option<SecretString>,
}

impl HttpExpiryNotifier {
    /// Builds a notifier from configuration.
    ///
    /// # Errors
    ///
    /// `NotifierError::Transport` if the HTTP client cannot be constructed.
    pub fn from_config(config: &NotificationConfig) -> Result<Self, NotifierError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| NotifierError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url: config.expiry_url.clone(),
            token: config.token.clone(),
        })
    }
}

#[async_trait]
impl ExpiryNotifier for HttpExpiryNotifier {
    async fn trigger(&self) -> Result<Value, NotifierError> {
        debug!(url = %self.url, "triggering expiry notification");

        let mut request = self.client.post(&self.url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| NotifierError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.url, status = status.as_u16(), "expiry notification rejected");
            return Err(NotifierError::UnexpectedStatus(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| NotifierError::InvalidResponse(e.to_string()))
    }
}
