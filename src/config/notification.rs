//! Expiry notification configuration

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;

/// Where the daily expiry check sends its trigger
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Full URL of the expiry-notification endpoint
    #[serde(default = "default_expiry_url")]
    pub expiry_url: String,

    /// Sent as a bearer token when set
    pub token: Option<SecretString>,

    /// Outbound request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl NotificationConfig {
    /// Validate notification configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.expiry_url.starts_with("http://") || self.expiry_url.starts_with("https://")) {
            return Err(ValidationError::InvalidNotificationUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            expiry_url: default_expiry_url(),
            token: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_expiry_url() -> String {
    "http://localhost:8888/.netlify/functions/expiry-notification".to_string()
}

fn default_timeout() -> u64 {
    30
}
