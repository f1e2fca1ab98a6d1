//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::membership::PriceCatalog;

/// Stripe account mode
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    #[default]
    Test,
    Live,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Test => "test",
            PaymentMode::Live => "live",
        }
    }
}

/// Payment configuration (Stripe)
///
/// Secrets are optional: the service only reports on them and maps price
/// ids. Checkout and signature verification live elsewhere.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key
    pub stripe_secret_key: Option<SecretString>,

    /// Stripe webhook signing secret
    pub stripe_webhook_secret: Option<SecretString>,

    #[serde(default)]
    pub mode: PaymentMode,

    pub standard_price_id_test: Option<String>,
    pub premium_price_id_test: Option<String>,
    pub standard_price_id_live: Option<String>,
    pub premium_price_id_live: Option<String>,
}

impl PaymentConfig {
    /// Price catalog for the configured mode.
    pub fn price_catalog(&self) -> PriceCatalog {
        match self.mode {
            PaymentMode::Test => PriceCatalog::new(
                self.standard_price_id_test.clone(),
                self.premium_price_id_test.clone(),
            ),
            PaymentMode::Live => PriceCatalog::new(
                self.standard_price_id_live.clone(),
                self.premium_price_id_live.clone(),
            ),
        }
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(key) = &self.stripe_secret_key {
            let key = key.expose_secret();
            if !key.starts_with("sk_") {
                return Err(ValidationError::InvalidStripeKey);
            }
            let expected = match self.mode {
                PaymentMode::Test => "sk_test_",
                PaymentMode::Live => "sk_live_",
            };
            if !key.starts_with(expected) {
                return Err(ValidationError::StripeModeMismatch(self.mode.as_str()));
            }
        }
        if let Some(secret) = &self.stripe_webhook_secret {
            if !secret.expose_secret().starts_with("whsec_") {
                return Err(ValidationError::InvalidStripeWebhookSecret);
            }
        }
        Ok(())
    }
}
