//! Expiry notifier port.
//!
//! The daily expiry check does no work itself: it pokes the
//! `expiry-notification` endpoint, which owns the emailing logic, and
//! reports back whatever JSON that endpoint returned.

use async_trait::async_trait;
use serde_json::Value;

/// Errors from triggering the expiry notification endpoint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotifierError {
    #[error("expiry notification failed: {0}")]
    UnexpectedStatus(u16),

    #[error("expiry notification request failed: {0}")]
    Transport(String),

    #[error("expiry notification returned invalid JSON: {0}")]
    InvalidResponse(String),
}

/// Port for triggering expiry notifications.
#[async_trait]
pub trait ExpiryNotifier: Send + Sync {
    /// Fires the notification run, with no payload.
    ///
    /// # Returns
    /// The endpoint's JSON response body.
    async fn trigger(&self) -> Result<Value, NotifierError>;
}
