//! TriggerExpiryCheckHandler - Command handler for the daily expiry check.
//!
//! Runs on a schedule and delegates to the expiry notification endpoint,
//! which decides who gets an email.

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info};

use crate::domain::foundation::Timestamp;
use crate::ports::{ExpiryNotifier, NotifierError};

/// Command to run the expiry check. Carries no input.
#[derive(Debug, Clone, Default)]
pub struct TriggerExpiryCheckCommand;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpiryCheckReport {
    /// JSON returned by the notification endpoint, passed through as-is.
    pub notification_result: Value,
    pub completed_at: Timestamp,
}

/// Handler for the scheduled expiry check.
pub struct TriggerExpiryCheckHandler {
    notifier: Arc<dyn ExpiryNotifier>,
}

impl TriggerExpiryCheckHandler {
    pub fn new(notifier: Arc<dyn ExpiryNotifier>) -> Self {
        Self { notifier }
    }

    pub async fn handle(
        &self,
        _cmd: TriggerExpiryCheckCommand,
    ) -> Result<ExpiryCheckReport, NotifierError> {
        info!("starting expiry check");

        let notification_result = self.notifier.trigger().await.map_err(|e| {
            error!(error = %e, "expiry check failed");
            e
        })?;

        info!("expiry check completed");
        Ok(ExpiryCheckReport {
            notification_result,
            completed_at: Timestamp::now(),
        })
    }
}
