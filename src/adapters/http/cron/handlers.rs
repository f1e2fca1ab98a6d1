//! HTTP handlers for scheduled jobs.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use crate::application::handlers::notification::{
    TriggerExpiryCheckCommand, TriggerExpiryCheckHandler,
};
use crate::domain::foundation::Timestamp;
use crate::ports::ExpiryNotifier;

/// Body of the `error` field when verbose errors are off.
const GENERIC_ERROR_MESSAGE: &str = "internal server error";

/// Shared state for cron endpoints.
#[derive(Clone)]
pub struct CronAppState {
    pub notifier: Arc<dyn ExpiryNotifier>,
    /// Include the notifier's error message in failure bodies.
    pub verbose_errors: bool,
}

impl CronAppState {
    pub fn new(notifier: Arc<dyn ExpiryNotifier>, verbose_errors: bool) -> Self {
        Self {
            notifier,
            verbose_errors,
        }
    }

    pub fn expiry_check_handler(&self) -> TriggerExpiryCheckHandler {
        TriggerExpiryCheckHandler::new(self.notifier.clone())
    }
}

/// Body of the expiry check response, success or failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryCheckResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
}

/// `POST /api/cron/expiry-check`
pub async fn expiry_check(State(state): State<CronAppState>) -> Response {
    match state
        .expiry_check_handler()
        .handle(TriggerExpiryCheckCommand)
        .await
    {
        Ok(report) => Json(ExpiryCheckResponse {
            success: true,
            message: Some("expiry check completed".to_string()),
            notification_result: Some(report.notification_result),
            error: None,
            timestamp: report.completed_at.to_rfc3339(),
        })
        .into_response(),
        Err(err) => {
            error!(error = %err, "expiry check failed");
            let message = if state.verbose_errors {
                err.to_string()
            } else {
                GENERIC_ERROR_MESSAGE.to_string()
            };
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ExpiryCheckResponse {
                    success: false,
                    message: None,
                    notification_result: None,
                    error: Some(message),
                    timestamp: Timestamp::now().to_rfc3339(),
                }),
            )
                .into_response()
        }
    }
}
