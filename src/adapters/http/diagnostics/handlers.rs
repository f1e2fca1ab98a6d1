//! HTTP handlers for diagnostics endpoints.

use std::collections::BTreeMap;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::foundation::Timestamp;

/// Whether one secret is configured, and how long it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretPresence {
    pub set: bool,
    pub length: usize,
}

impl SecretPresence {
    pub fn of(secret: Option<&SecretString>) -> Self {
        let length = secret.map(|s| s.expose_secret().len()).unwrap_or(0);
        Self {
            set: length > 0,
            length,
        }
    }
}

/// Shared state for diagnostics endpoints.
///
/// Presence is captured once at startup; the values themselves are not kept.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticsAppState {
    pub secrets: BTreeMap<&'static str, SecretPresence>,
}

impl DiagnosticsAppState {
    pub fn from_config(config: &AppConfig) -> Self {
        let secrets = BTreeMap::from([
            (
                "STRIPE_SECRET_KEY",
                SecretPresence::of(config.payment.stripe_secret_key.as_ref()),
            ),
            (
                "STRIPE_WEBHOOK_SECRET",
                SecretPresence::of(config.payment.stripe_webhook_secret.as_ref()),
            ),
            (
                "NOTIFICATION_TOKEN",
                SecretPresence::of(config.notification.token.as_ref()),
            ),
        ]);
        Self { secrets }
    }
}

/// Body of the environment report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvReportResponse {
    pub message: String,
    pub status: BTreeMap<String, SecretPresence>,
    pub timestamp: String,
}

/// `GET /api/debug/env`
pub async fn env_report(State(state): State<DiagnosticsAppState>) -> Json<EnvReportResponse> {
    let status: BTreeMap<String, SecretPresence> = state
        .secrets
        .iter()
        .map(|(name, presence)| (name.to_string(), *presence))
        .collect();

    info!(
        configured = status.values().filter(|p| p.set).count(),
        total = status.len(),
        "environment check"
    );

    Json(EnvReportResponse {
        message: "environment check completed".to_string(),
        status,
        timestamp: Timestamp::now().to_rfc3339(),
    })
}

/// `GET /health_check`
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}
