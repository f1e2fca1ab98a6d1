//! Axum router configuration for diagnostics endpoints.

use axum::{routing::get, Router};

use super::handlers::{env_report, health_check, DiagnosticsAppState};

/// Create the diagnostics router.
pub fn diagnostics_router() -> Router<DiagnosticsAppState> {
    Router::new()
        .route("/api/debug/env", get(env_report))
        .route("/health_check", get(health_check))
}
