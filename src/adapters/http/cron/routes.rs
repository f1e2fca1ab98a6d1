//! Axum router configuration for scheduled jobs.

use axum::{routing::post, Router};

use super::handlers::{expiry_check, CronAppState};

/// Create the cron router.
///
/// # Routes
/// - `POST /api/cron/expiry-check` - Trigger expiry notifications
pub fn cron_router() -> Router<CronAppState> {
    Router::new().route("/api/cron/expiry-check", post(expiry_check))
}
