//! HTTP adapter for scheduled jobs.
//!
//! - `POST /api/cron/expiry-check` - Runs the daily expiry check

pub mod handlers;
pub mod routes;

pub use handlers::{CronAppState, ExpiryCheckResponse};
pub use routes::cron_router;
