//! HTTP adapter for operational diagnostics.
//!
//! - `GET /api/debug/env` - Which secrets are configured (never their values)
//! - `GET /health_check` - Liveness check

pub mod handlers;
pub mod routes;

pub use handlers::{DiagnosticsAppState, EnvReportResponse, SecretPresence};
pub use routes::diagnostics_router;
