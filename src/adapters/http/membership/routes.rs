//! Axum router configuration for membership endpoints.

use axum::{routing::get, Router};

use super::handlers::{check_race_access, debug_membership, lookup_membership, MembershipAppState};

/// Create the membership API router.
///
/// # Routes
/// - `GET /api/membership` - Case-insensitive lookup
/// - `GET /api/membership/debug` - Verbatim lookup returning the raw record
/// - `GET /api/membership/access` - Race access check
pub fn membership_router() -> Router<MembershipAppState> {
    Router::new()
        .route("/api/membership", get(lookup_membership))
        .route("/api/membership/debug", get(debug_membership))
        .route("/api/membership/access", get(check_race_access))
}
