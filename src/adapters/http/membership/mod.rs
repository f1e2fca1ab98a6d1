//! HTTP adapter for membership endpoints.
//!
//! Exposes the membership store via REST API:
//! - `GET /api/membership` - Case-insensitive lookup
//! - `GET /api/membership/debug` - Verbatim lookup of the stored record
//! - `GET /api/membership/access` - Race access check

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{DebugLookupError, MembershipApiError, MembershipAppState};
pub use routes::membership_router;
