//! HTTP adapters - REST API implementations.
//!
//! Each module has its own router and state; [`app_router`] merges them.

pub mod cron;
pub mod diagnostics;
pub mod membership;
pub mod router;
pub mod stripe;

// Re-export key types for convenience
pub use cron::{cron_router, CronAppState};
pub use diagnostics::{diagnostics_router, DiagnosticsAppState};
pub use membership::{membership_router, MembershipAppState};
pub use router::app_router;
pub use stripe::stripe_router;
