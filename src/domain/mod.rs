//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, errors)
//! - `membership` - Membership records, plans and billing events

pub mod foundation;
pub mod membership;
