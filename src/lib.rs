//! Nankan Analytics - membership service
//!
//! Looks up per-member JSON records in a namespaced blob store and serves
//! the small set of HTTP endpoints the racing site relies on: membership
//! lookups and race access checks, the signed Stripe webhook and its
//! connectivity test, the scheduled expiry check trigger and environment
//! diagnostics.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
