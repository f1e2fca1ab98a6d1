//! Membership handlers.
//!
//! The store accessor plus the command and query handlers built on it.
//!
//! ## Commands
//! - Recording verified billing events
//!
//! ## Queries
//! - Public membership lookup
//! - Race access check

mod check_race_access;
mod lookup_membership;
mod membership_store;
mod record_billing_event;

pub use membership_store::MembershipStore;

// Commands
pub use record_billing_event::{
    RecordBillingEventCommand, RecordBillingEventHandler, RecordBillingEventResult,
};

// Queries
pub use check_race_access::{
    CheckRaceAccessHandler, CheckRaceAccessQuery, CheckRaceAccessResult, MAX_RACES_PER_DAY,
};
pub use lookup_membership::{
    LookupMembershipHandler, LookupMembershipQuery, LookupMembershipResult,
};
