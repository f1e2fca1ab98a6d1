//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod membership;
pub mod notification;

pub use membership::{
    CheckRaceAccessHandler, CheckRaceAccessQuery, CheckRaceAccessResult, LookupMembershipHandler,
    LookupMembershipQuery, LookupMembershipResult, MembershipStore, RecordBillingEventCommand,
    RecordBillingEventHandler, RecordBillingEventResult, MAX_RACES_PER_DAY,
};
pub use notification::{ExpiryCheckReport, TriggerExpiryCheckCommand, TriggerExpiryCheckHandler};
