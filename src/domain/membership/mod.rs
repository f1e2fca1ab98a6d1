//! Membership domain module.
//!
//! Subscription records, the plans they grant, and the key scheme used to
//! store them.
//!
//! # Module Structure
//!
//! - `record` - MembershipRecord as persisted
//! - `status` - MembershipStatus and provider status mapping
//! - `plan` - Plan entitlements and price resolution
//! - `storage_key` - `users/<encoded email>.json` key derivation
//! - `billing_event` - Verified billing events and how they rewrite records
//! - `errors` - Store and lookup errors

mod billing_event;
mod errors;
mod plan;
mod record;
mod status;
mod storage_key;

pub use billing_event::{BillingEvent, BillingEventKind, BillingReferences};
pub use errors::{MembershipError, StoreError};
pub use plan::{Plan, PriceCatalog, DEFAULT_TOTAL_RACES};
pub use record::MembershipRecord;
pub use status::MembershipStatus;
pub use storage_key::{encode_uri_component, StorageKey, MEMBERSHIP_NAMESPACE};
