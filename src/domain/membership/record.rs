//! Membership record as persisted in the blob store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::{Email, Timestamp};

use super::plan::Plan;
use super::status::MembershipStatus;
use super::storage_key::StorageKey;

/// A member's subscription state, one JSON document per email.
///
/// Fields the struct does not know about are kept in `extra` and written
/// back unchanged, so records written by older site code survive a
/// read-modify-write cycle. The checkout scripts' field names
/// (`updatedAt`, `customerId`, `subscriptionId`, `priceId`) are read as
/// aliases and written back under the current names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipRecord {
    pub email: Email,

    #[serde(alias = "planName")]
    pub plan: Plan,

    pub status: MembershipStatus,

    #[serde(default, alias = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<Timestamp>,

    #[serde(default, alias = "customerId", skip_serializing_if = "Option::is_none")]
    pub stripe_customer_id: Option<String>,

    #[serde(default, alias = "subscriptionId", skip_serializing_if = "Option::is_none")]
    pub stripe_subscription_id: Option<String>,

    #[serde(default, alias = "priceId", skip_serializing_if = "Option::is_none")]
    pub stripe_price_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_period_end: Option<Timestamp>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MembershipRecord {
    /// Creates a record with no billing references, stamped now.
    pub fn new(email: Email, plan: Plan, status: MembershipStatus) -> Self {
        Self {
            email,
            plan,
            status,
            last_updated: Some(Timestamp::now()),
            stripe_customer_id: None,
            stripe_subscription_id: None,
            stripe_price_id: None,
            current_period_end: None,
            extra: Map::new(),
        }
    }

    /// Storage key this record lives under.
    pub fn storage_key(&self) -> StorageKey {
        StorageKey::for_email(&self.email)
    }

    /// Returns true if the status currently grants paid access.
    pub fn has_access(&self) -> bool {
        self.status.has_access()
    }

    /// Plan to enforce for content access.
    ///
    /// Members whose status does not grant access fall back to free.
    pub fn effective_plan(&self) -> Plan {
        if self.has_access() {
            self.plan
        } else {
            Plan::Free
        }
    }

    /// Decodes a stored JSON document.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Encodes the record as a JSON document.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
