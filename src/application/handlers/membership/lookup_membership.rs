//! LookupMembershipHandler - Query handler for the public membership lookup.
//!
//! Unlike the debug endpoint, the public lookup normalizes what the visitor
//! typed (trim + lowercase) before deriving the storage key.

use crate::domain::foundation::{Email, ValidationError};
use crate::domain::membership::{MembershipError, MembershipRecord};

use super::membership_store::MembershipStore;

/// Query to look a member up by the email they typed.
#[derive(Debug, Clone)]
pub struct LookupMembershipQuery {
    pub email: Email,
}

impl LookupMembershipQuery {
    /// Normalizes raw input into a query.
    ///
    /// # Errors
    ///
    /// `ValidationError::EmptyField` if nothing remains after trimming.
    pub fn from_input(raw: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            email: Email::normalized(raw)?,
        })
    }
}

/// Result of successful lookup.
pub type LookupMembershipResult = MembershipRecord;

/// Handler for the public membership lookup.
pub struct LookupMembershipHandler {
    store: MembershipStore,
}

impl LookupMembershipHandler {
    pub fn new(store: MembershipStore) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: LookupMembershipQuery,
    ) -> Result<LookupMembershipResult, MembershipError> {
        self.store.get_membership(&query.email).await
    }
}
