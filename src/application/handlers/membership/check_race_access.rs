//! CheckRaceAccessHandler - Query handler deciding whether a member may see
//! the prediction for a given race.

use tracing::debug;

use crate::domain::foundation::{Email, ValidationError};
use crate::domain::membership::{Plan, StoreError};

use super::membership_store::MembershipStore;

/// Most races held on one day.
pub const MAX_RACES_PER_DAY: u32 = 12;

/// Query to check access to one race.
#[derive(Debug, Clone)]
pub struct CheckRaceAccessQuery {
    pub email: Email,
    pub race: u32,
    pub total_races: u32,
}

impl CheckRaceAccessQuery {
    /// Builds a query from raw request input.
    ///
    /// # Errors
    ///
    /// - `EmptyField` for a blank email
    /// - `OutOfRange` when `total_races` is not in `1..=MAX_RACES_PER_DAY`
    pub fn new(raw_email: &str, race: u32, total_races: u32) -> Result<Self, ValidationError> {
        let email = Email::normalized(raw_email)?;
        if total_races == 0 || total_races > MAX_RACES_PER_DAY {
            return Err(ValidationError::out_of_range(
                "total_races",
                1,
                MAX_RACES_PER_DAY as i64,
                total_races as i64,
            ));
        }
        Ok(Self {
            email,
            race,
            total_races,
        })
    }
}

/// Result of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckRaceAccessResult {
    /// Plan that was enforced.
    pub plan: Plan,
    /// Whether the race is visible under that plan.
    pub allowed: bool,
}

/// Handler for race access checks.
///
/// Visitors without a record, or whose record's status grants no access,
/// are treated as free members.
pub struct CheckRaceAccessHandler {
    store: MembershipStore,
}

impl CheckRaceAccessHandler {
    pub fn new(store: MembershipStore) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: CheckRaceAccessQuery,
    ) -> Result<CheckRaceAccessResult, StoreError> {
        let plan = self
            .store
            .find_membership(&query.email)
            .await?
            .map(|record| record.effective_plan())
            .unwrap_or(Plan::Free);

        let allowed = plan.can_access_race(query.race, query.total_races);
        debug!(email = %query.email, %plan, race = query.race, allowed, "race access checked");

        Ok(CheckRaceAccessResult { plan, allowed })
    }
}
