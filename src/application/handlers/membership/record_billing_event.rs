//! RecordBillingEventHandler - Command handler that folds a verified billing
//! event into the member's stored record.

use tracing::info;

use crate::domain::foundation::Timestamp;
use crate::domain::membership::{BillingEvent, MembershipRecord, PriceCatalog, StoreError};

use super::membership_store::MembershipStore;

/// Command to record a billing event.
#[derive(Debug, Clone)]
pub struct RecordBillingEventCommand {
    pub event: BillingEvent,
}

/// Result of recording: the record as written.
pub type RecordBillingEventResult = MembershipRecord;

/// Handler for billing events.
///
/// Reads the current record (if any), applies the event, and writes the
/// result back. Read and write are separate round-trips; two events for the
/// same member racing each other resolve last-write-wins.
pub struct RecordBillingEventHandler {
    store: MembershipStore,
    catalog: PriceCatalog,
}

impl RecordBillingEventHandler {
    pub fn new(store: MembershipStore, catalog: PriceCatalog) -> Self {
        Self { store, catalog }
    }

    pub async fn handle(
        &self,
        cmd: RecordBillingEventCommand,
    ) -> Result<RecordBillingEventResult, StoreError> {
        let event = cmd.event;
        let existing = self.store.find_membership(&event.email).await?;

        let record = event.apply(existing, &self.catalog, Timestamp::now());
        self.store.put_membership(&record).await?;

        info!(
            email = %record.email,
            event = event.kind.name(),
            plan = %record.plan,
            status = %record.status,
            "membership updated from billing event"
        );
        Ok(record)
    }
}
