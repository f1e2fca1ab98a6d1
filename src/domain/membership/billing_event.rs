//! Billing events and how they rewrite a membership record.
//!
//! Events arrive already verified by the payment provider's SDK. Applying
//! one is a pure function of the event, the record currently stored (if any)
//! and the price catalog, which keeps the write path easy to test.

use serde_json::Value;

use crate::domain::foundation::{Email, Timestamp};

use super::plan::{Plan, PriceCatalog};
use super::record::MembershipRecord;
use super::status::MembershipStatus;

/// Provider references carried by a billing event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillingReferences {
    pub customer_id: Option<String>,
    pub subscription_id: Option<String>,
    pub price_id: Option<String>,
    pub current_period_end: Option<Timestamp>,
}

/// What happened on the provider side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingEventKind {
    /// First checkout finished; the subscription exists.
    CheckoutCompleted,
    /// A renewal invoice was paid.
    PaymentSucceeded,
    /// A renewal invoice failed; the provider will retry.
    PaymentFailed,
    /// Plan or status changed on the provider side.
    SubscriptionUpdated { provider_status: String },
    /// The subscription was deleted.
    SubscriptionDeleted,
}

impl BillingEventKind {
    pub fn name(&self) -> &'static str {
        match self {
            BillingEventKind::CheckoutCompleted => "checkout_completed",
            BillingEventKind::PaymentSucceeded => "payment_succeeded",
            BillingEventKind::PaymentFailed => "payment_failed",
            BillingEventKind::SubscriptionUpdated { .. } => "subscription_updated",
            BillingEventKind::SubscriptionDeleted => "subscription_deleted",
        }
    }
}

/// A verified billing event for one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingEvent {
    pub email: Email,
    pub kind: BillingEventKind,
    pub references: BillingReferences,
}

impl BillingEvent {
    pub fn new(email: Email, kind: BillingEventKind, references: BillingReferences) -> Self {
        Self {
            email,
            kind,
            references,
        }
    }

    /// Produces the record to store after this event.
    ///
    /// `existing` is the record currently stored for the email, if any.
    /// Billing references and unknown fields are carried forward; the
    /// event's own references win where present.
    pub fn apply(
        &self,
        existing: Option<MembershipRecord>,
        catalog: &PriceCatalog,
        now: Timestamp,
    ) -> MembershipRecord {
        let mut record = existing.unwrap_or_else(|| {
            MembershipRecord::new(self.email.clone(), Plan::Free, MembershipStatus::Pending)
        });
        let previous_plan = record.plan;
        let priced_plan = self
            .references
            .price_id
            .as_deref()
            .map(|price_id| catalog.plan_for_price(price_id));

        record.email = self.email.clone();
        self.merge_references(&mut record);

        match &self.kind {
            BillingEventKind::CheckoutCompleted | BillingEventKind::PaymentSucceeded => {
                record.plan = priced_plan.unwrap_or_else(|| paid_or_standard(previous_plan));
                record.status = MembershipStatus::Active;
            }
            BillingEventKind::PaymentFailed => {
                record.plan = priced_plan.unwrap_or(previous_plan);
                record.status = MembershipStatus::PastDue;
            }
            BillingEventKind::SubscriptionUpdated { provider_status } => {
                record.plan = priced_plan.unwrap_or(previous_plan);
                if let Some(status) = MembershipStatus::from_provider_status(provider_status) {
                    record.status = status;
                }
            }
            BillingEventKind::SubscriptionDeleted => {
                if previous_plan.is_paid() {
                    record.extra.insert(
                        "previousPlan".to_string(),
                        Value::String(previous_plan.as_str().to_string()),
                    );
                }
                record.plan = Plan::Free;
                record.status = MembershipStatus::Cancelled;
            }
        }

        record.last_updated = Some(now);
        record
    }

    fn merge_references(&self, record: &mut MembershipRecord) {
        let refs = &self.references;
        if let Some(customer_id) = &refs.customer_id {
            record.stripe_customer_id = Some(customer_id.clone());
        }
        if let Some(subscription_id) = &refs.subscription_id {
            record.stripe_subscription_id = Some(subscription_id.clone());
        }
        if let Some(price_id) = &refs.price_id {
            record.stripe_price_id = Some(price_id.clone());
        }
        if let Some(period_end) = refs.current_period_end {
            record.current_period_end = Some(period_end);
        }
    }
}

fn paid_or_standard(plan: Plan) -> Plan {
    if plan.is_paid() {
        plan
    } else {
        Plan::Standard
    }
}
