//! Stripe-specific types for webhook payloads.
//!
//! These types represent Stripe API objects as they arrive in webhook
//! payloads. Only the fields the membership record cares about are modelled;
//! everything else in the JSON is ignored. Envelopes reach these types
//! through [`StripeWebhookVerifier`](super::StripeWebhookVerifier).

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::foundation::{Email, Timestamp};
use crate::domain::membership::{BillingEvent, BillingEventKind, BillingReferences};

/// Errors translating a Stripe event into a billing event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingEventError {
    #[error("malformed {event_type} payload: {reason}")]
    MalformedObject { event_type: String, reason: String },

    #[error("{0} carries no customer email")]
    MissingEmail(String),
}

// ════════════════════════════════════════════════════════════════════════════════
// Stripe Event Types
// ════════════════════════════════════════════════════════════════════════════════

/// Raw Stripe webhook event envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeWebhookEvent {
    /// Unique event identifier (evt_...).
    pub id: String,

    /// Event type (e.g., "checkout.session.completed").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp when the event was created.
    #[serde(default)]
    pub created: i64,

    /// Event payload containing the affected object.
    pub data: StripeEventData,

    /// Whether this is a live or test event.
    #[serde(default)]
    pub livemode: bool,
}

/// Event data container.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeEventData {
    /// The object affected by this event.
    pub object: serde_json::Value,
}

// ════════════════════════════════════════════════════════════════════════════════
// Stripe Object Types
// ════════════════════════════════════════════════════════════════════════════════

/// Stripe Checkout Session object.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeCheckoutSession {
    pub id: String,
    pub customer: Option<String>,
    pub customer_email: Option<String>,
    pub customer_details: Option<StripeCustomerDetails>,
    pub subscription: Option<String>,
    /// Checkout links set `price_id` here since the session itself has no line items.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Customer details collected during checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeCustomerDetails {
    pub email: Option<String>,
}

/// Stripe Subscription object.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeSubscription {
    pub id: String,
    pub customer: Option<String>,
    pub status: String,
    pub current_period_end: Option<i64>,
    /// The site stores the member's email under `email`.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    #[serde(default)]
    pub items: StripeList<StripeSubscriptionItem>,
}

/// Single subscription item.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeSubscriptionItem {
    pub price: StripePrice,
}

/// Stripe Price object, reduced to its id.
#[derive(Debug, Clone, Deserialize)]
pub struct StripePrice {
    pub id: String,
}

/// Stripe Invoice object.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeInvoice {
    pub id: String,
    pub customer: Option<String>,
    pub customer_email: Option<String>,
    pub subscription: Option<String>,
    #[serde(default)]
    pub lines: StripeList<StripeInvoiceLineItem>,
}

/// Single invoice line item.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeInvoiceLineItem {
    pub price: Option<StripePrice>,
    pub period: Option<StripeInvoicePeriod>,
}

/// Invoice line item period.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeInvoicePeriod {
    pub start: i64,
    pub end: i64,
}

/// Stripe list container (`{"object":"list","data":[...]}`).
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct StripeList<T> {
    #[serde(default)]
    pub data: Vec<T>,
}

impl<T> Default for StripeList<T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Event Type Mapping
// ════════════════════════════════════════════════════════════════════════════════

impl StripeWebhookEvent {
    /// Translates the event into a billing event.
    ///
    /// Returns `Ok(None)` for event types that do not touch memberships.
    pub fn to_billing_event(&self) -> Result<Option<BillingEvent>, BillingEventError> {
        let event = match self.event_type.as_str() {
            "checkout.session.completed" => {
                let session: StripeCheckoutSession = self.object()?;
                let email = session
                    .customer_details
                    .and_then(|details| details.email)
                    .or(session.customer_email);
                BillingEvent::new(
                    self.email(email)?,
                    BillingEventKind::CheckoutCompleted,
                    BillingReferences {
                        customer_id: session.customer,
                        subscription_id: session.subscription,
                        price_id: session.metadata.get("price_id").cloned(),
                        current_period_end: None,
                    },
                )
            }
            "invoice.payment_succeeded" | "invoice.payment_failed" => {
                let invoice: StripeInvoice = self.object()?;
                let kind = if self.event_type == "invoice.payment_succeeded" {
                    BillingEventKind::PaymentSucceeded
                } else {
                    BillingEventKind::PaymentFailed
                };
                let line = invoice.lines.data.into_iter().next();
                BillingEvent::new(
                    self.email(invoice.customer_email)?,
                    kind,
                    BillingReferences {
                        customer_id: invoice.customer,
                        subscription_id: invoice.subscription,
                        price_id: line
                            .as_ref()
                            .and_then(|l| l.price.as_ref())
                            .map(|p| p.id.clone()),
                        current_period_end: line
                            .and_then(|l| l.period)
                            .and_then(|p| Timestamp::from_unix_secs(p.end)),
                    },
                )
            }
            "customer.subscription.updated" | "customer.subscription.deleted" => {
                let subscription: StripeSubscription = self.object()?;
                let kind = if self.event_type == "customer.subscription.updated" {
                    BillingEventKind::SubscriptionUpdated {
                        provider_status: subscription.status.clone(),
                    }
                } else {
                    BillingEventKind::SubscriptionDeleted
                };
                BillingEvent::new(
                    self.email(subscription.metadata.get("email").cloned())?,
                    kind,
                    BillingReferences {
                        customer_id: subscription.customer,
                        subscription_id: Some(subscription.id),
                        price_id: subscription
                            .items
                            .data
                            .first()
                            .map(|item| item.price.id.clone()),
                        current_period_end: subscription
                            .current_period_end
                            .and_then(Timestamp::from_unix_secs),
                    },
                )
            }
            _ => return Ok(None),
        };
        Ok(Some(event))
    }

    fn object<T: serde::de::DeserializeOwned>(&self) -> Result<T, BillingEventError> {
        serde_json::from_value(self.data.object.clone()).map_err(|e| {
            BillingEventError::MalformedObject {
                event_type: self.event_type.clone(),
                reason: e.to_string(),
            }
        })
    }

    fn email(&self, raw: Option<String>) -> Result<Email, BillingEventError> {
        raw.and_then(|raw| Email::normalized(&raw).ok())
            .ok_or_else(|| BillingEventError::MissingEmail(self.event_type.clone()))
    }
}
