//! Stripe payment provider adapter.
//!
//! Verifies webhook signatures and translates the verified payloads into
//! provider-agnostic [`BillingEvent`](crate::domain::membership::BillingEvent)s
//! for the membership recorder.

mod webhook_types;
mod webhook_verifier;

pub use webhook_types::{
    BillingEventError, StripeCheckoutSession, StripeInvoice, StripeSubscription,
    StripeWebhookEvent,
};
pub use webhook_verifier::{SignatureHeader, StripeWebhookVerifier, WebhookError};
