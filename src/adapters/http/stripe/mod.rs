//! HTTP adapter for Stripe webhooks.
//!
//! - `POST /api/stripe/webhook` - Verified deliveries that update memberships
//! - `POST /api/stripe/webhook-test` - Acknowledges any delivery

pub mod handlers;
pub mod routes;

pub use handlers::{StripeAppState, WebhookAck, WebhookApiError, WebhookTestResponse};
pub use routes::stripe_router;
