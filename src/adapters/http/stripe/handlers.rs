//! HTTP handlers for Stripe endpoints.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::adapters::stripe::{StripeWebhookVerifier, WebhookError};
use crate::application::handlers::membership::{
    MembershipStore, RecordBillingEventCommand, RecordBillingEventHandler,
};
use crate::config::AppConfig;
use crate::domain::foundation::Timestamp;
use crate::domain::membership::PriceCatalog;

const SIGNATURE_HEADER: &str = "stripe-signature";

/// Body of 500 responses when verbose errors are off.
const GENERIC_ERROR_MESSAGE: &str = "internal server error";

// ════════════════════════════════════════════════════════════════════════════════
// Error Types
// ════════════════════════════════════════════════════════════════════════════════

/// Plain-text failures of the signed webhook.
#[derive(Debug)]
pub enum WebhookApiError {
    MissingSignature,
    NotConfigured,
    Rejected(WebhookError),
    Internal(String),
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        match self {
            WebhookApiError::MissingSignature => {
                (StatusCode::BAD_REQUEST, "missing signature").into_response()
            }
            WebhookApiError::NotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "missing STRIPE_WEBHOOK_SECRET",
            )
                .into_response(),
            WebhookApiError::Rejected(err) => {
                (StatusCode::BAD_REQUEST, format!("Webhook error: {}", err)).into_response()
            }
            WebhookApiError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Webhook error: {}", message),
            )
                .into_response(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for Stripe endpoints.
#[derive(Clone)]
pub struct StripeAppState {
    /// `None` when no signing secret is configured; deliveries then fail.
    pub verifier: Option<Arc<StripeWebhookVerifier>>,
    pub store: MembershipStore,
    pub catalog: PriceCatalog,
    pub verbose_errors: bool,
}

impl StripeAppState {
    pub fn from_config(config: &AppConfig, store: MembershipStore) -> Self {
        Self {
            verifier: config
                .payment
                .stripe_webhook_secret
                .clone()
                .map(|secret| Arc::new(StripeWebhookVerifier::new(secret))),
            store,
            catalog: config.payment.price_catalog(),
            verbose_errors: config.features.verbose_errors,
        }
    }

    pub fn billing_event_handler(&self) -> RecordBillingEventHandler {
        RecordBillingEventHandler::new(self.store.clone(), self.catalog.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// Acknowledgement for a verified delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAck {
    pub received: bool,
}

/// `POST /api/stripe/webhook`
///
/// Verifies the delivery, then folds membership events into the member's
/// record. Events that are unrelated or that carry no usable customer are
/// acknowledged without a write so Stripe stops retrying them; store
/// failures return 500 so it retries.
pub async fn webhook(
    State(state): State<StripeAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, WebhookApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(WebhookApiError::MissingSignature)?;
    let verifier = state
        .verifier
        .as_ref()
        .ok_or(WebhookApiError::NotConfigured)?;

    let event = verifier.verify(&body, signature).map_err(|err| {
        warn!(error = %err, "rejected webhook delivery");
        WebhookApiError::Rejected(err)
    })?;
    info!(event_id = %event.id, event_type = %event.event_type, "webhook received");

    let billing_event = match event.to_billing_event() {
        Ok(Some(billing_event)) => billing_event,
        Ok(None) => {
            info!(event_type = %event.event_type, "unhandled webhook event type");
            return Ok(Json(WebhookAck { received: true }));
        }
        Err(err) => {
            warn!(event_id = %event.id, error = %err, "webhook event skipped");
            return Ok(Json(WebhookAck { received: true }));
        }
    };

    state
        .billing_event_handler()
        .handle(RecordBillingEventCommand {
            event: billing_event,
        })
        .await
        .map_err(|err| {
            error!(event_id = %event.id, error = %err, "failed to record billing event");
            let message = if state.verbose_errors {
                err.to_string()
            } else {
                GENERIC_ERROR_MESSAGE.to_string()
            };
            WebhookApiError::Internal(message)
        })?;

    Ok(Json(WebhookAck { received: true }))
}

/// Acknowledgement returned to the webhook test sender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookTestResponse {
    pub received: bool,
    pub timestamp: String,
}

/// `POST /api/stripe/webhook-test`
///
/// Lets the dashboard confirm deliveries reach the service. The body is
/// read but neither parsed nor verified, so any payload is accepted.
pub async fn webhook_test(headers: HeaderMap, body: Bytes) -> Json<WebhookTestResponse> {
    let header_names: Vec<&str> = headers.keys().map(|name| name.as_str()).collect();
    info!(
        headers = ?header_names,
        has_signature = headers.contains_key(SIGNATURE_HEADER),
        body_len = body.len(),
        "webhook test received"
    );

    Json(WebhookTestResponse {
        received: true,
        timestamp: Timestamp::now().to_rfc3339(),
    })
}
