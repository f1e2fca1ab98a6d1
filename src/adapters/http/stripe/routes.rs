//! Axum router configuration for Stripe endpoints.

use axum::{routing::post, Router};

use super::handlers::{webhook, webhook_test, StripeAppState};

/// Create the Stripe router.
///
/// # Routes
/// - `POST /api/stripe/webhook` - Signed deliveries that update memberships
/// - `POST /api/stripe/webhook-test` - Acknowledges any delivery
pub fn stripe_router() -> Router<StripeAppState> {
    Router::new()
        .route("/api/stripe/webhook", post(webhook))
        .route("/api/stripe/webhook-test", post(webhook_test))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use hmac::{Hmac, Mac};
    use secrecy::SecretString;
    use serde_json::{json, Value};
    use sha2::Sha256;
    use tower::ServiceExt;

    use super::super::handlers::WebhookTestResponse;
    use crate::adapters::storage::InMemoryBlobStore;
    use crate::adapters::stripe::StripeWebhookVerifier;
    use crate::application::handlers::membership::MembershipStore;
    use crate::domain::foundation::Email;
    use crate::domain::membership::{MembershipStatus, Plan, PriceCatalog};

    const SECRET: &str = "whsec_route_secret";

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn state(store: MembershipStore, secret: Option<&str>) -> StripeAppState {
        StripeAppState {
            verifier: secret
                .map(|s| Arc::new(StripeWebhookVerifier::new(SecretString::new(s.to_string())))),
            store,
            catalog: PriceCatalog::new(Some("price_std".to_string()), Some("price_prm".to_string())),
            verbose_errors: false,
        }
    }

    fn memory_store() -> MembershipStore {
        MembershipStore::new(Arc::new(InMemoryBlobStore::new()))
    }

    fn signature_for(payload: &str) -> String {
        let timestamp = chrono::Utc::now().timestamp();
        let mut mac = Hmac::<Sha256>::new_from_slice(SECRET.as_bytes()).unwrap();
        mac.update(format!("{timestamp}.{payload}").as_bytes());
        format!("t={timestamp},v1={}", hex::encode(mac.finalize().into_bytes()))
    }

    fn checkout_payload() -> String {
        json!({
            "id": "evt_1",
            "type": "checkout.session.completed",
            "data": { "object": {
                "id": "cs_1",
                "customer": "cus_1",
                "subscription": "sub_1",
                "customer_details": { "email": "Member@Example.com" },
                "metadata": { "price_id": "price_prm" }
            }}
        })
        .to_string()
    }

    async fn deliver(
        app: Router,
        uri: &str,
        signature: Option<String>,
        body: Body,
    ) -> (StatusCode, String) {
        let mut request = Request::builder().method("POST").uri(uri);
        if let Some(signature) = signature {
            request = request.header("stripe-signature", signature);
        }
        let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Signed Webhook
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn verified_checkout_updates_membership() {
        let store = memory_store();
        let app = stripe_router().with_state(state(store.clone(), Some(SECRET)));
        let payload = checkout_payload();

        let (status, body) = deliver(
            app,
            "/api/stripe/webhook",
            Some(signature_for(&payload)),
            Body::from(payload),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({ "received": true }));

        let record = store
            .get_membership(&Email::new("member@example.com").unwrap())
            .await
            .unwrap();
        assert_eq!(record.plan, Plan::Premium);
        assert_eq!(record.status, MembershipStatus::Active);
        assert_eq!(record.stripe_customer_id.as_deref(), Some("cus_1"));
    }

    #[tokio::test]
    async fn missing_signature_is_bad_request() {
        let app = stripe_router().with_state(state(memory_store(), Some(SECRET)));

        let (status, body) =
            deliver(app, "/api/stripe/webhook", None, Body::from(checkout_payload())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "missing signature");
    }

    #[tokio::test]
    async fn unconfigured_secret_is_server_error() {
        let app = stripe_router().with_state(state(memory_store(), None));
        let payload = checkout_payload();

        let (status, body) = deliver(
            app,
            "/api/stripe/webhook",
            Some(signature_for(&payload)),
            Body::from(payload),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "missing STRIPE_WEBHOOK_SECRET");
    }

    #[tokio::test]
    async fn bad_signature_is_rejected_without_writing() {
        let store = memory_store();
        let app = stripe_router().with_state(state(store.clone(), Some(SECRET)));
        let signature = signature_for(&checkout_payload());
        let forged = checkout_payload().replace("price_prm", "price_std");

        let (status, body) =
            deliver(app, "/api/stripe/webhook", Some(signature), Body::from(forged)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.starts_with("Webhook error:"));
        assert!(store
            .find_membership(&Email::new("member@example.com").unwrap())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn unrelated_events_are_acknowledged() {
        let app = stripe_router().with_state(state(memory_store(), Some(SECRET)));
        let payload = json!({
            "id": "evt_2",
            "type": "customer.created",
            "data": { "object": { "id": "cus_1" } }
        })
        .to_string();

        let (status, _) = deliver(
            app,
            "/api/stripe/webhook",
            Some(signature_for(&payload)),
            Body::from(payload),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn events_without_customer_email_are_acknowledged() {
        let app = stripe_router().with_state(state(memory_store(), Some(SECRET)));
        let payload = json!({
            "id": "evt_3",
            "type": "customer.subscription.deleted",
            "data": { "object": { "id": "sub_1", "status": "canceled" } }
        })
        .to_string();

        let (status, _) = deliver(
            app,
            "/api/stripe/webhook",
            Some(signature_for(&payload)),
            Body::from(payload),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Webhook Test
    // ════════════════════════════════════════════════════════════════════════════

    async fn post_test_body(body: Body) -> (StatusCode, WebhookTestResponse) {
        let app = stripe_router().with_state(state(memory_store(), None));
        let (status, body) = deliver(app, "/api/stripe/webhook-test", None, body).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    #[tokio::test]
    async fn acknowledges_empty_body() {
        let (status, body) = post_test_body(Body::empty()).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.received);
        assert!(chrono::DateTime::parse_from_rfc3339(&body.timestamp).is_ok());
    }

    #[tokio::test]
    async fn acknowledges_arbitrary_bytes() {
        let (status, body) = post_test_body(Body::from(vec![0xff, 0x00, 0x7b])).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.received);
    }

    #[tokio::test]
    async fn rejects_get() {
        let app = stripe_router().with_state(state(memory_store(), None));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/stripe/webhook-test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
