//! Assembles the per-module routers into the service.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use http::{header::CONTENT_TYPE, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{warn, Level};

use crate::application::handlers::membership::MembershipStore;
use crate::config::{AppConfig, ServerConfig};
use crate::ports::ExpiryNotifier;

use super::cron::{cron_router, CronAppState};
use super::diagnostics::{diagnostics_router, DiagnosticsAppState};
use super::membership::{membership_router, MembershipAppState};
use super::stripe::{stripe_router, StripeAppState};

/// Builds the full application router.
///
/// Each module keeps its own state; they are resolved here and merged into a
/// stateless router, then wrapped in the timeout, CORS and (optionally)
/// request tracing layers.
pub fn app_router(
    config: &AppConfig,
    store: MembershipStore,
    notifier: Arc<dyn ExpiryNotifier>,
) -> Router {
    let router = Router::new()
        .merge(membership_router().with_state(MembershipAppState::new(
            store.clone(),
            config.features.verbose_errors,
        )))
        .merge(
            cron_router()
                .with_state(CronAppState::new(notifier, config.features.verbose_errors)),
        )
        .merge(diagnostics_router().with_state(DiagnosticsAppState::from_config(config)))
        .merge(stripe_router().with_state(StripeAppState::from_config(config, store)))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(build_cors(&config.server));

    if config.features.enable_tracing {
        router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
    } else {
        router
    }
}

/// CORS for the configured origins; any origin when none are configured.
fn build_cors(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match HeaderValue::from_str(&origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::adapters::storage::InMemoryBlobStore;
    use crate::ports::NotifierError;

    struct NoopNotifier;

    #[async_trait]
    impl ExpiryNotifier for NoopNotifier {
        async fn trigger(&self) -> Result<Value, NotifierError> {
            Ok(json!({}))
        }
    }

    fn app(config: &AppConfig) -> Router {
        let store = MembershipStore::new(Arc::new(InMemoryBlobStore::new()));
        app_router(config, store, Arc::new(NoopNotifier))
    }

    async fn status_of(app: Router, method: &str, uri: &str) -> StatusCode {
        app.oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
        .status()
    }

    #[tokio::test]
    async fn mounts_every_module() {
        let config = AppConfig::default();

        assert_eq!(status_of(app(&config), "GET", "/health_check").await, StatusCode::OK);
        assert_eq!(status_of(app(&config), "GET", "/api/debug/env").await, StatusCode::OK);
        assert_eq!(
            status_of(app(&config), "POST", "/api/stripe/webhook-test").await,
            StatusCode::OK
        );
        assert_eq!(
            status_of(app(&config), "POST", "/api/stripe/webhook").await,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(app(&config), "POST", "/api/cron/expiry-check").await,
            StatusCode::OK
        );
        assert_eq!(
            status_of(app(&config), "GET", "/api/membership?email=a%40b.jp").await,
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let config = AppConfig::default();
        assert_eq!(status_of(app(&config), "GET", "/nope").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn allows_configured_origin() {
        let mut config = AppConfig::default();
        config.server.cors_origins = Some("https://nankan-analytics.keiba.link".to_string());

        let response = app(&config)
            .oneshot(
                Request::builder()
                    .uri("/health_check")
                    .header("origin", "https://nankan-analytics.keiba.link")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "https://nankan-analytics.keiba.link"
        );
    }

    #[tokio::test]
    async fn tracing_can_be_disabled() {
        let mut config = AppConfig::default();
        config.features.enable_tracing = false;
        assert_eq!(status_of(app(&config), "GET", "/health_check").await, StatusCode::OK);
    }
}
