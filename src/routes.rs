//! Application routing configuration with middleware stack.
//!
//! # Middleware Stack (outermost first)
//!
//! ```text
//! Request
//!    │
//!    ▼
//! ┌──────────────────┐
//! │   Request ID     │ ← X-Request-ID header, request_id/duration_ms in JSON
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │      CORS        │ ← Cross-origin headers (optional)
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │     Tracing      │ ← HTTP request/response logging
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │   Body Limit     │ ← MAX_REQUEST_BODY_SIZE
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │  Authentication  │ ← 401 if invalid (protected routes only)
//! └────────┬─────────┘
//!          │
//!          ▼
//!      Handler
//! ```
//!
//! # Route Groups
//!
//! - `/toolbox/api/health` - Health (no API key)
//! - every other `/toolbox/api/*` route - requires `X-API-Key`

use axum::Router;
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::routing::{MethodFilter, get, on, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{Span, info};

use crate::handlers;
use crate::middleware::{ApiKeyAuth, RequestIdExt, RequestIdLayer};
use crate::state::AppState;

/// Prefix shared by every API route.
pub const API_PREFIX: &str = "/toolbox/api";

/// Path of the unauthenticated health endpoint.
pub const HEALTH_PATH: &str = "/toolbox/api/health";

/// Build the application router with all routes and middleware configured.
///
/// # Arguments
///
/// * `state` - Application state containing config
///
/// # Returns
///
/// Fully configured Axum router ready to be served. Serve it with
/// `into_make_service_with_connect_info::<SocketAddr>()` so the client-info
/// endpoint can see the peer address.
pub fn build_router(state: AppState) -> Router {
    let config = &state.config;

    let echo_methods = MethodFilter::GET
        .or(MethodFilter::POST)
        .or(MethodFilter::PUT)
        .or(MethodFilter::PATCH)
        .or(MethodFilter::DELETE)
        .or(MethodFilter::OPTIONS)
        .or(MethodFilter::HEAD);

    // =========================================================================
    // Protected routes (auth gate runs only when one of these matches)
    // =========================================================================
    let protected = Router::new()
        .route("/toolbox/api/ip", get(handlers::client_info))
        .route("/toolbox/api/time", get(handlers::server_time))
        .route("/toolbox/api/uuid", get(handlers::generate_uuid))
        .route("/toolbox/api/json/format", post(handlers::format_json))
        .route("/toolbox/api/hash", post(handlers::hash_text))
        .route("/toolbox/api/jwt/decode", post(handlers::decode_jwt))
        .route("/toolbox/api/echo", on(echo_methods, handlers::echo))
        .route_layer(ApiKeyAuth::new(&config.api_key));

    let mut router = Router::new()
        .route(HEALTH_PATH, get(handlers::health_check))
        .merge(protected)
        // Must come after every route: it only covers routes already added
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .fallback(handlers::not_found);

    // =========================================================================
    // Apply Middleware Stack (order matters - applied bottom to top)
    // =========================================================================

    // 1. Request body size limit (prevents DoS via large payloads)
    info!(
        max_size_bytes = config.max_request_body_size,
        "Request body size limit configured"
    );
    router = router.layer(DefaultBodyLimit::max(config.max_request_body_size));

    // 2. Tracing - runs inside RequestIdLayer, so the span can carry the ID
    router = router.layer(TraceLayer::new_for_http().make_span_with(make_request_span));

    // 3. CORS (if enabled) - answers every OPTIONS request as a preflight
    if config.cors_enabled() {
        info!(origins = ?config.cors_allowed_origins, "CORS enabled");
        router = router.layer(build_cors_layer(&config.cors_allowed_origins));
    } else {
        info!("CORS disabled (no CORS_ALLOWED_ORIGINS set)");
    }

    // 4. Request ID and envelope - outermost, so every response is stamped
    router = router.layer(RequestIdLayer::new());

    router.with_state(state)
}

/// Span for one HTTP exchange, tagged with the request ID.
fn make_request_span(req: &Request<Body>) -> Span {
    tracing::info_span!(
        "http_request",
        method = %req.method(),
        uri = %req.uri(),
        request_id = req.request_id().unwrap_or("-"),
    )
}

/// Build CORS layer from configuration.
///
/// # Arguments
///
/// * `allowed_origins` - List of allowed origins, or `["*"]` for any origin
///
/// # Security Note
///
/// Using `*` (any origin) is convenient for development but should be
/// avoided in production. Specify explicit origins instead.
fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    // Check if we should allow any origin
    let allow_any = allowed_origins.iter().any(|o| o == "*");

    if allow_any {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
            .expose_headers(Any)
    } else {
        // Parse specific origins
        let origins: Vec<_> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
            .expose_headers(Any)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::fmt;
    use std::sync::{Arc, Mutex};

    use axum::http::StatusCode;
    use serde_json::Value;
    use tower::ServiceExt;
    use tracing::Subscriber;
    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::{Context, SubscriberExt};

    use super::*;
    use crate::config::Config;
    use crate::envelope::RequestContext;
    use crate::middleware::REQUEST_ID_HEADER;

    fn app() -> Router {
        build_router(AppState::new(Config {
            api_key: "test-key".to_string(),
            ..Config::default()
        }))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_build_cors_layer_any() {
        let origins = vec!["*".to_string()];
        let _layer = build_cors_layer(&origins);
    }

    #[test]
    fn test_build_cors_layer_specific() {
        let origins = vec![
            "https://example.com".to_string(),
            "https://app.example.com".to_string(),
        ];
        let _layer = build_cors_layer(&origins);
    }

    #[tokio::test]
    async fn test_health_needs_no_key() {
        let response = app()
            .oneshot(Request::get(HEALTH_PATH).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn test_protected_route_requires_key() {
        let response = app()
            .oneshot(
                Request::get(format!("{API_PREFIX}/time"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let header = response.headers()[REQUEST_ID_HEADER]
            .to_str()
            .unwrap()
            .to_string();
        let body = body_json(response).await;
        assert_eq!(body["detail"], "Invalid or missing API key");
        assert_eq!(body["request_id"], header.as_str());
    }

    #[tokio::test]
    async fn test_unknown_path_is_404_not_401() {
        let response = app()
            .oneshot(
                Request::get("/toolbox/api/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["detail"], "Not Found");
        assert!(body["duration_ms"].as_f64().unwrap() >= 0.0);
    }

    #[tokio::test]
    async fn test_client_info_without_connect_info() {
        let response = app()
            .oneshot(
                Request::get(format!("{API_PREFIX}/ip"))
                    .header("x-api-key", "test-key")
                    .header("user-agent", "unit-test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ip"], "unknown");
        assert_eq!(body["user_agent"], "unit-test");
    }

    #[tokio::test]
    async fn test_echo_rejects_trace_method_with_json_detail() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("TRACE")
                    .uri(format!("{API_PREFIX}/echo"))
                    .header("x-api-key", "test-key")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let header = response.headers()[REQUEST_ID_HEADER]
            .to_str()
            .unwrap()
            .to_string();
        let body = body_json(response).await;
        assert_eq!(body["detail"], "Method Not Allowed");
        assert_eq!(body["request_id"], header.as_str());
    }

    #[tokio::test]
    async fn test_wrong_method_on_post_route_is_json_405() {
        let response = app()
            .oneshot(
                Request::get(format!("{API_PREFIX}/hash"))
                    .header("x-api-key", "test-key")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = body_json(response).await;
        assert_eq!(body["detail"], "Method Not Allowed");
        assert!(body["duration_ms"].as_f64().unwrap() >= 0.0);
    }

    #[tokio::test]
    async fn test_oversized_body_is_json_413() {
        let app = build_router(AppState::new(Config {
            api_key: "test-key".to_string(),
            max_request_body_size: 16,
            ..Config::default()
        }));

        let response = app
            .oneshot(
                Request::post(format!("{API_PREFIX}/json/format"))
                    .header("x-api-key", "test-key")
                    .body(Body::from(format!("[{}]", "1,".repeat(20) + "1")))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = body_json(response).await;
        assert_eq!(body["detail"], "Request body too large");
        assert!(body["request_id"].is_string());
    }

    /// Collects the `request_id` field of every new span.
    #[derive(Clone, Default)]
    struct RecordedIds(Arc<Mutex<Vec<String>>>);

    impl<S: Subscriber> Layer<S> for RecordedIds {
        fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
            struct Visitor<'a>(&'a Mutex<Vec<String>>);

            impl Visit for Visitor<'_> {
                fn record_str(&mut self, field: &Field, value: &str) {
                    if field.name() == "request_id" {
                        self.0.lock().unwrap().push(value.to_string());
                    }
                }

                fn record_debug(&mut self, _field: &Field, _value: &dyn fmt::Debug) {}
            }

            attrs.record(&mut Visitor(&self.0));
        }
    }

    #[test]
    fn test_request_span_carries_request_id() {
        let recorded = RecordedIds::default();
        let subscriber = tracing_subscriber::registry().with(recorded.clone());

        let ctx = RequestContext::new();
        let mut req = Request::get(HEALTH_PATH).body(Body::empty()).unwrap();
        req.extensions_mut().insert(ctx.clone());

        tracing::subscriber::with_default(subscriber, || {
            let _span = make_request_span(&req);
        });

        assert_eq!(*recorded.0.lock().unwrap(), vec![ctx.request_id]);
    }
}
