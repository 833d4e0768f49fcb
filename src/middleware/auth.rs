//! API key authentication middleware.
//!
//! # Security Features
//!
//! - **Constant-time comparison**: Prevents timing attacks on API key validation
//! - **Single credential source**: The `X-API-Key` header, nothing else
//! - **Uniform rejection**: Missing and wrong keys get the same 401 body
//!
//! # Usage
//!
//! Set the `APP_API_KEY` environment variable to the shared secret:
//!
//! ```bash
//! APP_API_KEY=your-secret-key cargo run
//! ```
//!
//! Clients must then provide the key via:
//!
//! ```bash
//! curl -H "X-API-Key: your-secret-key" http://localhost:8000/toolbox/api/uuid
//! ```
//!
//! # Selective Protection
//!
//! The layer is installed with `route_layer` on the protected routes only,
//! so the health endpoint never sees it and unknown paths still answer 404.

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{Request, Response};
use axum::response::IntoResponse;
use subtle::ConstantTimeEq;
use tower::{Layer, Service};
use tracing::{debug, warn};

use super::ip::extract_client_ip;
use super::request_id::RequestIdExt;
use crate::error::AppError;

/// Header name for API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// API key authentication layer.
///
/// Holds the single shared secret configured at startup. The secret is never
/// changed afterwards.
#[derive(Clone)]
pub struct ApiKeyAuth {
    /// Expected API key
    expected_key: Arc<str>,
}

impl ApiKeyAuth {
    /// Create a new API key auth layer for the given shared secret.
    pub fn new(api_key: &str) -> Self {
        Self {
            expected_key: Arc::from(api_key),
        }
    }
}

impl<S> Layer<S> for ApiKeyAuth {
    type Service = ApiKeyAuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ApiKeyAuthService {
            inner,
            expected_key: self.expected_key.clone(),
        }
    }
}

/// API key authentication service wrapper.
#[derive(Clone)]
pub struct ApiKeyAuthService<S> {
    inner: S,
    expected_key: Arc<str>,
}

impl<S> Service<Request<Body>> for ApiKeyAuthService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let authorized = is_authorized(&req, &self.expected_key);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            if authorized {
                debug!("API key authentication successful");
                return inner.call(req).await;
            }

            // Handler never runs on failure
            warn!(
                request_id = req.request_id().unwrap_or("-"),
                path = %req.uri().path(),
                client_ip = %extract_client_ip(&req),
                "Rejected request with missing or invalid API key"
            );
            Ok(AppError::Unauthorized.into_response())
        })
    }
}

/// Check the `X-API-Key` header against the expected secret.
///
/// Absent, non-UTF-8 and mismatched headers are all unauthorized.
fn is_authorized<B>(req: &Request<B>, expected: &str) -> bool {
    req.headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|provided| constant_time_eq(provided, expected))
}

/// Perform constant-time comparison of two strings.
///
/// This prevents timing attacks where an attacker could determine
/// the correct API key by measuring response times.
fn constant_time_eq(a: &str, b: &str) -> bool {
    // Returns 1 if equal, 0 if not
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
