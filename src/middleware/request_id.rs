//! Request ID and envelope middleware.
//!
//! # Features
//!
//! - Generates a UUIDv4 [`RequestContext`] for every incoming request
//! - Stores the context in request extensions for handlers to extract
//! - Adds `X-Request-ID` to all responses, success or failure
//! - Fills `request_id` and `duration_ms` into JSON bodies that handlers did
//!   not wrap themselves (errors, auth rejections, 404s)
//! - Exposes the ID to inner layers, so the HTTP trace span can carry it
//!
//! This layer must be the outermost one so that responses produced by other
//! middleware (such as the auth gate) are stamped as well.

use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderValue};
use axum::http::{HeaderMap, Request, Response};
use axum::response::IntoResponse;
use serde_json::{Map, Value};
use tower::{Layer, Service};
use tracing::{debug, warn};

use crate::envelope::{DURATION_FIELD, Enveloped, REQUEST_ID_FIELD, RequestContext};
use crate::error::AppError;

/// Header name for request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Fallback header value when request ID parsing fails.
/// Using `from_static` avoids runtime parsing and is infallible.
static UNKNOWN_REQUEST_ID: HeaderValue = HeaderValue::from_static("unknown");

/// Request ID layer for Tower middleware stack.
#[derive(Clone, Default)]
pub struct RequestIdLayer;

impl RequestIdLayer {
    /// Create a new request ID layer.
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Request ID service wrapper.
#[derive(Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for RequestIdService<S>
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

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let context = RequestContext::new();
        let header_value = context
            .request_id
            .parse()
            .unwrap_or_else(|_| UNKNOWN_REQUEST_ID.clone());

        req.extensions_mut().insert(context.clone());

        debug!(request_id = %context.request_id, method = %req.method(), path = %req.uri().path(), "Processing request");

        let mut inner = self.inner.clone();

        Box::pin(async move {
            let response = inner.call(req).await?;

            let mut response = fill_envelope(response, &context).await;
            response.headers_mut().insert(REQUEST_ID_HEADER, header_value);

            Ok(response)
        })
    }
}

/// Check whether a response declares a JSON body.
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

/// Merge envelope metadata into a JSON response that lacks it.
///
/// `request_id` is always set to the context's ID. An existing numeric
/// `duration_ms` is kept, otherwise it is computed now. Responses that are
/// not JSON objects pass through untouched.
async fn fill_envelope(response: Response<Body>, ctx: &RequestContext) -> Response<Body> {
    if response.extensions().get::<Enveloped>().is_some() || !is_json(response.headers()) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(request_id = %ctx.request_id, error = %e, "Failed to buffer response body");
            return AppError::Internal(format!("response body: {e}")).into_response();
        }
    };

    let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(&bytes) else {
        return Response::from_parts(parts, Body::from(bytes));
    };

    let merged = merge_metadata(fields, ctx);
    match serde_json::to_vec(&merged) {
        Ok(body) => {
            parts.headers.remove(CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(body))
        }
        Err(e) => {
            warn!(request_id = %ctx.request_id, error = %e, "Failed to re-encode response body");
            Response::from_parts(parts, Body::from(bytes))
        }
    }
}

/// Build the enveloped object: metadata first, then the original fields.
fn merge_metadata(mut fields: Map<String, Value>, ctx: &RequestContext) -> Map<String, Value> {
    let duration = match fields.remove(DURATION_FIELD) {
        Some(Value::Number(n)) if n.as_f64().is_some_and(|d| d >= 0.0) => Value::Number(n),
        _ => Value::from(ctx.elapsed_ms()),
    };
    fields.remove(REQUEST_ID_FIELD);

    let mut merged = Map::with_capacity(fields.len() + 2);
    merged.insert(REQUEST_ID_FIELD.to_string(), Value::from(ctx.request_id.clone()));
    merged.insert(DURATION_FIELD.to_string(), duration);
    merged.extend(fields);
    merged
}

/// Extension trait to extract the request context from requests.
pub trait RequestIdExt {
    /// Get the request ID assigned by [`RequestIdLayer`].
    fn request_id(&self) -> Option<&str>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&str> {
        self.extensions()
            .get::<RequestContext>()
            .map(|ctx| ctx.request_id.as_str())
    }
}
