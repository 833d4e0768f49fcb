//! Per-request context and the JSON response envelope.
//!
//! Every JSON response carries two metadata fields next to the handler's own
//! output:
//!
//! ```json
//! {
//!   "request_id": "1b4e28ba-2fa1-41d2-883f-0016d3cca427",
//!   "duration_ms": 0.12,
//!   "uuids": ["..."]
//! }
//! ```
//!
//! The [`RequestContext`] is created by [`RequestIdLayer`](crate::middleware::RequestIdLayer)
//! when the request enters the service and handed to handlers through an
//! extractor. Handlers wrap their result with [`Envelope::wrap`], which stamps
//! `duration_ms` at that moment.

use std::time::Instant;

use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::round2;

/// Envelope field carrying the request identifier.
pub const REQUEST_ID_FIELD: &str = "request_id";

/// Envelope field carrying the elapsed processing time.
pub const DURATION_FIELD: &str = "duration_ms";

/// Ephemeral state for a single request.
///
/// Read by handlers, never mutated, dropped once the response is sent.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Opaque unique identifier (UUIDv4)
    pub request_id: String,
    /// Monotonic timestamp taken when the request entered the service
    pub started_at: Instant,
}

impl RequestContext {
    /// Create a context with a freshly generated request ID.
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            started_at: Instant::now(),
        }
    }

    /// Milliseconds elapsed since the request started, rounded to two decimals.
    pub fn elapsed_ms(&self) -> f64 {
        round2(self.started_at.elapsed().as_secs_f64() * 1000.0)
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .ok_or_else(|| {
                AppError::Internal("request context missing, RequestIdLayer not installed".into())
            })
    }
}

/// Response extension marking a body that already carries the envelope.
///
/// Lets the request ID middleware skip re-parsing handler output.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Enveloped;

/// A handler result wrapped with request metadata.
#[derive(Debug)]
pub struct Envelope<T> {
    request_id: String,
    duration_ms: f64,
    payload: T,
}

impl<T: Serialize> Envelope<T> {
    /// Wrap a handler result, computing `duration_ms` now.
    pub fn wrap(ctx: &RequestContext, payload: T) -> Self {
        Self {
            request_id: ctx.request_id.clone(),
            duration_ms: ctx.elapsed_ms(),
            payload,
        }
    }

    /// Flatten into a single JSON object with the metadata first.
    ///
    /// Handler fields named `request_id` or `duration_ms` are discarded.
    pub fn into_map(self) -> Result<Map<String, Value>, AppError> {
        let fields = match serde_json::to_value(self.payload) {
            Ok(Value::Object(fields)) => fields,
            Ok(other) => {
                return Err(AppError::Internal(format!(
                    "envelope payload must be a JSON object, got {other}"
                )));
            }
            Err(e) => return Err(AppError::Internal(format!("envelope serialization: {e}"))),
        };

        let mut map = Map::with_capacity(fields.len() + 2);
        map.insert(REQUEST_ID_FIELD.to_string(), Value::from(self.request_id));
        map.insert(DURATION_FIELD.to_string(), Value::from(self.duration_ms));
        for (key, value) in fields {
            if key != REQUEST_ID_FIELD && key != DURATION_FIELD {
                map.insert(key, value);
            }
        }

        Ok(map)
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        match self.into_map() {
            Ok(map) => {
                let mut response = Json(map).into_response();
                response.extensions_mut().insert(Enveloped);
                response
            }
            Err(e) => e.into_response(),
        }
    }
}
