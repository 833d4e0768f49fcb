//! Input validation shared by the JSON-body handlers.
//!
//! Every failure here is a client error with a message that names the
//! violated constraint. Underlying parser errors are not echoed back.

use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

/// Parse a raw request body into a typed JSON request.
///
/// Content type is not checked; the body only has to be valid JSON of the
/// right shape.
///
/// # Errors
///
/// - empty body: `"Empty body"`
/// - malformed JSON or wrong shape: `"Invalid JSON payload"`
pub fn parse_json_body<T: DeserializeOwned>(raw: &[u8]) -> AppResult<T> {
    if raw.is_empty() {
        return Err(AppError::bad_request("Empty body"));
    }

    serde_json::from_slice(raw).map_err(|e| {
        tracing::debug!(error = %e, "Rejected JSON body");
        AppError::bad_request("Invalid JSON payload")
    })
}

/// Require an optional string field to be present and non-empty.
pub fn require_non_empty<'a>(value: Option<&'a str>, field: &str) -> AppResult<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(format!("Missing {field}"))),
    }
}
