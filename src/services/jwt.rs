//! JSON Web Token decoding for inspection.
//!
//! This is a display/debug decoder, **not** a verifier: the signature segment
//! is ignored entirely and no claim besides `exp` is interpreted.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

/// Decoded header and payload of a token.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedJwt {
    pub header: Map<String, Value>,
    pub payload: Map<String, Value>,
}

impl DecodedJwt {
    /// Whether the token has expired at `now` (epoch seconds).
    ///
    /// True iff an `exp` claim is present and `now >= exp` after truncating
    /// `exp` to an integer. Booleans count as 1 and 0. A missing or `null`
    /// claim never expires, and neither does one that is not numeric.
    pub fn is_expired(&self, now: i64) -> bool {
        self.payload
            .get("exp")
            .and_then(exp_seconds)
            .is_some_and(|exp| now >= exp)
    }
}

/// Interpret an `exp` claim as integer epoch seconds.
fn exp_seconds(exp: &Value) -> Option<i64> {
    match exp {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// Split a token and decode its header and payload segments.
///
/// # Errors
///
/// - fewer than two dot-separated parts: `"Invalid JWT format"`
/// - any decode or parse failure on either segment: `"Failed to decode JWT"`
pub fn decode_jwt(token: &str) -> AppResult<DecodedJwt> {
    let mut parts = token.split('.');
    let (Some(header), Some(payload)) = (parts.next(), parts.next()) else {
        return Err(AppError::bad_request("Invalid JWT format"));
    };

    let decoded = decode_segment(header)
        .zip(decode_segment(payload))
        .map(|(header, payload)| DecodedJwt { header, payload });

    decoded.ok_or_else(|| AppError::bad_request("Failed to decode JWT"))
}

/// Decode one base64url segment into a JSON object.
///
/// The segment is padded with `=` to a multiple of four before decoding.
/// Failures collapse to `None` so no decoder detail reaches the caller.
pub fn decode_segment(segment: &str) -> Option<Map<String, Value>> {
    let padding = (4 - segment.len() % 4) % 4;
    let mut padded = String::with_capacity(segment.len() + padding);
    padded.push_str(segment);
    padded.extend(std::iter::repeat_n('=', padding));

    let bytes = URL_SAFE.decode(padded.as_bytes()).ok()?;
    match serde_json::from_slice(&bytes).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
