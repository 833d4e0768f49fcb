use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Client address and user agent as seen by the service.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClientInfoResponse {
    /// Forwarded-for address if present, else the transport peer address
    pub ip: String,
    /// `User-Agent` header, empty if absent
    pub user_agent: String,
}

/// Current server time in several representations.
#[derive(Debug, Serialize, Deserialize)]
pub struct ServerTimeResponse {
    /// Unix epoch seconds
    pub timestamp: i64,
    /// RFC 3339 in UTC
    pub utc: String,
    /// RFC 3339 in the server's local offset
    pub local: String,
}

/// Query parameters for UUID generation.
#[derive(Debug, Deserialize)]
pub struct UuidQuery {
    /// How many UUIDs to generate (1-20)
    #[serde(default = "default_uuid_count")]
    pub count: i64,
}

fn default_uuid_count() -> i64 {
    1
}

/// Generated UUIDs.
#[derive(Debug, Serialize, Deserialize)]
pub struct UuidResponse {
    pub count: i64,
    pub uuids: Vec<Uuid>,
}

/// Pretty-printed JSON document.
#[derive(Debug, Serialize, Deserialize)]
pub struct FormatJsonResponse {
    pub formatted: String,
}

/// Request to hash a piece of text.
#[derive(Debug, Default, Deserialize)]
pub struct HashRequest {
    /// Text to hash (required, non-empty)
    #[serde(default)]
    pub text: Option<String>,
    /// `md5` or `sha256`, case-insensitive
    #[serde(default)]
    pub algo: Option<String>,
}

/// Hex digest of the submitted text.
#[derive(Debug, Serialize, Deserialize)]
pub struct HashResponse {
    /// Canonical lowercase algorithm name
    pub algo: String,
    /// Lowercase hex digest
    pub hash: String,
}

/// Request to decode a JWT without verifying it.
#[derive(Debug, Default, Deserialize)]
pub struct JwtDecodeRequest {
    #[serde(default)]
    pub token: Option<String>,
}

/// Decoded JWT segments.
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtDecodeResponse {
    pub header: Map<String, Value>,
    pub payload: Map<String, Value>,
    /// Whether `exp` is present and not after `now`
    pub expired: bool,
    /// Epoch seconds used for the expiry check
    pub now: i64,
}

/// Mirror of the incoming request.
#[derive(Debug, Serialize, Deserialize)]
pub struct EchoResponse {
    pub method: String,
    /// Lowercase header names; repeated headers keep the last value
    pub headers: BTreeMap<String, String>,
    /// Decoded query parameters; repeated keys keep the last value
    pub query: BTreeMap<String, String>,
    /// Body decoded as UTF-8 with invalid bytes dropped
    pub body: String,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Configured application version
    pub version: String,
    /// Seconds since the service started, two decimals
    pub uptime_seconds: f64,
}
