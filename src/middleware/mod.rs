//! HTTP middleware for authentication and the response envelope.
//!
//! # Architecture
//!
//! ```text
//! Request → Request ID → CORS → Trace → Body Limit → [Auth] → Handler → Response
//!               ↓                                       ↓
//!       X-Request-ID header,                       401 Unauthorized
//!       request_id/duration_ms                    (protected routes only)
//! ```
//!
//! # Security Considerations
//!
//! - API key comparison uses constant-time equality to prevent timing attacks
//! - The auth gate is attached with `route_layer`, so health is never gated
//! - Request IDs enable correlating client-visible errors with server logs

pub mod auth;
pub mod ip;
pub mod request_id;

pub use auth::{API_KEY_HEADER, ApiKeyAuth};
pub use ip::{UNKNOWN_IP, extract_client_ip, resolve_client_ip};
pub use request_id::{REQUEST_ID_HEADER, RequestIdExt, RequestIdLayer};
