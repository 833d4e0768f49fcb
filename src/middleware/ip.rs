//! Client IP resolution shared by the client-info handler and auth logging.
//!
//! # Resolution Order
//!
//! 1. `X-Forwarded-For` header, verbatim (the whole list, even when empty)
//! 2. Transport peer address from Axum's `ConnectInfo` extension
//! 3. [`UNKNOWN_IP`]
//!
//! # Security Warning: IP Spoofing Risk
//!
//! **The forwarded-for header is client-controlled.** Unless the service sits
//! behind a reverse proxy that overwrites it, callers can report any address
//! they like. The value is informational only and is never used for access
//! control.

use std::borrow::Cow;
use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, Request};

/// Header carrying the original client address when behind a proxy.
pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Fallback IP value when no client IP can be determined.
pub const UNKNOWN_IP: &str = "unknown";

/// Raw `X-Forwarded-For` value when the header is present.
///
/// A proxy chain such as "client, proxy1" is reported as-is, and so is an
/// empty value. Non-UTF-8 bytes are decoded lossily.
#[inline]
fn forwarded_for(headers: &HeaderMap) -> Option<Cow<'_, str>> {
    headers
        .get(FORWARDED_FOR_HEADER)
        .map(|v| String::from_utf8_lossy(v.as_bytes()))
}

/// Resolve the client address from headers and the transport peer.
///
/// Returns `Cow<'static, str>` so the common "unknown" fallback does not allocate.
pub fn resolve_client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Cow<'static, str> {
    if let Some(ip) = forwarded_for(headers) {
        return Cow::Owned(ip.into_owned());
    }

    match peer {
        Some(addr) => Cow::Owned(addr.ip().to_string()),
        None => Cow::Borrowed(UNKNOWN_IP),
    }
}

/// Extract the client IP from a request, including its `ConnectInfo` if present.
///
/// `ConnectInfo` is only set when the server is started with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn extract_client_ip<B>(req: &Request<B>) -> Cow<'static, str> {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    resolve_client_ip(req.headers(), peer)
}
