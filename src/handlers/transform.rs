//! Text transformation handlers.
//!
//! # Endpoints
//!
//! - `POST /toolbox/api/json/format` - Pretty-print a raw JSON body
//! - `POST /toolbox/api/hash` - Hex digest of `{text, algo}`
//! - `POST /toolbox/api/jwt/decode` - Decode a JWT's header and payload
//!
//! Bodies are read as raw bytes and parsed here so that every malformed
//! input, oversized bodies included, maps to a `{"detail": ...}` error rather
//! than an extractor rejection.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use chrono::Utc;
use tracing::instrument;

use crate::envelope::{Envelope, RequestContext};
use crate::error::AppResult;
use crate::models::{
    FormatJsonResponse, HashRequest, HashResponse, JwtDecodeRequest, JwtDecodeResponse,
};
use crate::services::{self, HashAlgorithm};
use crate::validation::{parse_json_body, require_non_empty};

/// Pretty-print the request body with two-space indentation.
#[instrument(skip_all, fields(request_id = %ctx.request_id))]
pub async fn format_json(
    ctx: RequestContext,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Envelope<FormatJsonResponse>> {
    let body = body?;
    let formatted = services::format_json(&body)?;

    Ok(Envelope::wrap(&ctx, FormatJsonResponse { formatted }))
}

/// Hash text with MD5 or SHA-256.
///
/// # Request Body
///
/// ```json
/// { "text": "abc", "algo": "sha256" }
/// ```
#[instrument(skip_all, fields(request_id = %ctx.request_id))]
pub async fn hash_text(
    ctx: RequestContext,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Envelope<HashResponse>> {
    let body = body?;
    let request: HashRequest = parse_json_body(&body)?;
    let text = require_non_empty(request.text.as_deref(), "text")?;
    let algo: HashAlgorithm = request.algo.as_deref().unwrap_or_default().parse()?;

    Ok(Envelope::wrap(
        &ctx,
        HashResponse {
            algo: algo.to_string(),
            hash: services::hex_digest(algo, text),
        },
    ))
}

/// Decode a JWT without verifying its signature.
///
/// # Request Body
///
/// ```json
/// { "token": "eyJhbGciOiJIUzI1NiJ9.eyJleHAiOjF9.sig" }
/// ```
#[instrument(skip_all, fields(request_id = %ctx.request_id))]
pub async fn decode_jwt(
    ctx: RequestContext,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Envelope<JwtDecodeResponse>> {
    let body = body?;
    let request: JwtDecodeRequest = parse_json_body(&body)?;
    let token = require_non_empty(request.token.as_deref(), "token")?;
    let decoded = services::decode_jwt(token)?;

    let now = Utc::now().timestamp();
    let expired = decoded.is_expired(now);

    Ok(Envelope::wrap(
        &ctx,
        JwtDecodeResponse {
            header: decoded.header,
            payload: decoded.payload,
            expired,
            now,
        },
    ))
}
