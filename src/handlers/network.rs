//! Request introspection handlers.
//!
//! # Endpoints
//!
//! - `GET /toolbox/api/ip` - Caller address and user agent
//! - `* /toolbox/api/echo` - Mirror of method, headers, query and body

use std::collections::BTreeMap;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Query, Request};
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, Method};
use tracing::instrument;

use crate::envelope::{Envelope, RequestContext};
use crate::error::AppResult;
use crate::middleware::extract_client_ip;
use crate::models::{ClientInfoResponse, EchoResponse};
use crate::services::decode_lossy;

/// Report the caller's IP address and user agent.
///
/// `X-Forwarded-For` overrides the transport peer address when present.
#[instrument(skip_all, fields(request_id = %ctx.request_id))]
pub async fn client_info(ctx: RequestContext, req: Request) -> Envelope<ClientInfoResponse> {
    let ip = extract_client_ip(&req).into_owned();
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default();

    Envelope::wrap(&ctx, ClientInfoResponse { ip, user_agent })
}

/// Echo the request back to the caller.
///
/// Accepts GET, POST, PUT, PATCH, DELETE, OPTIONS and HEAD. HEAD responses
/// have their body stripped by the server as usual; OPTIONS is answered with
/// 200 and the echoed body like any other method.
///
/// Binary bodies never fail: invalid UTF-8 sequences are dropped.
#[instrument(skip_all, fields(request_id = %ctx.request_id, method = %method))]
pub async fn echo(
    ctx: RequestContext,
    method: Method,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Envelope<EchoResponse>> {
    let body = body?;
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();

    Ok(Envelope::wrap(
        &ctx,
        EchoResponse {
            method: method.to_string(),
            headers,
            query: query.into_iter().collect::<BTreeMap<_, _>>(),
            body: decode_lossy(&body),
        },
    ))
}
