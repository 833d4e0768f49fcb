//! Clock and randomness handlers.

use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use chrono::{Local, SecondsFormat, Utc};
use tracing::instrument;

use crate::envelope::{Envelope, RequestContext};
use crate::error::AppResult;
use crate::models::{ServerTimeResponse, UuidQuery, UuidResponse};
use crate::services::generate::{count_error, generate_uuids};

/// Current server time.
///
/// # Response Body
///
/// ```json
/// {
///   "timestamp": 1705315800,
///   "utc": "2024-01-15T10:30:00.123456+00:00",
///   "local": "2024-01-15T11:30:00.123456+01:00"
/// }
/// ```
#[instrument(skip_all, fields(request_id = %ctx.request_id))]
pub async fn server_time(ctx: RequestContext) -> Envelope<ServerTimeResponse> {
    let now = Utc::now();
    let local = now.with_timezone(&Local);

    Envelope::wrap(
        &ctx,
        ServerTimeResponse {
            timestamp: now.timestamp(),
            utc: now.to_rfc3339_opts(SecondsFormat::Micros, false),
            local: local.to_rfc3339_opts(SecondsFormat::Micros, false),
        },
    )
}

/// Generate between 1 and 20 random UUIDs.
///
/// `count` defaults to 1. Non-integer and out-of-range values are 400s.
#[instrument(skip_all, fields(request_id = %ctx.request_id))]
pub async fn generate_uuid(
    ctx: RequestContext,
    query: Result<Query<UuidQuery>, QueryRejection>,
) -> AppResult<Envelope<UuidResponse>> {
    let Query(params) = query.map_err(|_| count_error())?;
    let uuids = generate_uuids(params.count)?;

    Ok(Envelope::wrap(
        &ctx,
        UuidResponse {
            count: params.count,
            uuids,
        },
    ))
}
