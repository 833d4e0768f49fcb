//! Health endpoint.
//!
//! `GET /toolbox/api/health` never requires an API key, so load balancers and
//! orchestrators can probe it freely.

use axum::extract::State;
use tracing::instrument;

use crate::envelope::{Envelope, RequestContext};
use crate::models::HealthResponse;
use crate::state::AppState;

/// Health check endpoint.
///
/// Always returns 200 OK while the process is alive.
///
/// # Response Body
///
/// ```json
/// {
///   "request_id": "…",
///   "duration_ms": 0.03,
///   "version": "1.0.0",
///   "uptime_seconds": 3600.25
/// }
/// ```
#[instrument(skip_all, fields(request_id = %ctx.request_id))]
pub async fn health_check(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Envelope<HealthResponse> {
    Envelope::wrap(
        &ctx,
        HealthResponse {
            version: state.config.app_version.clone(),
            uptime_seconds: state.uptime_seconds(),
        },
    )
}
