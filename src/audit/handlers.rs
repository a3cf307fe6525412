use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{AuditRequest, AuditResponse},
    services::run_audit,
};
use crate::{error::AuditError, state::AppState};

/// Photos travel inline as base64.
const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

pub fn audit_routes() -> Router<AppState> {
    Router::new()
        .route("/audit-dish", post(audit_dish))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}

/// POST /audit-dish { orderId, photoUrls }
///
/// The body is parsed as JSON whatever its `Content-Type` says.
#[instrument(skip(state, body))]
pub async fn audit_dish(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AuditResponse>, AuditError> {
    let request: AuditRequest = serde_json::from_slice(&body)?;
    info!(
        order_id = %request.order_ref(),
        photos = request.photo_urls.as_ref().map_or(0, Vec::len),
        "audit received"
    );

    Ok(Json(run_audit(&state, &request).await))
}
