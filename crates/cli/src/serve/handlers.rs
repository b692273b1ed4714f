//! Core HTTP route handlers: banner, funnel persistence, recovery estimates.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use activateflow_core::{estimate_recovery, FunnelSnapshot, FunnelSubmission, RecoveryRequest};

use super::json_error;
use super::state::AppState;

/// Fallback handler for unmatched routes.
pub(crate) async fn handle_not_found() -> impl IntoResponse {
    json_error(StatusCode::NOT_FOUND, "not found")
}

/// GET /health
pub(crate) async fn handle_health() -> impl IntoResponse {
    let response = serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(response))
}

/// GET /api/
pub(crate) async fn handle_api_root() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({"message": "ActivateFlow API"})),
    )
}

/// POST /api/funnel
///
/// Assigns a fresh id and UTC timestamp, persists the snapshot, and returns
/// the fully populated record. Exactly one document is appended; nothing is
/// modified.
pub(crate) async fn handle_submit_funnel(
    State(state): State<Arc<AppState>>,
    Json(submission): Json<FunnelSubmission>,
) -> impl IntoResponse {
    let snapshot = FunnelSnapshot::from_submission(submission);

    match state.store.insert_snapshot(&snapshot).await {
        Ok(()) => {
            tracing::debug!(
                id = %snapshot.id,
                stages = snapshot.stages.len(),
                "stored funnel snapshot"
            );
            (StatusCode::OK, Json(snapshot)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to store funnel snapshot");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("failed to store snapshot: {}", e),
            )
            .into_response()
        }
    }
}

/// GET /api/funnel/latest
///
/// The snapshot with the maximum timestamp, or JSON null when none exist.
/// Equal timestamps resolve to the most recently inserted snapshot.
pub(crate) async fn handle_latest_funnel(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.latest_snapshot().await {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to read latest funnel snapshot");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("failed to read latest snapshot: {}", e),
            )
            .into_response()
        }
    }
}

/// POST /api/recovery/calculate
///
/// Pure arithmetic; no persistence, no side effects.
pub(crate) async fn handle_calculate_recovery(
    Json(request): Json<RecoveryRequest>,
) -> impl IntoResponse {
    (StatusCode::OK, Json(estimate_recovery(&request)))
}
