use axum::{extract::State, http::StatusCode, Extension, Json};

use pricewatch_store::LogEntry;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

/// `GET /api/logs`: every logged outcome, oldest first.
pub(super) async fn list_logs(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<Vec<LogEntry>>, ApiError> {
    state.log_store.read_all().await.map(Json).map_err(|e| {
        tracing::error!(request_id = %req_id.0, error = %e, "failed to read check log");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "failed to read logs")
    })
}
