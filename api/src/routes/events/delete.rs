use crate::response::{ApiResponse, Empty, error_response};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::event_service::EventService;

/// DELETE /api/events/{event_id}
///
/// Registrations and the attendance sub-list go with it.
pub async fn delete_event(State(state): State<AppState>, Path(event_id): Path<i64>) -> Response {
    match EventService::delete(state.db(), event_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Event deleted successfully")),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
