use crate::response::{ApiResponse, error_response};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::event_service::EventService;

/// GET /api/events
///
/// Newest first.
pub async fn list_events(State(state): State<AppState>) -> Response {
    match EventService::list(state.db()).await {
        Ok(events) => (
            StatusCode::OK,
            Json(ApiResponse::success(events, "Events retrieved successfully")),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/events/{event_id}
///
/// The event with its registered users and its attendance sub-list.
pub async fn get_event(State(state): State<AppState>, Path(event_id): Path<i64>) -> Response {
    match EventService::get(state.db(), event_id).await {
        Ok(detail) => (
            StatusCode::OK,
            Json(ApiResponse::success(detail, "Event retrieved successfully")),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
