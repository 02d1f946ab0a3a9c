use crate::response::{ApiResponse, error_response};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::event_service::{CreateEvent, EventAttendanceInput, EventService};

/// POST /api/events
///
/// ### Request Body
/// ```json
/// { "name": "Placement Drive", "date": "2024-08-01" }
/// ```
pub async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<CreateEvent>,
) -> Response {
    match EventService::create(state.db(), req).await {
        Ok(event) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(event, "Event created successfully")),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/events/{event_id}/attendance
///
/// Appends one row to the event's own attendance list.
pub async fn add_event_attendance(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    Json(req): Json<EventAttendanceInput>,
) -> Response {
    match EventService::add_attendance(state.db(), event_id, req).await {
        Ok(row) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(row, "Attendance recorded")),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/events/{event_id}/remind
///
/// Emails every registrant and everyone who named the event at sign-up. Waits for
/// all sends and reports how many went through.
///
/// ### Response
/// ```json
/// { "success": true, "data": { "recipients": 12, "sent": 11, "failed": 1 }, "message": "Sent 11 reminders, 1 failed" }
/// ```
pub async fn send_event_reminders(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Response {
    match EventService::remind(state.db(), state.notifier(), state.settings(), event_id).await {
        Ok(report) => {
            let message = format!("Sent {} reminders, {} failed", report.sent, report.failed);
            (StatusCode::OK, Json(ApiResponse::success(report, message))).into_response()
        }
        Err(e) => error_response(e),
    }
}
