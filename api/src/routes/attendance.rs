//! QR attendance endpoints.
//!
//! The scanner app posts the identifier it decoded; a phone camera opening the QR
//! URL posts to `/scan/{identifier}`. Both go through the same guard and
//! the same `AttendanceService::mark`.

use crate::response::{ApiResponse, error_response};
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use services::attendance_service::AttendanceService;

/// - `POST /attendance/mark` → `mark_attendance`
/// - `GET /attendance/today` → `get_today_summary`
pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/mark", post(mark_attendance))
        .route("/today", get(get_today_summary))
}

/// - `POST /scan/{identifier}` → `scan_identifier`
///
/// POST only: the session cookie is `SameSite=Lax`, which still rides along on a
/// cross-site GET navigation.
pub fn scan_routes() -> Router<AppState> {
    Router::new().route("/{identifier}", post(scan_identifier))
}

#[derive(Debug, Deserialize)]
pub struct MarkRequest {
    pub identifier: String,
}

/// POST /api/attendance/mark
///
/// ### Request Body
/// ```json
/// { "identifier": "k3j9x0q1m2n8b7v6c5z4" }
/// ```
///
/// ### Responses
/// - `200 OK` "Attendance marked successfully" or "Attendance already marked for today"
/// - `404 Not Found` ("User not found")
pub async fn mark_attendance(
    State(state): State<AppState>,
    Json(req): Json<MarkRequest>,
) -> Response {
    mark(&state, &req.identifier).await
}

/// POST /api/scan/{identifier}
pub async fn scan_identifier(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Response {
    mark(&state, &identifier).await
}

async fn mark(state: &AppState, identifier: &str) -> Response {
    match AttendanceService::mark(
        state.db(),
        state.notifier(),
        state.settings(),
        identifier,
        state.now(),
    )
    .await
    {
        Ok(outcome) => {
            let message = outcome.status.message();
            (StatusCode::OK, Json(ApiResponse::success(outcome, message))).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// GET /api/attendance/today
///
/// Dashboard counters for the current civil day.
pub async fn get_today_summary(State(state): State<AppState>) -> Response {
    match AttendanceService::today_summary(state.db(), state.settings(), state.now()).await {
        Ok(summary) => (
            StatusCode::OK,
            Json(ApiResponse::success(summary, "Attendance summary retrieved")),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
