use crate::response::{ApiResponse, error_response};
use crate::state::AppState;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use services::user_service::{BulkEntry, UserService};

#[derive(Debug, Deserialize)]
pub struct BulkAddRequest {
    pub users: Vec<BulkEntry>,
}

/// POST /api/users
///
/// Creates each entry with the default member password. One bad entry does not
/// stop the rest; the response lists a result per entry.
///
/// ### Request Body
/// ```json
/// { "users": [ { "name": "Asha", "email": "a@x.com", "roll_number": "R1", "legacy": true } ] }
/// ```
pub async fn bulk_add_users(
    State(state): State<AppState>,
    Json(req): Json<BulkAddRequest>,
) -> Response {
    if req.users.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Vec<()>>::error("No users provided")),
        )
            .into_response();
    }

    match UserService::bulk_add(state.db(), state.notifier(), state.settings(), req.users).await {
        Ok(results) => {
            let created = results.iter().filter(|r| r.created).count();
            let message = format!("Created {created} of {} users", results.len());
            (StatusCode::OK, Json(ApiResponse::success(results, message))).into_response()
        }
        Err(e) => error_response(e),
    }
}
