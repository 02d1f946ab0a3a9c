use crate::response::{ApiResponse, Empty, error_response};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::user::Role;
use serde::Deserialize;
use services::user_service::UserService;

#[derive(Debug, Deserialize)]
pub struct SetPasswordRequest {
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

/// PUT /api/users/{user_id}/role
///
/// ### Request Body
/// ```json
/// { "role": "member" }
/// ```
pub async fn update_user_role(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateRoleRequest>,
) -> Response {
    match UserService::set_role(state.db(), user_id, req.role).await {
        Ok(user) => (
            StatusCode::OK,
            Json(ApiResponse::success(user, "Role updated successfully")),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// PUT /api/users/{user_id}/password
///
/// Sets a password for any record, including legacy ones that never had one.
///
/// ### Request Body
/// ```json
/// { "password": "new-password" }
/// ```
///
/// ### Responses
/// - `200 OK` "Password updated successfully"
/// - `400 Bad Request` empty password
/// - `404 Not Found`
pub async fn set_user_password(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<SetPasswordRequest>,
) -> Response {
    match UserService::set_password(state.db(), user_id, &req.password).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Password updated successfully")),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
