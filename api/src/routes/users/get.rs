use crate::response::{ApiResponse, error_response};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use services::AppError;
use services::user_service::{UserProfile, UserService};

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    /// `true` for the imported roster only, `false` for self-registered only.
    pub legacy: Option<bool>,
}

/// GET /api/users
///
/// Roster sorted by name. Optional `?legacy=true|false` filter.
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Response {
    match UserService::list(state.db(), query.legacy).await {
        Ok(users) => (
            StatusCode::OK,
            Json(ApiResponse::success(users, "Users retrieved successfully")),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/users/{user_id}
pub async fn get_user(State(state): State<AppState>, Path(user_id): Path<i64>) -> Response {
    profile_response(UserService::get_by_id(state.db(), user_id).await)
}

/// GET /api/users/email/{email}
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Response {
    profile_response(UserService::get_by_email(state.db(), &email).await)
}

/// GET /api/users/roll/{roll_number}
pub async fn get_user_by_roll_number(
    State(state): State<AppState>,
    Path(roll_number): Path<String>,
) -> Response {
    profile_response(UserService::get_by_roll_number(state.db(), &roll_number).await)
}

fn profile_response(result: Result<UserProfile, AppError>) -> Response {
    match result {
        Ok(profile) => (
            StatusCode::OK,
            Json(ApiResponse::success(profile, "User fetched successfully")),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
