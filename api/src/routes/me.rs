use crate::auth::AuthUser;
use crate::response::{ApiResponse, Empty, error_response};
use crate::state::AppState;
use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use services::user_service::{ChangePassword, UserService};

/// Builds the `/me` route group. Guarded by `allow_authenticated` in `routes`.
pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_me))
        .route("/password", put(change_my_password))
}

/// GET /api/me
///
/// The caller's own record (including the QR URL) and attendance history, for the
/// student dashboard.
///
/// ### Responses
/// - `200 OK`
/// - `404 Not Found` if the record behind the session was deleted
pub async fn get_me(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Response {
    match UserService::get_by_id(state.db(), claims.sub).await {
        Ok(profile) => (
            StatusCode::OK,
            Json(ApiResponse::success(profile, "User fetched successfully")),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// PUT /api/me/password
///
/// ### Request Body
/// ```json
/// { "current_password": "welcome123", "new_password": "something-else" }
/// ```
///
/// ### Responses
/// - `200 OK` "Password changed successfully"
/// - `400 Bad Request` missing fields, wrong current password, or no password set yet
pub async fn change_my_password(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<ChangePassword>,
) -> Response {
    match UserService::change_password(state.db(), claims.sub, req).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Password changed successfully")),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
