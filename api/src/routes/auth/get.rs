use crate::auth::AuthUser;
use crate::response::ApiResponse;
use axum::{Extension, Json, http::StatusCode, response::IntoResponse};
use db::models::user::Role;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user_id: i64,
    pub email: String,
    pub role: Role,
}

/// GET /api/auth/session
///
/// Echoes the verified claims of the current session.
pub async fn get_session(Extension(AuthUser(claims)): Extension<AuthUser>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            SessionResponse {
                user_id: claims.sub,
                email: claims.email,
                role: claims.role,
            },
            "Session active",
        )),
    )
}
