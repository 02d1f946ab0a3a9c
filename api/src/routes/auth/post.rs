use crate::auth::{expired_session_cookie, generate_jwt, session_cookie};
use crate::response::{ApiResponse, Empty, error_response};
use crate::state::AppState;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use common::format_validation_errors;
use db::models::user;
use serde::{Deserialize, Serialize};
use services::user_service::{RegisterUser, UserService};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct LoginResponse {
    pub id: i64,
    pub role: String,
    pub token: String,
    pub expires_at: String,
}

/// POST /api/auth/register
///
/// Self-service sign-up. Creates a `user`-role record with a fresh QR token and
/// emails the welcome message with the QR image.
///
/// ### Responses
/// - `201 Created` with the new record
/// - `400 Bad Request` when a required field is missing
/// - `409 Conflict` ("User with this email or roll number already exists.")
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterUser>,
) -> Response {
    match UserService::register(state.db(), state.notifier(), state.settings(), req).await {
        Ok(user) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(user, "User registered successfully")),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/auth/login
///
/// Verifies credentials, then sets the `auth-token` cookie and returns the token
/// for clients that prefer a Bearer header.
///
/// ### Responses
/// - `200 OK` with `{ id, role, token, expires_at }`
/// - `400 Bad Request` on malformed input
/// - `401 Unauthorized` ("Invalid credentials" or "Please contact admin to set your password.")
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Response {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<LoginResponse>::error(error_message)),
        )
            .into_response();
    }

    let user = match UserService::authenticate(state.db(), &req.email, &req.password).await {
        Ok(user) => user,
        Err(e) => return error_response(e),
    };

    issue_session(&state, jar, &user)
}

fn issue_session(state: &AppState, jar: CookieJar, user: &user::Model) -> Response {
    let (token, expires_at) = match generate_jwt(state, user) {
        Ok(issued) => issued,
        Err(e) => {
            tracing::error!(error = %e, user_id = user.id, "Token encoding failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<LoginResponse>::error("Failed to issue session token")),
            )
                .into_response();
        }
    };

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    let jar = jar.add(session_cookie(state, token.clone()));
    let body = LoginResponse {
        id: user.id,
        role: user.role.to_string(),
        token,
        expires_at,
    };

    (
        StatusCode::OK,
        jar,
        Json(ApiResponse::success(body, "Login successful")),
    )
        .into_response()
}

/// POST /api/auth/logout
///
/// Clears the session cookie. Tokens are stateless, so nothing is revoked server-side.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (
        StatusCode::OK,
        jar.remove(expired_session_cookie()),
        Json(ApiResponse::success(Empty, "Logged out")),
    )
}
