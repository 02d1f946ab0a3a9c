use crate::auth::claims::AuthUser;
use crate::response::{ApiResponse, Empty};
use crate::state::AppState;
use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use db::models::user::Role;

type Denied = (StatusCode, Json<ApiResponse<Empty>>);

/// Verifies the session and stores the claims in the request extensions so
/// handlers can take `Extension<AuthUser>` without decoding the token again.
async fn extract_and_insert_authuser(
    state: &AppState,
    req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), Denied> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, state)
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Denied> {
    let (req, _user) = extract_and_insert_authuser(&state, req).await?;

    Ok(next.run(req).await)
}

/// Members and admins: QR scanning, roster lookups and reviews.
pub async fn allow_scanner(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Denied> {
    let (req, user) = extract_and_insert_authuser(&state, req).await?;

    if !user.0.role.can_scan() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Member or admin access required")),
        ));
    }

    Ok(next.run(req).await)
}

/// Admin-only guard.
pub async fn allow_admin(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Denied> {
    let (req, user) = extract_and_insert_authuser(&state, req).await?;

    if user.0.role != Role::Admin {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Admin access required")),
        ));
    }

    Ok(next.run(req).await)
}
