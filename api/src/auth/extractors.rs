use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, request::Parts},
};
use axum_extra::extract::{CookieJar, TypedHeader};
use headers::{Authorization, authorization::Bearer};

use crate::auth::claims::AuthUser;
use crate::auth::{AUTH_COOKIE, verify_jwt};
use crate::state::AppState;

/// Implements extraction of `AuthUser` from the request.
///
/// The token is read from the `auth-token` cookie, falling back to a Bearer
/// `Authorization` header for non-browser clients. Every extraction verifies the
/// signature and expiry; a guard that already did so leaves the result in the
/// request extensions and it is reused.
///
/// # Errors
/// - Returns `401 Unauthorized` if no token is present, or it is malformed, forged or expired.
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let app_state = AppState::from_ref(state);

        let token = match CookieJar::from_headers(&parts.headers).get(AUTH_COOKIE) {
            Some(cookie) => cookie.value().to_string(),
            None => {
                let TypedHeader(Authorization(bearer)) =
                    TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                        .await
                        .map_err(|_| (StatusCode::UNAUTHORIZED, "Missing session token"))?;
                bearer.token().to_string()
            }
        };

        let claims = verify_jwt(&app_state, &token)
            .map_err(|_| (StatusCode::UNAUTHORIZED, "Invalid or expired token"))?;

        Ok(AuthUser(claims))
    }
}
