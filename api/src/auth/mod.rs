pub mod claims;
pub mod extractors;
pub mod guards;
pub mod middleware;

pub use claims::{AuthUser, Claims};

use crate::state::AppState;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{Duration, Utc};
use db::models::user;
use jsonwebtoken::{Algorithm, Header, Validation, decode, encode};

/// Name of the session cookie set at login and removed at logout.
pub const AUTH_COOKIE: &str = "auth-token";

/// Generates a signed session token and its expiry timestamp for `user`.
pub fn generate_jwt(
    state: &AppState,
    user: &user::Model,
) -> Result<(String, String), jsonwebtoken::errors::Error> {
    let issued = Utc::now();
    let expiry = issued + Duration::minutes(state.jwt_duration_minutes());

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role,
        iat: issued.timestamp() as usize,
        exp: expiry.timestamp() as usize,
    };

    let token = encode(&Header::default(), &claims, state.encoding_key())?;
    Ok((token, expiry.to_rfc3339()))
}

/// Checks signature (HS256) and expiry; anything else is rejected.
pub fn verify_jwt(state: &AppState, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(token, state.decoding_key(), &Validation::new(Algorithm::HS256))
        .map(|data| data.claims)
}

/// HTTP-only session cookie; `Secure` only in production so local HTTP keeps working.
pub fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(state.secure_cookie())
        .same_site(SameSite::Lax)
        .max_age(time::Duration::minutes(state.jwt_duration_minutes()))
        .build()
}

pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build(AUTH_COOKIE).path("/").build()
}
