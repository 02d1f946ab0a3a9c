//! # auth Routes Module
//!
//! - `post.rs`: register, login, logout
//! - `get.rs`: session introspection

pub mod get;
pub mod post;

use crate::auth::guards::allow_authenticated;
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use get::get_session;
use post::{login, logout, register};

/// Builds the `/auth` route group.
///
/// - `POST /auth/register` → `register`
/// - `POST /auth/login` → `login`
/// - `POST /auth/logout` → `logout`
/// - `GET /auth/session` → `get_session` (authenticated)
pub fn auth_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route(
            "/session",
            get(get_session).route_layer(from_fn_with_state(app_state, allow_authenticated)),
        )
}
