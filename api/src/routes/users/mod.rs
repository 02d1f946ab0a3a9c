//! # users Routes Module
//!
//! Roster lookups are open to members and admins; creating records, changing
//! roles and setting passwords is admin-only.

pub mod get;
pub mod post;
pub mod put;

use crate::auth::guards::{allow_admin, allow_scanner};
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};

use get::{get_user, get_user_by_email, get_user_by_roll_number, list_users};
use post::bulk_add_users;
use put::{set_user_password, update_user_role};

/// - `GET /users?legacy=` → `list_users`
/// - `GET /users/{user_id}` → `get_user`
/// - `GET /users/email/{email}` → `get_user_by_email`
/// - `GET /users/roll/{roll_number}` → `get_user_by_roll_number`
/// - `POST /users` → `bulk_add_users` (admin)
/// - `PUT /users/{user_id}/role` → `update_user_role` (admin)
/// - `PUT /users/{user_id}/password` → `set_user_password` (admin)
pub fn users_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_users).route_layer(from_fn_with_state(app_state.clone(), allow_scanner)),
        )
        .route(
            "/",
            post(bulk_add_users).route_layer(from_fn_with_state(app_state.clone(), allow_admin)),
        )
        .route(
            "/{user_id}",
            get(get_user).route_layer(from_fn_with_state(app_state.clone(), allow_scanner)),
        )
        .route(
            "/email/{email}",
            get(get_user_by_email)
                .route_layer(from_fn_with_state(app_state.clone(), allow_scanner)),
        )
        .route(
            "/roll/{roll_number}",
            get(get_user_by_roll_number)
                .route_layer(from_fn_with_state(app_state.clone(), allow_scanner)),
        )
        .route(
            "/{user_id}/role",
            put(update_user_role).route_layer(from_fn_with_state(app_state.clone(), allow_admin)),
        )
        .route(
            "/{user_id}/password",
            put(set_user_password).route_layer(from_fn_with_state(app_state, allow_admin)),
        )
}
