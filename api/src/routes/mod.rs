//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness probe (public)
//! - `/auth` → register, login, logout (public) and session introspection
//! - `/me` → the caller's own record and attendance (authenticated)
//! - `/users` → roster lookups (members and admins), bulk add and roles (admin)
//! - `/recruitments` → review grid and review edits (members and admins)
//! - `/attendance` → scanner submissions and today's counters (members and admins)
//! - `/scan/{identifier}` → the URL printed in every QR code (members and admins)
//! - `/events` → public listing; everything else admin

use crate::auth::guards::{allow_authenticated, allow_scanner};
use crate::routes::{
    attendance::{attendance_routes, scan_routes},
    auth::auth_routes,
    events::events_routes,
    health::health_routes,
    me::me_routes,
    recruitments::recruitments_routes,
    users::users_routes,
};
use crate::state::AppState;
use axum::{Router, middleware::from_fn_with_state};

pub mod attendance;
pub mod auth;
pub mod events;
pub mod health;
pub mod me;
pub mod recruitments;
pub mod users;

/// Builds the complete application router for all HTTP endpoints.
///
/// Groups with a uniform access rule get their guard here; `users`, `auth` and
/// `events` mix rules and attach guards per route.
pub fn routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes(app_state.clone()))
        .nest(
            "/me",
            me_routes().route_layer(from_fn_with_state(app_state.clone(), allow_authenticated)),
        )
        .nest("/users", users_routes(app_state.clone()))
        .nest(
            "/recruitments",
            recruitments_routes().route_layer(from_fn_with_state(app_state.clone(), allow_scanner)),
        )
        .nest(
            "/attendance",
            attendance_routes().route_layer(from_fn_with_state(app_state.clone(), allow_scanner)),
        )
        .nest(
            "/scan",
            scan_routes().route_layer(from_fn_with_state(app_state.clone(), allow_scanner)),
        )
        .nest("/events", events_routes(app_state))
}
