//! # events Routes Module
//!
//! Listing is public so the registration form can offer events; everything else
//! is admin-only.

pub mod delete;
pub mod get;
pub mod post;

use crate::auth::guards::allow_admin;
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};

use delete::delete_event;
use get::{get_event, list_events};
use post::{add_event_attendance, create_event, send_event_reminders};

/// - `GET /events` → `list_events` (public)
/// - `POST /events` → `create_event`
/// - `GET /events/{event_id}` → `get_event`
/// - `DELETE /events/{event_id}` → `delete_event`
/// - `POST /events/{event_id}/attendance` → `add_event_attendance`
/// - `POST /events/{event_id}/remind` → `send_event_reminders`
pub fn events_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_events))
        .route(
            "/",
            post(create_event).route_layer(from_fn_with_state(app_state.clone(), allow_admin)),
        )
        .route(
            "/{event_id}",
            get(get_event).route_layer(from_fn_with_state(app_state.clone(), allow_admin)),
        )
        .route(
            "/{event_id}",
            delete(delete_event).route_layer(from_fn_with_state(app_state.clone(), allow_admin)),
        )
        .route(
            "/{event_id}/attendance",
            post(add_event_attendance)
                .route_layer(from_fn_with_state(app_state.clone(), allow_admin)),
        )
        .route(
            "/{event_id}/remind",
            post(send_event_reminders).route_layer(from_fn_with_state(app_state, allow_admin)),
        )
}
