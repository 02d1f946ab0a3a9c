use crate::response::{ApiResponse, error_response};
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use services::user_service::{ReviewInput, UserService};

/// Builds the `/recruitments` route group. Guarded by `allow_scanner` in `routes`.
///
/// - `GET /recruitments` → `list_recruitments`
/// - `PUT /recruitments/{user_id}/review` → `review_recruitment`
pub fn recruitments_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_recruitments))
        .route("/{user_id}/review", put(review_recruitment))
}

/// GET /api/recruitments
///
/// Every record newest first, one per email, with attendance history and review
/// fields.
pub async fn list_recruitments(State(state): State<AppState>) -> Response {
    match UserService::recruitments(state.db()).await {
        Ok(rows) => (
            StatusCode::OK,
            Json(ApiResponse::success(rows, "Recruitments retrieved successfully")),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// PUT /api/recruitments/{user_id}/review
///
/// `review` (0 to 10) and `comment` are replaced on every call, so omitting them
/// clears them. Round flags are only touched when present.
///
/// ### Request Body
/// ```json
/// { "review": 8, "comment": "strong", "round_one_qualified": true }
/// ```
pub async fn review_recruitment(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<ReviewInput>,
) -> Response {
    match UserService::review(state.db(), user_id, req).await {
        Ok(user) => (
            StatusCode::OK,
            Json(ApiResponse::success(user, "Review updated successfully")),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
