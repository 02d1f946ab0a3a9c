use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use services::AppError;

/// Standardized API response wrapper for all outgoing JSON responses.
///
/// ```json
/// {
///   "success": true,
///   "data": { ... },
///   "message": "Attendance marked successfully"
/// }
/// ```
///
/// Error responses carry `T::default()` as `data`.
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}

/// Payload for responses that carry no data.
#[derive(Serialize, Default)]
pub struct Empty;

/// Maps a service failure onto its status code and the error envelope.
///
/// Storage and internal failures are logged here and reach the client only as a
/// generic message.
pub fn error_response(err: AppError) -> Response {
    let (status, message) = match &err {
        AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
        AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
        AppError::ExternalService(msg) => {
            tracing::warn!(error = %msg, "External service failure");
            (StatusCode::BAD_GATEWAY, "Upstream service failed".to_string())
        }
        AppError::Persistence(e) => {
            tracing::error!(error = %e, "Database error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
        }
        AppError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
        }
    };

    (status, Json(ApiResponse::<Empty>::error(message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use sea_orm::DbErr;
    use serde_json::Value;

    async fn body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_keeps_its_message() {
        let response = error_response(AppError::NotFound("User not found".into()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "User not found");
    }

    #[tokio::test]
    async fn database_errors_are_not_leaked() {
        let response = error_response(AppError::Persistence(DbErr::Custom("disk I/O".into())));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body(response).await;
        assert_eq!(json["message"], "Database error");
    }

    #[test]
    fn conflict_maps_to_409() {
        let response = error_response(AppError::Conflict("taken".into()));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
