use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ecole_core::StoreError;
use serde_json::json;

/// API error type mapped to the JSON error envelope the admin UI shows in
/// its toast notifications.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "notFound", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "badRequest", msg.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Authentication required".to_string(),
            ),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internalError",
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::Database(err) => {
                tracing::error!("Database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internalError",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": {
                "type": error_type,
                "message": message,
                "statusCode": status.as_u16(),
            }
        });

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { collection } => {
                ApiError::NotFound(format!("{collection} not found"))
            }
            StoreError::SlugExists(slug) => {
                ApiError::Conflict(format!("slug already exists: {slug}"))
            }
            StoreError::EmailExists => ApiError::Conflict("email already registered".into()),
            StoreError::InvalidCredentials => ApiError::Unauthorized,
            StoreError::Validation(msg) => ApiError::BadRequest(msg),
            StoreError::Token(_) => ApiError::Unauthorized,
            StoreError::PasswordHash(msg) => ApiError::Internal(msg),
            StoreError::Database(err) => ApiError::Database(err),
        }
    }
}

/// Convenience type alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn envelope(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn slug_conflict_becomes_a_409() {
        let err = ApiError::from(StoreError::SlugExists("rentree-2026".into()));
        let (status, body) = envelope(err).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["type"], "conflict");
        assert_eq!(body["error"]["statusCode"], 409);
        let message = body["error"]["message"].as_str().unwrap();
        assert!(message.contains("rentree-2026"));
    }

    #[tokio::test]
    async fn missing_document_becomes_a_404() {
        let err = ApiError::from(StoreError::NotFound {
            collection: "blogPosts",
        });
        let (status, body) = envelope(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["type"], "notFound");
        assert_eq!(body["error"]["statusCode"], 404);
    }

    #[tokio::test]
    async fn bad_credentials_become_a_401() {
        let (status, body) = envelope(ApiError::from(StoreError::InvalidCredentials)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["type"], "unauthorized");
    }
}
