//! API error types with IntoResponse
//!
//! Every failure is rendered as `{"detail": "..."}` with a matching status.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::models::ValidationError;
use crate::store::StoreError;

/// Fixed message for a missing wish
pub const NOT_FOUND_DETAIL: &str = "Wish not found";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Input failed validation (422)
    Validation(ValidationError),

    /// Body rejected before it could be decoded (400/415/413)
    Rejected { status: StatusCode, detail: String },

    /// Referenced wish does not exist (404)
    NotFound,

    /// Storage failure (500, logged)
    Store(StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::Validation(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            Self::Rejected { status, detail } => (status, detail),
            Self::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_DETAIL.to_owned()),
            Self::Store(e) => {
                // Log the actual error, return generic message
                tracing::error!("Store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { .. } => Self::NotFound,
            _ => Self::Store(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // Well-formed JSON of the wrong shape: missing field, non-string value
            JsonRejection::JsonDataError(e) => Self::Validation(ValidationError::Malformed {
                detail: e.body_text(),
            }),
            other => Self::Rejected {
                status: other.status(),
                detail: other.body_text(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_422() {
        let err = ApiError::Validation(ValidationError::Empty { field: "name" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["detail"], "name cannot be empty");
    }

    #[tokio::test]
    async fn not_found_is_404_with_fixed_detail() {
        let err = ApiError::from(StoreError::NotFound { id: 42 });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["detail"], "Wish not found");
    }

    #[tokio::test]
    async fn storage_error_is_500_without_leaking_cause() {
        let err = ApiError::from(StoreError::CorruptRow {
            id: 1,
            reason: "secret internals".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["detail"], "Internal server error");
    }
}
