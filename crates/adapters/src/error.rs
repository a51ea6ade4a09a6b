//! Errors raised by the HTTP layer

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;
use userkit_model::StorageError;

/// Errors returned from request handlers, rendered as JSON responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Bad request: {reason}")]
    BadRequest { reason: String },
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Storage(err) => match err {
                StorageError::InvalidUser { .. } => StatusCode::BAD_REQUEST,
                StorageError::NotFound { .. } => StatusCode::NOT_FOUND,
                StorageError::AlreadyExists { .. } => StatusCode::CONFLICT,
                StorageError::DatabaseError { .. } | StorageError::SerializationError { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Backend details stay in the logs
        let message = if status.is_server_error() {
            error!("Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Errors that stop the server from starting or running
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError::from(StorageError::InvalidUser {
                    reason: "bad id".to_string(),
                }),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(StorageError::NotFound {
                    user_id: "x".to_string(),
                }),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(StorageError::AlreadyExists {
                    user_id: "x".to_string(),
                }),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(StorageError::DatabaseError {
                    reason: "io".to_string(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::BadRequest {
                    reason: "id mismatch".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, want) in cases {
            assert_eq!(err.status(), want, "{}", err);
        }
    }

    #[tokio::test]
    async fn test_server_error_hides_details() {
        let response = ApiError::from(StorageError::DatabaseError {
            reason: "secret path".to_string(),
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({ "error": "Internal server error" }));
    }
}
