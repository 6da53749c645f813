use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("{message}: {source}")]
    NotFound {
        message: &'static str,
        source: StoreError,
    },

    #[error("{message}: {source}")]
    Store {
        message: &'static str,
        source: StoreError,
    },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }

    /// Wraps a store failure, keeping missing documents apart from real faults.
    pub fn store(message: &'static str, source: StoreError) -> Self {
        match source {
            StoreError::NotFound(_) => AppError::NotFound { message, source },
            StoreError::Database(_) => AppError::Store { message, source },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body of every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::BadRequest(message) => ErrorResponse {
                message,
                error: None,
            },
            AppError::InvalidBody(rejection) => ErrorResponse {
                message: "invalid request body".to_string(),
                error: Some(rejection.body_text()),
            },
            AppError::NotFound { message, source } => ErrorResponse {
                message: message.to_string(),
                error: Some(source.to_string()),
            },
            AppError::Store { message, source } => {
                error!("{}: {}", message, source);
                ErrorResponse {
                    message: message.to_string(),
                    error: Some(source.to_string()),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TodoId;

    #[test]
    fn missing_document_maps_to_404() {
        let err = AppError::store("Failed to delete todo", StoreError::NotFound(TodoId::new()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn database_failure_maps_to_500() {
        let err = AppError::store(
            "Failed to update todo",
            StoreError::Database(sqlx::Error::PoolTimedOut),
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("Failed to update todo: database error"));
    }

    #[test]
    fn bad_request_body_has_no_error_field() {
        let body = ErrorResponse {
            message: "title missing".to_string(),
            error: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "title missing" }));
        assert_eq!(
            AppError::bad_request("title missing").status(),
            StatusCode::BAD_REQUEST
        );
    }
}
