//! # REST API Errors
//!
//! Error types for the REST API module.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::products::{FieldErrors, StoreError};

use super::response::{DetailResponse, ErrorResponse, ErrorsResponse};

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// REST API errors
#[derive(Debug, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Request body failed field validation
    #[error("Invalid product data")]
    Validation(FieldErrors),

    /// Query parameters failed validation
    #[error("Invalid query parameters")]
    InvalidQuery(FieldErrors),

    /// Request body is not valid JSON
    #[error("JSON parse error - {0}")]
    MalformedBody(String),

    /// Request body is not declared as JSON
    #[error("Unsupported media type in request.")]
    UnsupportedMediaType,

    /// Resource not found
    #[error("Not found.")]
    NotFound,

    /// Page number out of range or not a number
    #[error("Invalid page.")]
    InvalidPage,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// The store failed underneath a request
    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),

    /// A store operation did not run to completion
    #[error("Store task failed: {0}")]
    TaskFailed(String),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            RestError::Validation(_) => StatusCode::BAD_REQUEST,
            RestError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            RestError::MalformedBody(_) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            RestError::NotFound => StatusCode::NOT_FOUND,
            RestError::InvalidPage => StatusCode::NOT_FOUND,

            // 415 Unsupported Media Type
            RestError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,

            // 500 Internal Server Error
            RestError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RestError::TaskFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            RestError::Validation(errors) | RestError::InvalidQuery(errors) => {
                (status, Json(ErrorsResponse { errors })).into_response()
            }
            err @ (RestError::Persistence(_) | RestError::TaskFailed(_)) => {
                tracing::error!(error = %err, "store failure");
                (status, Json(ErrorResponse::server_error())).into_response()
            }
            other => (status, Json(DetailResponse::new(other.to_string()))).into_response(),
        }
    }
}
