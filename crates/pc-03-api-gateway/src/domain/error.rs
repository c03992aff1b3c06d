//! API Gateway error types and their HTTP status mapping.
//!
//! | Error | Status |
//! |-------|--------|
//! | malformed body / multipart, empty upload | 400 Bad Request |
//! | validation failure, media rejected by policy | 406 Not Acceptable |
//! | media not uploaded, unknown user | 404 Not Found |
//! | scorer unavailable | 503 Service Unavailable |
//! | integrity failure, ledger halted, storage | 500 Internal Server Error |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use shared_types::{LedgerError, ScoringError};

use crate::ports::BlobStoreError;

/// Error returned by every handler.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Blob(#[from] BlobStoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(details: impl Into<String>) -> Self {
        ApiError::BadRequest(details.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        ApiError::NotFound(resource.into())
    }

    pub fn internal(details: impl Into<String>) -> Self {
        ApiError::Internal(details.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Ledger(LedgerError::Validation(_)) => StatusCode::NOT_ACCEPTABLE,
            ApiError::Ledger(LedgerError::Scoring(e)) => match e {
                ScoringError::MediaNotFound { .. } => StatusCode::NOT_FOUND,
                ScoringError::Rejected { .. } => StatusCode::NOT_ACCEPTABLE,
                ScoringError::Unavailable(_) | ScoringError::NonFinite { .. } => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
            },
            ApiError::Ledger(LedgerError::Integrity(_) | LedgerError::Storage(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::BadRequest(_) | ApiError::Blob(BlobStoreError::InvalidName(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Blob(BlobStoreError::Io(_)) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// JSON error body: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "[pc-03] {}", self);
        } else {
            tracing::debug!(status = status.as_u16(), "[pc-03] request rejected: {}", self);
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::bad_request(format!("invalid JSON: {}", e))
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::internal(format!("ledger task failed: {}", e))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors starting or running the gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("configuration error: {0}")]
    Config(#[from] crate::domain::config::ConfigError),

    #[error("server bind error: {0}")]
    Bind(std::io::Error),

    #[error("server error: {0}")]
    Serve(std::io::Error),
}
