//! Error types for the key/value server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::repository::RepositoryError;

/// Message returned for every rejected request
pub const INVALID_REQUEST_MESSAGE: &str = "invalid request";

// == Cache Error Enum ==
/// Unified error type for the key/value server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Missing or empty key/value; raised before the repository is touched
    #[error("{0}")]
    InvalidRequest(String),

    /// Failure surfaced unchanged from the repository
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CacheError {
    /// The validation error with its fixed message.
    pub fn invalid_request() -> Self {
        CacheError::InvalidRequest(INVALID_REQUEST_MESSAGE.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::Repository(RepositoryError::Unavailable(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            CacheError::Repository(_) | CacheError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the key/value server.
pub type Result<T> = std::result::Result<T, CacheError>;
