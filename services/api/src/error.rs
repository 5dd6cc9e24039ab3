//! services/api/src/error.rs
//!
//! Defines the startup error type for the service and the error type returned
//! to HTTP clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use component_generator_core::GenerationError;
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::ConfigError;

/// The primary error type for starting the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

/// The JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

/// An error that is rendered as an HTTP status plus `{"detail": ...}`.
#[derive(Debug)]
pub struct HttpError {
    pub status: StatusCode,
    pub detail: String,
}

impl HttpError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Invalid token")
    }
}

impl From<GenerationError> for HttpError {
    fn from(err: GenerationError) -> Self {
        let status = match &err {
            GenerationError::InvalidUserId(_) => StatusCode::BAD_REQUEST,
            GenerationError::NoCodeBlock => StatusCode::NOT_FOUND,
            GenerationError::Port(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // The raw error text is surfaced to the caller; the service is meant for internal use.
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}
