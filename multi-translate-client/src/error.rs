//! Error types for the API client

use multi_translate::{HttpValidationError, ShapeMismatch};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The response body did not have the declared shape
    #[error("Unexpected response shape: {0}")]
    Coercion(#[from] ShapeMismatch),

    /// The service rejected the request parameters (HTTP 422)
    #[error("Request rejected ({status}): {error}")]
    Validation {
        status: u16,
        error: HttpValidationError,
    },

    /// Any other non-success status
    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    /// The request was refused before it was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failure reported by a non-HTTP transport
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ApiError {
    /// HTTP status carried by the error, if the service answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Validation { status, .. } | ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }
}

/// Result type for client operations
pub type ApiResult<T> = Result<T, ApiError>;
