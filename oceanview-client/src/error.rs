//! Client error types

use shared::error::{AppError, ErrorCode};
use shared::{BookingError, InvalidTransitionError};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error envelope returned by the reservation service
    #[error("API error ({code}): {message}")]
    Api {
        code: ErrorCode,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request rejected by the service's field validation
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        /// Per-field errors, when the service sent them
        details: Option<serde_json::Value>,
    },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Status change refused before any request was sent
    #[error(transparent)]
    Transition(#[from] InvalidTransitionError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Closest [`ErrorCode`] for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            Self::Http(_) => ErrorCode::NetworkError,
            Self::Api { code, .. } => *code,
            Self::InvalidResponse(_) | Self::Serialization(_) | Self::Internal(_) => {
                ErrorCode::InternalError
            }
            Self::Unauthorized(_) => ErrorCode::NotAuthenticated,
            Self::Forbidden(_) => ErrorCode::PermissionDenied,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Validation { .. } => ErrorCode::ValidationFailed,
            Self::Transition(_) => ErrorCode::InvalidStatusTransition,
            Self::Config(_) => ErrorCode::ConfigError,
        }
    }
}

impl From<AppError> for ClientError {
    fn from(err: AppError) -> Self {
        Self::Api {
            code: err.code,
            message: err.message,
            details: err
                .details
                .map(|d| serde_json::Value::Object(d.into_iter().collect())),
        }
    }
}

impl From<BookingError> for ClientError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::InvalidTransition(e) => Self::Transition(e),
            other => AppError::from(other).into(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
