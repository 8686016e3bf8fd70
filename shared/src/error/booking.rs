//! Errors raised by the pricing and lifecycle core

use super::{AppError, ErrorCode};
use crate::lifecycle::InvalidTransitionError;
use thiserror::Error;

/// Booking core error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// Illegal reservation status change
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransitionError),

    /// Input rejected by a strict constructor (rate table, stay period)
    #[error("Invalid input: {message}")]
    InvalidInput { code: ErrorCode, message: String },
}

impl BookingError {
    pub fn invalid_input(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidTransition(_) => ErrorCode::InvalidStatusTransition,
            Self::InvalidInput { code, .. } => *code,
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::InvalidTransition(e) => {
                AppError::with_message(ErrorCode::InvalidStatusTransition, e.to_string())
                    .with_detail("from", e.from.as_str())
                    .with_detail("to", e.to.as_str())
            }
            BookingError::InvalidInput { code, message } => AppError::with_message(code, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReservationStatus;

    #[test]
    fn test_transition_into_app_error() {
        let err: BookingError = InvalidTransitionError {
            from: ReservationStatus::CheckedOut,
            to: ReservationStatus::CheckedIn,
        }
        .into();
        assert_eq!(err.code(), ErrorCode::InvalidStatusTransition);

        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::InvalidStatusTransition);
        let details = app.details.unwrap();
        assert_eq!(details.get("from").unwrap(), "CHECKED_OUT");
        assert_eq!(details.get("to").unwrap(), "CHECKED_IN");
    }

    #[test]
    fn test_invalid_input_keeps_code() {
        let err = BookingError::invalid_input(ErrorCode::InvalidRateTable, "rate for SUITE is negative");
        assert_eq!(err.to_string(), "Invalid input: rate for SUITE is negative");

        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::InvalidRateTable);
    }
}
