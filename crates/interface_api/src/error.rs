//! API error handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use core_kernel::{CoreError, MoneyError};
use domain_booking::LedgerError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Conflict(msg)
            | ApiError::Internal(msg)
            | ApiError::Unavailable(msg) => msg,
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::InsufficientInputs | LedgerError::InvalidValue(_) => {
                ApiError::BadRequest(message)
            }
            LedgerError::DuplicateBooking(_) => ApiError::Conflict(message),
            LedgerError::BookingNotFound(_) => ApiError::NotFound(message),
            LedgerError::Storage(_) => {
                error!(error = %message, "Ledger store failure");
                ApiError::Internal(message)
            }
            LedgerError::Configuration(_) => {
                error!(error = %message, "Ledger misconfigured");
                ApiError::Internal(message)
            }
        }
    }
}

impl From<MoneyError> for ApiError {
    fn from(err: MoneyError) -> Self {
        LedgerError::from(err).into()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        LedgerError::from(err).into()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::BadRequest(format!("Invalid input values: {}", errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::BookingId;

    #[test]
    fn test_ledger_error_status_mapping() {
        let id = BookingId::new("BK-1").unwrap();

        assert_eq!(ApiError::from(LedgerError::InsufficientInputs).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(LedgerError::InvalidValue("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(LedgerError::DuplicateBooking(id.clone())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(LedgerError::BookingNotFound(id)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(LedgerError::Storage("down".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_configuration_error_is_internal() {
        let err = ApiError::from(CoreError::configuration("insurance_rate must be between 0 and 1"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(err, ApiError::Internal(ref msg) if msg.starts_with("Configuration error")));
    }

    #[test]
    fn test_overflow_is_bad_request() {
        let err = ApiError::from(MoneyError::Overflow("gst"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_message_is_passed_through() {
        let err = ApiError::from(LedgerError::InsufficientInputs);
        assert!(matches!(err, ApiError::BadRequest(ref msg) if msg.starts_with("Please provide any two")));
    }
}
