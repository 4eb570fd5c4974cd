//! Booking domain errors

use core_kernel::{BookingId, CoreError, MoneyError};
use thiserror::Error;

/// Errors that can occur in the booking domain
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Fewer than two of the three settlement amounts were supplied
    #[error("Please provide any two of the three amounts: user amount, host amount, platform profit.")]
    InsufficientInputs,

    /// A supplied value is not a finite number or fails validation
    #[error("Invalid input values: {0}")]
    InvalidValue(String),

    /// Insert collided with an existing booking
    #[error("Booking ID '{0}' already exists. Please use a unique Booking ID.")]
    DuplicateBooking(BookingId),

    /// Update targeted a booking that was never inserted
    #[error("No booking found with Booking ID '{0}'.")]
    BookingNotFound(BookingId),

    /// The underlying store failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// The service was wired with unusable settings
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<MoneyError> for LedgerError {
    fn from(err: MoneyError) -> Self {
        LedgerError::InvalidValue(err.to_string())
    }
}

impl From<CoreError> for LedgerError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Money(money) => money.into(),
            CoreError::Validation(msg) => LedgerError::InvalidValue(msg),
            CoreError::Configuration(msg) => LedgerError::Configuration(msg),
        }
    }
}
