//! Strongly-typed identifiers for domain entities
//!
//! Booking identifiers are supplied by the caller rather than generated,
//! so the newtype validates instead of minting values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Maximum accepted length of a booking identifier
pub const MAX_BOOKING_ID_LEN: usize = 128;

/// Caller-supplied unique identifier of a booking
///
/// Surrounding whitespace is trimmed; the remaining text must be non-empty
/// and at most [`MAX_BOOKING_ID_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BookingId(String);

impl BookingId {
    /// Creates a booking identifier after validation
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the identifier is blank or too long
    pub fn new(value: impl Into<String>) -> Result<Self, CoreError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CoreError::validation("Booking ID is required"));
        }
        if trimmed.chars().count() > MAX_BOOKING_ID_LEN {
            return Err(CoreError::validation(format!(
                "Booking ID must be at most {} characters",
                MAX_BOOKING_ID_LEN
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BookingId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for BookingId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BookingId> for String {
    fn from(id: BookingId) -> String {
        id.0
    }
}

impl AsRef<str> for BookingId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_id_trims_whitespace() {
        let id = BookingId::new("  BK-1001 ").unwrap();
        assert_eq!(id.as_str(), "BK-1001");
    }

    #[test]
    fn test_blank_booking_id_rejected() {
        assert!(BookingId::new("   ").is_err());
        assert!("".parse::<BookingId>().is_err());
    }

    #[test]
    fn test_booking_id_serde_validates() {
        let id: BookingId = serde_json::from_str("\"BK-7\"").unwrap();
        assert_eq!(id.to_string(), "BK-7");
        assert!(serde_json::from_str::<BookingId>("\"\"").is_err());
    }
}
