//! Monetary amount handling with precise decimal arithmetic
//!
//! Every amount in the ledger is a `rust_decimal::Decimal` in a single
//! implicit currency. This module provides the boundary helpers shared by
//! the settlement engine, the ledger store, and the HTTP layer:
//! parsing caller-supplied values, rounding to the ledger scale, and
//! zero-guarded percentages.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;

/// Number of decimal places amounts are rounded to at the boundary
pub const MONEY_SCALE: u32 = 2;

/// Errors that can occur while handling monetary values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount for '{field}': {reason}")]
    InvalidAmount {
        field: String,
        reason: String,
    },

    #[error("Amount out of range while computing {0}")]
    Overflow(&'static str),
}

impl MoneyError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        MoneyError::InvalidAmount {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Rounds an amount to the ledger scale using banker's rounding
/// (round half to even)
///
/// # Example
///
/// ```rust
/// use core_kernel::round_money;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_money(dec!(10.125)), dec!(10.12));
/// assert_eq!(round_money(dec!(10.135)), dec!(10.14));
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Parses a decimal from text, accepting plain and scientific notation
///
/// # Arguments
///
/// * `field` - Name of the field being parsed, used in error messages
/// * `text` - The textual representation of the amount
///
/// # Errors
///
/// Returns `MoneyError::InvalidAmount` if the text is not a finite number
/// representable as a `Decimal`
pub fn parse_decimal(field: &str, text: &str) -> Result<Decimal, MoneyError> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| MoneyError::invalid(field, format!("'{}' is not a numerical value", text)))
}

/// Parses an optional amount from a JSON value
///
/// `null` and blank strings mean the amount was not supplied. Numbers and
/// numeric strings are converted through their decimal text so no binary
/// floating point error leaks into the result.
///
/// # Arguments
///
/// * `field` - Name of the field being parsed
/// * `value` - The raw JSON value
///
/// # Returns
///
/// `Ok(None)` when absent, `Ok(Some(amount))` when numeric
///
/// # Errors
///
/// Returns `MoneyError::InvalidAmount` for booleans, arrays, objects and
/// non-numeric strings
pub fn parse_amount(field: &str, value: &Value) -> Result<Option<Decimal>, MoneyError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(number) => parse_decimal(field, &number.to_string()).map(Some),
        Value::String(text) if text.trim().is_empty() => Ok(None),
        Value::String(text) => parse_decimal(field, text).map(Some),
        _ => Err(MoneyError::invalid(field, "expected a numerical value")),
    }
}

/// Adds two amounts, failing instead of overflowing
pub fn try_add(label: &'static str, a: Decimal, b: Decimal) -> Result<Decimal, MoneyError> {
    a.checked_add(b).ok_or(MoneyError::Overflow(label))
}

/// Subtracts `b` from `a`, failing instead of overflowing
pub fn try_sub(label: &'static str, a: Decimal, b: Decimal) -> Result<Decimal, MoneyError> {
    a.checked_sub(b).ok_or(MoneyError::Overflow(label))
}

/// Multiplies two amounts, failing instead of overflowing
pub fn try_mul(label: &'static str, a: Decimal, b: Decimal) -> Result<Decimal, MoneyError> {
    a.checked_mul(b).ok_or(MoneyError::Overflow(label))
}

/// Computes `part / whole * 100`, or zero when `whole` is zero
///
/// # Errors
///
/// Returns `MoneyError::Overflow` if the quotient is out of range
pub fn percentage_of(part: Decimal, whole: Decimal) -> Result<Decimal, MoneyError> {
    if whole.is_zero() {
        return Ok(Decimal::ZERO);
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .ok_or(MoneyError::Overflow("percentage"))
}
