//! Core Kernel - Foundational types and utilities for the booking ledger
//!
//! This crate provides the fundamental building blocks used across all crates:
//! - Monetary amount parsing and rounding with precise decimal arithmetic
//! - Strongly-typed booking identifiers
//! - Common error types

pub mod money;
pub mod identifiers;
pub mod error;

pub use money::{
    MoneyError, MONEY_SCALE, round_money, parse_amount, parse_decimal, percentage_of,
    try_add, try_sub, try_mul,
};
pub use identifiers::{BookingId, MAX_BOOKING_ID_LEN};
pub use error::CoreError;
