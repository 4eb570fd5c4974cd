//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! booking ledger test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built bookings and rates
//! - `builders`: Builder for booking test data
//! - `database`: PostgreSQL test container management
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use generators::*;
