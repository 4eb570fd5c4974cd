//! Repository implementations for domain entities
//!
//! Repositories encapsulate SQL queries and map between database rows and
//! plain row types. Queries are checked at runtime (`sqlx::query` /
//! `sqlx::query_as`) so the workspace builds without a live database.

pub mod booking;

pub use booking::BookingRepository;
