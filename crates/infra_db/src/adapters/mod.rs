//! Domain Adapters
//!
//! This module provides adapter implementations for domain ports,
//! connecting domain interfaces to the PostgreSQL database layer.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresLedgerStore;
//! use domain_booking::LedgerStore;
//!
//! let store = PostgresLedgerStore::new(pool);
//! let bookings = store.scan().await?;
//! ```

pub mod booking;

pub use booking::PostgresLedgerStore;
