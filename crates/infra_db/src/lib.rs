//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL persistence of the booking ledger
//! using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: `BookingRepository` owns the
//! SQL, and `PostgresLedgerStore` adapts it to the domain's `LedgerStore`
//! port.
//!
//! # Migrations
//!
//! Schema changes live in the workspace `migrations/` directory and are
//! applied once, in version order, by [`run_migrations`] when the store is
//! initialized.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, run_migrations, PostgresLedgerStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/ledger")).await?;
//! run_migrations(&pool).await?;
//! let store = PostgresLedgerStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, DatabaseConfig, create_pool, run_migrations};
pub use error::DatabaseError;
pub use repositories::BookingRepository;
pub use adapters::PostgresLedgerStore;
