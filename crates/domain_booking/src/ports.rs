//! Ledger Store Port
//!
//! This module defines the storage interface of the booking ledger so the
//! application can run against different backends.
//!
//! # Architecture
//!
//! - **PostgreSQL Adapter**: `infra_db::adapters::PostgresLedgerStore`
//! - **In-Memory Adapter**: [`crate::memory::InMemoryLedgerStore`], for tests
//!   and local runs without a database
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_booking::LedgerStore;
//! use std::sync::Arc;
//!
//! let store: Arc<dyn LedgerStore> = Arc::new(InMemoryLedgerStore::new());
//! store.insert(&booking).await?;
//! let totals = store.aggregate().await?;
//! ```

use async_trait::async_trait;

use core_kernel::BookingId;
use crate::booking::{Booking, BookingAmounts};
use crate::error::LedgerError;
use crate::settlement::SettlementRates;
use crate::totals::LedgerTotals;

/// Durable table of bookings keyed by booking identifier
///
/// Implementations must serialize concurrent writers to the same booking
/// and must never leave a partial write behind.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Short name of the backend, used in logs and health responses
    fn backend_name(&self) -> &'static str;

    /// Inserts a new booking
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::DuplicateBooking` if the booking ID already exists
    async fn insert(&self, booking: &Booking) -> Result<(), LedgerError>;

    /// Overwrites every monetary field and the delivery flag of a booking
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::BookingNotFound` if no booking has this ID
    async fn update(&self, booking_id: &BookingId, amounts: &BookingAmounts) -> Result<(), LedgerError>;

    /// Looks up a single booking
    async fn find(&self, booking_id: &BookingId) -> Result<Option<Booking>, LedgerError>;

    /// Returns every booking in insertion order
    async fn scan(&self) -> Result<Vec<Booking>, LedgerError>;

    /// Computes ledger-wide totals; an empty ledger yields all zeros
    async fn aggregate(&self) -> Result<LedgerTotals, LedgerError>;

    /// Corrects `platform_profit` on every booking from its stored amounts
    ///
    /// Runs as one atomic pass. Insurance and GST are trusted as stored.
    ///
    /// # Returns
    ///
    /// The number of bookings rewritten
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidValue` if any booking's amounts are out
    /// of range; no booking is rewritten in that case
    async fn rebalance(&self, rates: &SettlementRates) -> Result<u64, LedgerError>;

    /// Verifies the backend is reachable
    async fn health_check(&self) -> Result<(), LedgerError>;
}
