//! PostgreSQL Ledger Store Adapter
//!
//! This module provides the database adapter for the booking ledger,
//! implementing the `LedgerStore` port using PostgreSQL via the
//! `BookingRepository`.
//!
//! # Overview
//!
//! The `PostgresLedgerStore` serves as the bridge between the domain port and
//! the database layer. It translates domain requests into repository
//! operations, converts rows back to domain bookings, and maps database
//! errors onto `LedgerError`.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresLedgerStore;
//! use domain_booking::LedgerStore;
//! use std::sync::Arc;
//!
//! let store: Arc<dyn LedgerStore> = Arc::new(PostgresLedgerStore::new(pool));
//! let totals = store.aggregate().await?;
//! ```

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument, warn};

use core_kernel::BookingId;
use domain_booking::{
    Booking, BookingAmounts, Delivery, LedgerError, LedgerStore, LedgerSums, LedgerTotals,
    SettlementRates,
};

use crate::error::DatabaseError;
use crate::repositories::booking::{BookingRepository, BookingRow, BookingSumsRow, DeliveryOption, NewBooking};

/// PostgreSQL-backed implementation of the `LedgerStore` trait
///
/// # Error Handling
///
/// Database errors are translated to `LedgerError` variants:
/// - `DatabaseError::DuplicateEntry` -> `LedgerError::DuplicateBooking`
/// - `DatabaseError::NotFound` -> `LedgerError::BookingNotFound`
/// - Other errors -> `LedgerError::Storage`
#[derive(Debug, Clone)]
pub struct PostgresLedgerStore {
    repository: BookingRepository,
}

impl PostgresLedgerStore {
    /// Creates a new PostgreSQL ledger store
    ///
    /// The schema must already be migrated; see [`crate::run_migrations`].
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: BookingRepository::new(pool),
        }
    }

    /// Returns a reference to the underlying repository
    pub fn repository(&self) -> &BookingRepository {
        &self.repository
    }
}

#[async_trait]
impl LedgerStore for PostgresLedgerStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    #[instrument(skip(self, booking), fields(booking_id = %booking.booking_id))]
    async fn insert(&self, booking: &Booking) -> Result<(), LedgerError> {
        let new_booking = to_new_booking(&booking.booking_id, &booking.amounts);
        let id = self
            .repository
            .insert(&new_booking)
            .await
            .map_err(|e| db_to_ledger_error(e, &booking.booking_id))?;

        debug!(id, "Booking saved");
        Ok(())
    }

    #[instrument(skip(self, amounts), fields(booking_id = %booking_id))]
    async fn update(&self, booking_id: &BookingId, amounts: &BookingAmounts) -> Result<(), LedgerError> {
        self.repository
            .update(&to_new_booking(booking_id, amounts))
            .await
            .map_err(|e| db_to_ledger_error(e, booking_id))
    }

    #[instrument(skip(self), fields(booking_id = %booking_id))]
    async fn find(&self, booking_id: &BookingId) -> Result<Option<Booking>, LedgerError> {
        self.repository
            .find_by_booking_id(booking_id.as_str())
            .await
            .map_err(|e| db_to_ledger_error(e, booking_id))?
            .map(row_to_booking)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn scan(&self) -> Result<Vec<Booking>, LedgerError> {
        let rows = self.repository.list_all().await.map_err(storage_error)?;
        rows.into_iter().map(row_to_booking).collect()
    }

    #[instrument(skip(self))]
    async fn aggregate(&self) -> Result<LedgerTotals, LedgerError> {
        let sums = self.repository.sums().await.map_err(storage_error)?;
        Ok(LedgerTotals::try_from(sums_to_domain(sums))?)
    }

    #[instrument(skip(self, rates), fields(delivery_charge = %rates.delivery_charge))]
    async fn rebalance(&self, rates: &SettlementRates) -> Result<u64, LedgerError> {
        let updated = self
            .repository
            .rebalance_with(|row| {
                row_amounts(row).reconciled_profit(rates).map_err(|e| {
                    DatabaseError::ConstraintViolation(format!("booking {}: {}", row.booking_id, e))
                })
            })
            .await
            .map_err(ledger_error)?;

        debug!(updated, "Ledger rebalanced");
        Ok(updated)
    }

    async fn health_check(&self) -> Result<(), LedgerError> {
        self.repository.ping().await.map_err(|e| {
            warn!(error = %e, "Database health check failed");
            storage_error(e)
        })
    }
}

fn db_to_ledger_error(e: DatabaseError, booking_id: &BookingId) -> LedgerError {
    match e {
        DatabaseError::DuplicateEntry(_) => LedgerError::DuplicateBooking(booking_id.clone()),
        DatabaseError::NotFound(_) => LedgerError::BookingNotFound(booking_id.clone()),
        other => ledger_error(other),
    }
}

/// Maps rejected values to `InvalidValue` and every other failure to `Storage`
fn ledger_error(e: DatabaseError) -> LedgerError {
    match e {
        DatabaseError::ConstraintViolation(msg) => LedgerError::InvalidValue(msg),
        other => storage_error(other),
    }
}

fn storage_error(e: DatabaseError) -> LedgerError {
    LedgerError::Storage(e.to_string())
}

fn to_db_delivery(delivery: Delivery) -> DeliveryOption {
    match delivery {
        Delivery::Yes => DeliveryOption::Yes,
        Delivery::No => DeliveryOption::No,
    }
}

fn to_domain_delivery(delivery: DeliveryOption) -> Delivery {
    match delivery {
        DeliveryOption::Yes => Delivery::Yes,
        DeliveryOption::No => Delivery::No,
    }
}

fn to_new_booking(booking_id: &BookingId, amounts: &BookingAmounts) -> NewBooking {
    NewBooking {
        booking_id: booking_id.to_string(),
        user_amount: amounts.user_amount,
        host_amount: amounts.host_amount,
        platform_profit: amounts.platform_profit,
        insurance: amounts.insurance,
        gst: amounts.gst,
        delivery: to_db_delivery(amounts.delivery),
    }
}

fn row_amounts(row: &BookingRow) -> BookingAmounts {
    BookingAmounts {
        user_amount: row.user_amount,
        host_amount: row.host_amount,
        platform_profit: row.platform_profit,
        insurance: row.insurance,
        gst: row.gst,
        delivery: to_domain_delivery(row.delivery),
    }
}

/// Converts a database row to a domain Booking
fn row_to_booking(row: BookingRow) -> Result<Booking, LedgerError> {
    let booking_id = BookingId::new(row.booking_id.as_str())
        .map_err(|e| LedgerError::Storage(format!("row {}: {}", row.id, e)))?;
    Ok(Booking::new(booking_id, row_amounts(&row)))
}

fn sums_to_domain(sums: BookingSumsRow) -> LedgerSums {
    LedgerSums {
        total_profit: sums.total_profit,
        total_host_amount: sums.total_host_amount,
        total_insurance: sums.total_insurance,
        total_sales: sums.total_sales,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn row(booking_id: &str) -> BookingRow {
        BookingRow {
            id: 7,
            booking_id: booking_id.to_string(),
            user_amount: dec!(10800),
            host_amount: dec!(7000),
            platform_profit: dec!(0),
            insurance: dec!(1400),
            gst: dec!(540),
            delivery: DeliveryOption::Yes,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_to_booking() {
        let booking = row_to_booking(row("BK-7")).unwrap();
        assert_eq!(booking.booking_id.as_str(), "BK-7");
        assert_eq!(booking.amounts.delivery, Delivery::Yes);
        assert_eq!(booking.amounts.user_amount, dec!(10800));
    }

    #[test]
    fn test_row_with_blank_id_is_storage_error() {
        let result = row_to_booking(row("   "));
        assert!(matches!(result, Err(LedgerError::Storage(_))));
    }

    #[test]
    fn test_row_amounts_reconcile_with_delivery() {
        let amounts = row_amounts(&row("BK-7"));
        assert_eq!(amounts.reconciled_profit(&SettlementRates::default()), Ok(dec!(1060)));
    }

    #[test]
    fn test_error_mapping() {
        let id = BookingId::new("BK-9").unwrap();

        let dup = db_to_ledger_error(DatabaseError::duplicate("Booking", "booking_id", "BK-9"), &id);
        assert!(matches!(dup, LedgerError::DuplicateBooking(ref b) if b == &id));

        let missing = db_to_ledger_error(DatabaseError::not_found("Booking", "BK-9"), &id);
        assert!(matches!(missing, LedgerError::BookingNotFound(_)));

        let other = db_to_ledger_error(DatabaseError::PoolExhausted, &id);
        assert!(matches!(other, LedgerError::Storage(_)));

        let rejected = db_to_ledger_error(DatabaseError::ConstraintViolation("amount".into()), &id);
        assert!(matches!(rejected, LedgerError::InvalidValue(_)));
    }

    #[test]
    fn test_delivery_conversion() {
        assert_eq!(to_domain_delivery(to_db_delivery(Delivery::Yes)), Delivery::Yes);
        assert_eq!(to_domain_delivery(to_db_delivery(Delivery::No)), Delivery::No);
    }
}
