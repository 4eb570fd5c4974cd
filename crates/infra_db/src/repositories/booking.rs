//! Booking repository implementation
//!
//! This module provides database access for the `bookings` table: single-row
//! writes, ordered scans, column sums, and the transactional rebalance pass.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::debug;

use crate::error::DatabaseError;

const SELECT_BOOKINGS: &str = r#"
    SELECT
        id,
        booking_id,
        user_amount,
        host_amount,
        platform_profit,
        insurance,
        gst,
        delivery,
        created_at,
        updated_at
    FROM bookings
"#;

/// Repository for the bookings ledger
///
/// Single-row writes are one statement each, so PostgreSQL row locks
/// serialize concurrent writers to the same booking.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Creates a new BookingRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Inserts a booking
    ///
    /// # Returns
    ///
    /// The row's surrogate key, which defines scan order
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DuplicateEntry` if the booking ID is taken
    pub async fn insert(&self, booking: &NewBooking) -> Result<i64, DatabaseError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO bookings (
                booking_id, user_amount, host_amount, platform_profit,
                insurance, gst, delivery
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&booking.booking_id)
        .bind(booking.user_amount)
        .bind(booking.host_amount)
        .bind(booking.platform_profit)
        .bind(booking.insurance)
        .bind(booking.gst)
        .bind(booking.delivery)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match DatabaseError::from(&e) {
            DatabaseError::DuplicateEntry(_) => {
                DatabaseError::duplicate("Booking", "booking_id", &booking.booking_id)
            }
            other => other,
        })?;

        debug!(id, booking_id = %booking.booking_id, "Inserted booking");
        Ok(id)
    }

    /// Overwrites every amount and the delivery flag of a booking
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no row has the booking ID
    pub async fn update(&self, booking: &NewBooking) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET user_amount = $1,
                host_amount = $2,
                platform_profit = $3,
                insurance = $4,
                gst = $5,
                delivery = $6,
                updated_at = now()
            WHERE booking_id = $7
            "#,
        )
        .bind(booking.user_amount)
        .bind(booking.host_amount)
        .bind(booking.platform_profit)
        .bind(booking.insurance)
        .bind(booking.gst)
        .bind(booking.delivery)
        .bind(&booking.booking_id)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Booking", &booking.booking_id));
        }
        Ok(())
    }

    /// Retrieves a booking by its caller-supplied ID
    pub async fn find_by_booking_id(&self, booking_id: &str) -> Result<Option<BookingRow>, DatabaseError> {
        let row = sqlx::query_as::<_, BookingRow>(&format!("{} WHERE booking_id = $1", SELECT_BOOKINGS))
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?;

        Ok(row)
    }

    /// Retrieves every booking in insertion order
    pub async fn list_all(&self) -> Result<Vec<BookingRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!("{} ORDER BY id", SELECT_BOOKINGS))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?;

        Ok(rows)
    }

    /// Sums the ledger columns; an empty table yields zeros
    pub async fn sums(&self) -> Result<BookingSumsRow, DatabaseError> {
        let sums = sqlx::query_as::<_, BookingSumsRow>(
            r#"
            SELECT
                COALESCE(SUM(platform_profit), 0) AS total_profit,
                COALESCE(SUM(host_amount), 0) AS total_host_amount,
                COALESCE(SUM(insurance), 0) AS total_insurance,
                COALESCE(SUM(user_amount), 0) AS total_sales
            FROM bookings
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        Ok(sums)
    }

    /// Rewrites `platform_profit` on every row in one transaction
    ///
    /// All rows are locked with `FOR UPDATE` before any is rewritten, so the
    /// pass works on a consistent snapshot and concurrent writers wait.
    /// Rows inserted after the snapshot are left untouched. Any error rolls
    /// the whole pass back.
    ///
    /// # Arguments
    ///
    /// * `reconcile` - Computes the corrected profit of a row
    ///
    /// # Returns
    ///
    /// The number of rows rewritten
    pub async fn rebalance_with<F>(&self, reconcile: F) -> Result<u64, DatabaseError>
    where
        F: Fn(&BookingRow) -> Result<Decimal, DatabaseError> + Send + Sync,
    {
        let mut tx = self.pool.begin().await?;

        let rows = sqlx::query_as::<_, BookingRow>(&format!("{} ORDER BY id FOR UPDATE", SELECT_BOOKINGS))
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| DatabaseError::from(&e))?;

        let mut updated = 0;
        for row in &rows {
            let platform_profit = reconcile(row)?;
            let result = sqlx::query(
                r#"
                UPDATE bookings
                SET platform_profit = $1, updated_at = now()
                WHERE id = $2
                "#,
            )
            .bind(platform_profit)
            .bind(row.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| DatabaseError::from(&e))?;
            updated += result.rows_affected();
        }

        tx.commit().await?;
        debug!(updated, "Rebalanced bookings");
        Ok(updated)
    }

    /// Verifies the database answers queries
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?;
        Ok(())
    }
}

/// Delivery flag as stored in the `delivery_option` enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "delivery_option")]
pub enum DeliveryOption {
    Yes,
    No,
}

/// Database row for a booking
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BookingRow {
    pub id: i64,
    pub booking_id: String,
    pub user_amount: Decimal,
    pub host_amount: Decimal,
    pub platform_profit: Decimal,
    pub insurance: Decimal,
    pub gst: Decimal,
    pub delivery: DeliveryOption,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column sums over the bookings table
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct BookingSumsRow {
    pub total_profit: Decimal,
    pub total_host_amount: Decimal,
    pub total_insurance: Decimal,
    pub total_sales: Decimal,
}

/// Data for inserting or overwriting a booking
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub booking_id: String,
    pub user_amount: Decimal,
    pub host_amount: Decimal,
    pub platform_profit: Decimal,
    pub insurance: Decimal,
    pub gst: Decimal,
    pub delivery: DeliveryOption,
}
