//! In-memory ledger store
//!
//! Keeps bookings in insertion order behind a single `RwLock`. Every write,
//! including the whole rebalance pass, happens under the write lock, which
//! serializes writers and gives rebalance a consistent snapshot.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use core_kernel::BookingId;
use crate::booking::{Booking, BookingAmounts};
use crate::error::LedgerError;
use crate::ports::LedgerStore;
use crate::settlement::SettlementRates;
use crate::totals::{LedgerSums, LedgerTotals};

/// In-memory implementation of [`LedgerStore`]
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedgerStore {
    bookings: Arc<RwLock<Vec<Booking>>>,
}

impl InMemoryLedgerStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with bookings
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::DuplicateBooking` if two bookings share an ID
    pub async fn with_bookings(bookings: Vec<Booking>) -> Result<Self, LedgerError> {
        let store = Self::new();
        for booking in &bookings {
            store.insert(booking).await?;
        }
        Ok(store)
    }

    /// Number of stored bookings
    pub async fn len(&self) -> usize {
        self.bookings.read().await.len()
    }

    /// Returns true if no booking is stored
    pub async fn is_empty(&self) -> bool {
        self.bookings.read().await.is_empty()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, booking: &Booking) -> Result<(), LedgerError> {
        let mut bookings = self.bookings.write().await;
        if bookings.iter().any(|b| b.booking_id == booking.booking_id) {
            return Err(LedgerError::DuplicateBooking(booking.booking_id.clone()));
        }
        bookings.push(booking.clone());
        Ok(())
    }

    async fn update(&self, booking_id: &BookingId, amounts: &BookingAmounts) -> Result<(), LedgerError> {
        let mut bookings = self.bookings.write().await;
        let booking = bookings
            .iter_mut()
            .find(|b| &b.booking_id == booking_id)
            .ok_or_else(|| LedgerError::BookingNotFound(booking_id.clone()))?;
        booking.amounts = *amounts;
        Ok(())
    }

    async fn find(&self, booking_id: &BookingId) -> Result<Option<Booking>, LedgerError> {
        Ok(self
            .bookings
            .read()
            .await
            .iter()
            .find(|b| &b.booking_id == booking_id)
            .cloned())
    }

    async fn scan(&self) -> Result<Vec<Booking>, LedgerError> {
        Ok(self.bookings.read().await.clone())
    }

    async fn aggregate(&self) -> Result<LedgerTotals, LedgerError> {
        let bookings = self.bookings.read().await;
        Ok(LedgerTotals::try_from(LedgerSums::from_bookings(bookings.iter())?)?)
    }

    async fn rebalance(&self, rates: &SettlementRates) -> Result<u64, LedgerError> {
        let mut bookings = self.bookings.write().await;
        let corrected = bookings
            .iter()
            .map(|booking| booking.amounts.rebalanced(rates))
            .collect::<Result<Vec<_>, _>>()?;
        for (booking, amounts) in bookings.iter_mut().zip(corrected) {
            booking.amounts = amounts;
        }
        Ok(bookings.len() as u64)
    }

    async fn health_check(&self) -> Result<(), LedgerError> {
        Ok(())
    }
}
