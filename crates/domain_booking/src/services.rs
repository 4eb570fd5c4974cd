//! Ledger application service
//!
//! Ties the settlement engine to an injected ledger store. The HTTP layer
//! talks to this service only.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use core_kernel::BookingId;
use crate::booking::{Booking, Delivery};
use crate::error::LedgerError;
use crate::ports::LedgerStore;
use crate::settlement::{KnownAmounts, Settlement, SettlementEngine};
use crate::totals::{LedgerSums, LedgerTotals};

/// Every booking plus the ledger totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub bookings: Vec<Booking>,
    pub totals: LedgerTotals,
}

/// Service orchestrating settlement and ledger operations
#[derive(Clone)]
pub struct LedgerService {
    store: Arc<dyn LedgerStore>,
    engine: SettlementEngine,
}

impl LedgerService {
    /// Creates a service over the given store
    ///
    /// # Arguments
    ///
    /// * `store` - The ledger store backend
    /// * `engine` - Settlement engine carrying the configured rates; its
    ///   delivery surcharge is also used by rebalance
    pub fn new(store: Arc<dyn LedgerStore>, engine: SettlementEngine) -> Self {
        Self { store, engine }
    }

    pub fn engine(&self) -> &SettlementEngine {
        &self.engine
    }

    pub fn store(&self) -> &Arc<dyn LedgerStore> {
        &self.store
    }

    /// Derives a settlement without touching the store
    pub fn calculate(&self, known: KnownAmounts, delivery: Delivery) -> Result<Settlement, LedgerError> {
        self.engine.solve(known, delivery)
    }

    /// Records a new booking
    pub async fn save(&self, booking: &Booking) -> Result<(), LedgerError> {
        self.store.insert(booking).await
    }

    /// Overwrites an existing booking's amounts and delivery flag
    pub async fn update(&self, booking: &Booking) -> Result<(), LedgerError> {
        self.store.update(&booking.booking_id, &booking.amounts).await
    }

    /// Fetches a single booking
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::BookingNotFound` if the booking does not exist
    pub async fn get(&self, booking_id: &BookingId) -> Result<Booking, LedgerError> {
        self.store
            .find(booking_id)
            .await?
            .ok_or_else(|| LedgerError::BookingNotFound(booking_id.clone()))
    }

    /// Reapplies the reconciliation law to every stored booking
    ///
    /// # Returns
    ///
    /// The number of bookings rewritten
    pub async fn balance(&self) -> Result<u64, LedgerError> {
        self.store.rebalance(self.engine.rates()).await
    }

    /// Lists every booking together with the ledger totals
    ///
    /// Totals are computed from the same scan as the listed bookings.
    pub async fn dashboard(&self) -> Result<Dashboard, LedgerError> {
        let bookings = self.store.scan().await?;
        let totals = LedgerTotals::try_from(LedgerSums::from_bookings(&bookings)?)?;
        Ok(Dashboard { bookings, totals })
    }
}
