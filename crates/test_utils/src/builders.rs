//! Test Data Builders
//!
//! Provides a builder for constructing bookings with sensible defaults.
//! Tests specify only the fields that matter and either keep the reference
//! amounts or let the settlement engine derive consistent ones.

use core_kernel::BookingId;
use domain_booking::{
    Booking, BookingAmounts, Delivery, KnownAmounts, SettlementEngine,
};
use rust_decimal::Decimal;

use crate::fixtures::BookingFixtures;

/// Builder for constructing test bookings
pub struct BookingBuilder {
    booking_id: BookingId,
    amounts: BookingAmounts,
}

impl Default for BookingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingBuilder {
    /// Creates a new builder holding the reference booking
    pub fn new() -> Self {
        let standard = BookingFixtures::standard();
        Self {
            booking_id: standard.booking_id,
            amounts: standard.amounts,
        }
    }

    /// Sets the booking ID
    pub fn with_id(mut self, id: &str) -> Self {
        self.booking_id = BookingFixtures::id(id);
        self
    }

    /// Sets the user amount
    pub fn with_user_amount(mut self, amount: Decimal) -> Self {
        self.amounts.user_amount = amount;
        self
    }

    /// Sets the host amount
    pub fn with_host_amount(mut self, amount: Decimal) -> Self {
        self.amounts.host_amount = amount;
        self
    }

    /// Sets the platform profit
    pub fn with_platform_profit(mut self, amount: Decimal) -> Self {
        self.amounts.platform_profit = amount;
        self
    }

    /// Sets the insurance
    pub fn with_insurance(mut self, amount: Decimal) -> Self {
        self.amounts.insurance = amount;
        self
    }

    /// Sets the GST
    pub fn with_gst(mut self, amount: Decimal) -> Self {
        self.amounts.gst = amount;
        self
    }

    /// Sets the delivery flag
    pub fn with_delivery(mut self, delivery: Delivery) -> Self {
        self.amounts.delivery = delivery;
        self
    }

    /// Replaces every derived amount with the engine's settlement of the
    /// current user and host amounts
    pub fn settled(mut self, engine: &SettlementEngine) -> Self {
        let known = KnownAmounts::user_and_host(self.amounts.user_amount, self.amounts.host_amount);
        let settlement = engine
            .solve(known, self.amounts.delivery)
            .expect("user and host amounts are always sufficient");
        self.amounts = BookingAmounts::from_settlement(&settlement, self.amounts.delivery);
        self
    }

    /// Builds the booking
    pub fn build(self) -> Booking {
        Booking::new(self.booking_id, self.amounts)
    }

    /// Builds `count` bookings with IDs `{prefix}-1` .. `{prefix}-{count}`
    pub fn build_many(self, prefix: &str, count: usize) -> Vec<Booking> {
        (1..=count)
            .map(|n| Booking::new(BookingFixtures::id(&format!("{}-{}", prefix, n)), self.amounts))
            .collect()
    }
}
