//! Pre-built Test Fixtures
//!
//! Provides ready-to-use bookings whose figures are easy to verify by hand.
//! The reference booking charges the renter 10,000 with a 7,000 host
//! payout, giving GST 540, insurance 1,400 and a platform profit of 1,060.

use core_kernel::BookingId;
use domain_booking::{Booking, BookingAmounts, Delivery, SettlementRates};
use rust_decimal_macros::dec;

/// Fixture for booking test data
pub struct BookingFixtures;

impl BookingFixtures {
    /// Parses a booking identifier, panicking on invalid input
    pub fn id(value: &str) -> BookingId {
        BookingId::new(value).expect("fixture booking id must be valid")
    }

    /// The reference booking, already balanced
    pub fn standard() -> Booking {
        Booking::new(Self::id("BK-1001"), Self::standard_amounts())
    }

    /// Amounts of the reference booking
    pub fn standard_amounts() -> BookingAmounts {
        BookingAmounts {
            user_amount: dec!(10000.00),
            host_amount: dec!(7000.00),
            platform_profit: dec!(1060.00),
            insurance: dec!(1400.00),
            gst: dec!(540.00),
            delivery: Delivery::No,
        }
    }

    /// The reference booking with delivery; the renter pays 800 more
    pub fn with_delivery() -> Booking {
        Booking::new(
            Self::id("BK-1002"),
            BookingAmounts {
                user_amount: dec!(10800.00),
                delivery: Delivery::Yes,
                ..Self::standard_amounts()
            },
        )
    }

    /// A booking where the host payout exceeds the renter's payment
    pub fn loss_making() -> Booking {
        Booking::new(
            Self::id("BK-1003"),
            BookingAmounts {
                user_amount: dec!(7000.00),
                host_amount: dec!(8000.00),
                platform_profit: dec!(-1800.00),
                insurance: dec!(980.00),
                gst: dec!(-180.00),
                delivery: Delivery::No,
            },
        )
    }

    /// The reference booking with a profit that violates the law
    pub fn drifted() -> Booking {
        Booking::new(
            Self::id("BK-1004"),
            BookingAmounts {
                platform_profit: dec!(2500.00),
                ..Self::standard_amounts()
            },
        )
    }
}

/// Fixture for settlement rates
pub struct RateFixtures;

impl RateFixtures {
    /// The platform's standard rates
    pub fn standard() -> SettlementRates {
        SettlementRates::default()
    }

    /// Alternative rates for configuration tests
    pub fn reduced() -> SettlementRates {
        SettlementRates {
            gst_rate: dec!(0.05),
            insurance_rate: dec!(0.10),
            delivery_charge: dec!(500),
        }
    }
}
