//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating amounts and bookings.

use domain_booking::{BookingAmounts, Delivery};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for non-negative amounts with two decimal places (0 to 10M)
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000i64).prop_map(|minor| Decimal::new(minor, 2))
}

/// Strategy for signed amounts with two decimal places, e.g. profits
pub fn signed_amount_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000i64..1_000_000_000i64).prop_map(|minor| Decimal::new(minor, 2))
}

/// Strategy for the delivery flag
pub fn delivery_strategy() -> impl Strategy<Value = Delivery> {
    prop_oneof![Just(Delivery::Yes), Just(Delivery::No)]
}

/// Strategy for arbitrary stored amounts, balanced or not
pub fn booking_amounts_strategy() -> impl Strategy<Value = BookingAmounts> {
    (
        amount_strategy(),
        amount_strategy(),
        signed_amount_strategy(),
        amount_strategy(),
        signed_amount_strategy(),
        delivery_strategy(),
    )
        .prop_map(|(user_amount, host_amount, platform_profit, insurance, gst, delivery)| {
            BookingAmounts {
                user_amount,
                host_amount,
                platform_profit,
                insurance,
                gst,
                delivery,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn amounts_have_two_decimal_places(amount in amount_strategy()) {
            prop_assert!(amount >= Decimal::ZERO);
            prop_assert_eq!(amount.scale(), 2);
        }
    }
}
