//! Settlement Engine Tests
//!
//! # Test Organization
//!
//! - `user_and_host_tests` - Settlement from user and host amounts
//! - `user_and_profit_tests` - Two-stage profit recomputation
//! - `host_and_profit_tests` - Settlement from host amount and profit
//! - `input_tests` - Missing inputs and precedence
//! - `rate_tests` - Non-default rates
//! - Property tests for the reconciliation law

use core_kernel::round_money;
use domain_booking::{
    Delivery, KnownAmounts, LedgerError, SettlementBasis, SettlementEngine, SettlementRates,
};
use proptest::prelude::*;
use rust_decimal_macros::dec;
use test_utils::{amount_strategy, RateFixtures};

fn engine() -> SettlementEngine {
    SettlementEngine::default()
}

// ============================================================================
// USER AND HOST
// ============================================================================

mod user_and_host_tests {
    use super::*;

    /// Verifies the reference booking: 10,000 charged, 7,000 to the host
    #[test]
    fn test_reference_booking() {
        let settlement = engine()
            .solve(KnownAmounts::user_and_host(dec!(10000), dec!(7000)), Delivery::No)
            .unwrap();

        assert_eq!(settlement.user_amount, dec!(10000.00));
        assert_eq!(settlement.host_amount, dec!(7000.00));
        assert_eq!(settlement.gst, dec!(540.00));
        assert_eq!(settlement.insurance, dec!(1400.00));
        assert_eq!(settlement.platform_profit, dec!(1060.00));
    }

    /// Verifies the delivery surcharge is absorbed before the split
    #[test]
    fn test_delivery_surcharge_absorbed() {
        let settlement = engine()
            .solve(KnownAmounts::user_and_host(dec!(10800), dec!(7000)), Delivery::Yes)
            .unwrap();

        assert_eq!(settlement.user_amount, dec!(10800.00));
        assert_eq!(settlement.gst, dec!(540.00));
        assert_eq!(settlement.insurance, dec!(1400.00));
        assert_eq!(settlement.platform_profit, dec!(1060.00));
    }

    /// Verifies a host payout above the adjusted amount yields a loss
    #[test]
    fn test_loss_making_booking() {
        let settlement = engine()
            .solve(KnownAmounts::user_and_host(dec!(7000), dec!(8000)), Delivery::No)
            .unwrap();

        assert_eq!(settlement.gst, dec!(-180.00));
        assert_eq!(settlement.insurance, dec!(980.00));
        assert_eq!(settlement.platform_profit, dec!(-1800.00));
    }

    /// Verifies outputs are rounded to two places
    #[test]
    fn test_outputs_rounded() {
        let settlement = engine()
            .solve(KnownAmounts::user_and_host(dec!(100.01), dec!(33.33)), Delivery::No)
            .unwrap();

        assert_eq!(settlement.gst, dec!(12.00));
        assert_eq!(settlement.insurance, dec!(14.00));
        assert_eq!(settlement.platform_profit, dec!(40.68));
    }
}

// ============================================================================
// USER AND PROFIT
// ============================================================================

mod user_and_profit_tests {
    use super::*;

    /// Verifies the supplied profit backs out the host amount and is then
    /// recomputed net of GST and insurance
    #[test]
    fn test_profit_is_recomputed() {
        let settlement = engine()
            .solve(KnownAmounts::user_and_profit(dec!(10000), dec!(3000)), Delivery::No)
            .unwrap();

        assert_eq!(settlement.host_amount, dec!(7000.00));
        assert_eq!(settlement.gst, dec!(540.00));
        assert_eq!(settlement.insurance, dec!(1400.00));
        assert_eq!(settlement.platform_profit, dec!(1060.00));
    }

    /// Verifies delivery is removed before backing out the host amount
    #[test]
    fn test_with_delivery() {
        let settlement = engine()
            .solve(KnownAmounts::user_and_profit(dec!(10800), dec!(3000)), Delivery::Yes)
            .unwrap();

        assert_eq!(settlement.user_amount, dec!(10800.00));
        assert_eq!(settlement.host_amount, dec!(7000.00));
        assert_eq!(settlement.platform_profit, dec!(1060.00));
    }
}

// ============================================================================
// HOST AND PROFIT
// ============================================================================

mod host_and_profit_tests {
    use super::*;

    /// Verifies the user amount is rebuilt including the delivery surcharge
    #[test]
    fn test_user_amount_derived() {
        let settlement = engine()
            .solve(KnownAmounts::host_and_profit(dec!(7000), dec!(3000)), Delivery::Yes)
            .unwrap();

        assert_eq!(settlement.user_amount, dec!(10800.00));
        assert_eq!(settlement.host_amount, dec!(7000.00));
        assert_eq!(settlement.gst, dec!(540.00));
        assert_eq!(settlement.insurance, dec!(1400.00));
        assert_eq!(settlement.platform_profit, dec!(1060.00));
    }

    /// Verifies a negative profit produces negative GST
    #[test]
    fn test_negative_profit() {
        let settlement = engine()
            .solve(KnownAmounts::host_and_profit(dec!(5000), dec!(-500)), Delivery::No)
            .unwrap();

        assert_eq!(settlement.user_amount, dec!(4500.00));
        assert_eq!(settlement.gst, dec!(-90.00));
        assert_eq!(settlement.insurance, dec!(630.00));
        assert_eq!(settlement.platform_profit, dec!(-1040.00));
    }
}

// ============================================================================
// INPUTS
// ============================================================================

mod input_tests {
    use super::*;

    /// Verifies a lone platform profit is rejected
    #[test]
    fn test_only_profit_is_insufficient() {
        let known = KnownAmounts {
            platform_profit: Some(dec!(1060)),
            ..Default::default()
        };
        let err = engine().solve(known, Delivery::No).unwrap_err();

        assert!(matches!(err, LedgerError::InsufficientInputs));
        assert!(err.to_string().contains("provide any two of the three amounts"));
    }

    /// Verifies no amounts at all is rejected
    #[test]
    fn test_no_amounts_is_insufficient() {
        let result = engine().solve(KnownAmounts::default(), Delivery::Yes);
        assert!(matches!(result, Err(LedgerError::InsufficientInputs)));
    }

    /// Verifies a lone user amount is rejected
    #[test]
    fn test_only_user_amount_is_insufficient() {
        let known = KnownAmounts {
            user_amount: Some(dec!(10000)),
            ..Default::default()
        };
        assert!(engine().solve(known, Delivery::No).is_err());
    }

    /// Verifies user and host take precedence when all three are given
    #[test]
    fn test_all_three_uses_user_and_host() {
        let known = KnownAmounts {
            user_amount: Some(dec!(10000)),
            host_amount: Some(dec!(7000)),
            platform_profit: Some(dec!(5)),
        };
        assert_eq!(known.basis(), Some(SettlementBasis::UserAndHost));

        let settlement = engine().solve(known, Delivery::No).unwrap();
        assert_eq!(settlement.platform_profit, dec!(1060.00));
    }
}

// ============================================================================
// RATES
// ============================================================================

mod rate_tests {
    use super::*;

    /// Verifies configured rates replace the defaults
    #[test]
    fn test_reduced_rates() {
        let engine = SettlementEngine::new(RateFixtures::reduced());
        let settlement = engine
            .solve(KnownAmounts::user_and_host(dec!(10500), dec!(7000)), Delivery::Yes)
            .unwrap();

        // adjusted 10,000: GST 5% of 3,000, insurance 10% of 10,000
        assert_eq!(settlement.gst, dec!(150.00));
        assert_eq!(settlement.insurance, dec!(1000.00));
        assert_eq!(settlement.platform_profit, dec!(1850.00));
        assert_eq!(engine.rates(), &RateFixtures::reduced());
    }

    /// Verifies the surcharge is zero without delivery
    #[test]
    fn test_delivery_charge_for() {
        let rates = SettlementRates::default();
        assert_eq!(rates.delivery_charge_for(Delivery::Yes), dec!(800));
        assert_eq!(rates.delivery_charge_for(Delivery::No), dec!(0));
    }
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    /// profit = user - host - gst - insurance, computed before rounding
    #[test]
    fn user_and_host_satisfies_law(user in amount_strategy(), host in amount_strategy()) {
        let settlement = engine()
            .solve(KnownAmounts::user_and_host(user, host), Delivery::No)
            .unwrap();

        let profit_raw = user - host;
        let gst = profit_raw * dec!(0.18);
        let insurance = (host + profit_raw) * dec!(0.14);

        prop_assert_eq!(settlement.gst, round_money(gst));
        prop_assert_eq!(settlement.insurance, round_money(insurance));
        prop_assert_eq!(settlement.platform_profit, round_money(user - host - gst - insurance));
    }

    /// Adding the surcharge with delivery leaves the split unchanged
    #[test]
    fn delivery_surcharge_is_neutral(user in amount_strategy(), host in amount_strategy()) {
        let plain = engine()
            .solve(KnownAmounts::user_and_host(user, host), Delivery::No)
            .unwrap();
        let delivered = engine()
            .solve(KnownAmounts::user_and_host(user + dec!(800), host), Delivery::Yes)
            .unwrap();

        prop_assert_eq!(plain.platform_profit, delivered.platform_profit);
        prop_assert_eq!(plain.gst, delivered.gst);
        prop_assert_eq!(plain.insurance, delivered.insurance);
    }

    /// Every output carries at most two decimal places
    #[test]
    fn outputs_are_rounded(user in amount_strategy(), profit in amount_strategy()) {
        let settlement = engine()
            .solve(KnownAmounts::user_and_profit(user, profit), Delivery::No)
            .unwrap();

        for value in [
            settlement.user_amount,
            settlement.host_amount,
            settlement.platform_profit,
            settlement.insurance,
            settlement.gst,
        ] {
            prop_assert!(value.scale() <= 2);
        }
    }
}
