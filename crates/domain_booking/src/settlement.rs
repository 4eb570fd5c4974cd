//! Settlement engine
//!
//! Derives the full settlement of a booking from any two of the user
//! amount, host amount and platform profit. Intermediate values keep full
//! decimal precision; rounding happens once, on the returned settlement.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{round_money, try_add, try_mul, try_sub, MoneyError};
use crate::booking::Delivery;
use crate::error::LedgerError;

/// Rates applied when settling a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRates {
    /// GST charged on the platform margin
    pub gst_rate: Decimal,
    /// Insurance charged on the host payout plus platform margin
    pub insurance_rate: Decimal,
    /// Fixed surcharge added to the user amount when delivery is requested
    pub delivery_charge: Decimal,
}

impl Default for SettlementRates {
    fn default() -> Self {
        Self {
            gst_rate: dec!(0.18),
            insurance_rate: dec!(0.14),
            delivery_charge: dec!(800),
        }
    }
}

impl SettlementRates {
    /// Returns the delivery surcharge applicable to a booking
    pub fn delivery_charge_for(&self, delivery: Delivery) -> Decimal {
        if delivery.is_requested() {
            self.delivery_charge
        } else {
            Decimal::ZERO
        }
    }
}

/// The amounts a caller knows before settlement
///
/// At least two must be present. When all three are present the user and
/// host amounts take precedence and the profit is recomputed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KnownAmounts {
    pub user_amount: Option<Decimal>,
    pub host_amount: Option<Decimal>,
    pub platform_profit: Option<Decimal>,
}

impl KnownAmounts {
    pub fn user_and_host(user_amount: Decimal, host_amount: Decimal) -> Self {
        Self {
            user_amount: Some(user_amount),
            host_amount: Some(host_amount),
            platform_profit: None,
        }
    }

    pub fn user_and_profit(user_amount: Decimal, platform_profit: Decimal) -> Self {
        Self {
            user_amount: Some(user_amount),
            host_amount: None,
            platform_profit: Some(platform_profit),
        }
    }

    pub fn host_and_profit(host_amount: Decimal, platform_profit: Decimal) -> Self {
        Self {
            user_amount: None,
            host_amount: Some(host_amount),
            platform_profit: Some(platform_profit),
        }
    }

    /// Determines which pair of amounts drives the settlement
    pub fn basis(&self) -> Option<SettlementBasis> {
        match (self.user_amount, self.host_amount, self.platform_profit) {
            (Some(_), Some(_), _) => Some(SettlementBasis::UserAndHost),
            (Some(_), None, Some(_)) => Some(SettlementBasis::UserAndProfit),
            (None, Some(_), Some(_)) => Some(SettlementBasis::HostAndProfit),
            _ => None,
        }
    }
}

/// The pair of known amounts a settlement was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementBasis {
    UserAndHost,
    UserAndProfit,
    HostAndProfit,
}

/// A fully derived settlement, rounded to two decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub user_amount: Decimal,
    pub host_amount: Decimal,
    pub platform_profit: Decimal,
    pub insurance: Decimal,
    pub gst: Decimal,
}

impl Settlement {
    fn rounded(self) -> Self {
        Self {
            user_amount: round_money(self.user_amount),
            host_amount: round_money(self.host_amount),
            platform_profit: round_money(self.platform_profit),
            insurance: round_money(self.insurance),
            gst: round_money(self.gst),
        }
    }
}

/// Stateless calculator deriving settlements from partial inputs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettlementEngine {
    rates: SettlementRates,
}

impl SettlementEngine {
    /// Creates an engine with the given rates
    pub fn new(rates: SettlementRates) -> Self {
        Self { rates }
    }

    /// Returns the rates this engine applies
    pub fn rates(&self) -> &SettlementRates {
        &self.rates
    }

    /// Derives the full settlement of a booking
    ///
    /// # Arguments
    ///
    /// * `known` - Any two of user amount, host amount and platform profit
    /// * `delivery` - Whether the delivery surcharge applies
    ///
    /// # Returns
    ///
    /// The settlement with every amount rounded to two decimal places
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InsufficientInputs` if fewer than two amounts
    /// are known, and `LedgerError::InvalidValue` if an intermediate amount
    /// leaves the representable decimal range
    pub fn solve(&self, known: KnownAmounts, delivery: Delivery) -> Result<Settlement, LedgerError> {
        let delivery_charge = self.rates.delivery_charge_for(delivery);

        let (user_amount, host_amount, margin) =
            match (known.user_amount, known.host_amount, known.platform_profit) {
                (Some(user_amount), Some(host_amount), _) => {
                    let adjusted = try_sub("user_amount", user_amount, delivery_charge)?;
                    let margin = try_sub("platform_profit", adjusted, host_amount)?;
                    (user_amount, host_amount, margin)
                }
                // The supplied profit only backs out the host amount and prices
                // GST and insurance; the returned profit is recomputed from them.
                (Some(user_amount), None, Some(platform_profit)) => {
                    let adjusted = try_sub("user_amount", user_amount, delivery_charge)?;
                    let host_amount = try_sub("host_amount", adjusted, platform_profit)?;
                    (user_amount, host_amount, platform_profit)
                }
                (None, Some(host_amount), Some(platform_profit)) => {
                    let adjusted = try_add("user_amount", host_amount, platform_profit)?;
                    let user_amount = try_add("user_amount", adjusted, delivery_charge)?;
                    (user_amount, host_amount, platform_profit)
                }
                _ => return Err(LedgerError::InsufficientInputs),
            };

        Ok(self.settle(user_amount, host_amount, margin)?.rounded())
    }

    /// Prices GST and insurance on `margin` and nets them out of the profit
    ///
    /// In every branch the adjusted user amount equals `host_amount + margin`,
    /// so the profit is `margin - gst - insurance`.
    fn settle(
        &self,
        user_amount: Decimal,
        host_amount: Decimal,
        margin: Decimal,
    ) -> Result<Settlement, MoneyError> {
        let gst = try_mul("gst", margin, self.rates.gst_rate)?;
        let insured = try_add("insurance", host_amount, margin)?;
        let insurance = try_mul("insurance", insured, self.rates.insurance_rate)?;
        let platform_profit = try_sub("platform_profit", margin, gst)
            .and_then(|net| try_sub("platform_profit", net, insurance))?;

        Ok(Settlement {
            user_amount,
            host_amount,
            platform_profit,
            insurance,
            gst,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rates() {
        let rates = SettlementRates::default();
        assert_eq!(rates.gst_rate, dec!(0.18));
        assert_eq!(rates.insurance_rate, dec!(0.14));
        assert_eq!(rates.delivery_charge, dec!(800));
    }

    #[test]
    fn test_basis_precedence() {
        let all = KnownAmounts {
            user_amount: Some(dec!(1)),
            host_amount: Some(dec!(1)),
            platform_profit: Some(dec!(1)),
        };
        assert_eq!(all.basis(), Some(SettlementBasis::UserAndHost));
        assert_eq!(KnownAmounts::default().basis(), None);
    }

    #[test]
    fn test_solve_user_and_host() {
        let settlement = SettlementEngine::default()
            .solve(KnownAmounts::user_and_host(dec!(10000), dec!(7000)), Delivery::No)
            .unwrap();
        assert_eq!(settlement.gst, dec!(540));
        assert_eq!(settlement.insurance, dec!(1400));
        assert_eq!(settlement.platform_profit, dec!(1060));
    }

    #[test]
    fn test_single_amount_is_insufficient() {
        let known = KnownAmounts {
            platform_profit: Some(dec!(1060)),
            ..Default::default()
        };
        let result = SettlementEngine::default().solve(known, Delivery::No);
        assert!(matches!(result, Err(LedgerError::InsufficientInputs)));
    }

    #[test]
    fn test_out_of_range_margin_is_rejected() {
        let large = Decimal::from_scientific("7e28").unwrap();
        let result = SettlementEngine::default()
            .solve(KnownAmounts::user_and_host(large, -large), Delivery::No);
        assert!(matches!(result, Err(LedgerError::InvalidValue(_))));
    }
}
