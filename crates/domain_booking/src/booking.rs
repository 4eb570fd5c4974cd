//! Booking records and the reconciliation law
//!
//! A booking is the settled financial record of one rental transaction.
//! Stored amounts are whatever the caller supplied; the reconciliation law
//! is reapplied in bulk by the ledger store's rebalance pass.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{round_money, try_add, try_sub, BookingId, CoreError, MoneyError};
use crate::settlement::{Settlement, SettlementRates};

/// Whether the booking includes the fixed delivery surcharge
///
/// Persisted and displayed as `Yes` / `No`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Delivery {
    Yes,
    #[default]
    No,
}

impl Delivery {
    /// Returns true when the delivery surcharge applies
    pub fn is_requested(&self) -> bool {
        matches!(self, Delivery::Yes)
    }

    /// Returns the persisted label
    pub fn as_str(&self) -> &'static str {
        match self {
            Delivery::Yes => "Yes",
            Delivery::No => "No",
        }
    }
}

impl From<bool> for Delivery {
    fn from(requested: bool) -> Self {
        if requested {
            Delivery::Yes
        } else {
            Delivery::No
        }
    }
}

impl From<Delivery> for bool {
    fn from(delivery: Delivery) -> bool {
        delivery.is_requested()
    }
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Delivery {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Yes" => Ok(Delivery::Yes),
            "No" => Ok(Delivery::No),
            other => Err(CoreError::validation(format!(
                "Unknown delivery option '{}'",
                other
            ))),
        }
    }
}

/// The monetary fields of a booking plus its delivery flag
///
/// Updates overwrite all of these together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingAmounts {
    pub user_amount: Decimal,
    pub host_amount: Decimal,
    pub platform_profit: Decimal,
    pub insurance: Decimal,
    pub gst: Decimal,
    pub delivery: Delivery,
}

impl BookingAmounts {
    /// Builds booking amounts from a computed settlement
    pub fn from_settlement(settlement: &Settlement, delivery: Delivery) -> Self {
        Self {
            user_amount: settlement.user_amount,
            host_amount: settlement.host_amount,
            platform_profit: settlement.platform_profit,
            insurance: settlement.insurance,
            gst: settlement.gst,
            delivery,
        }
    }

    /// Platform profit implied by the stored amounts
    ///
    /// Trusts the stored insurance and GST; only the delivery surcharge is
    /// taken from `rates`. Rounded to two decimal places.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Overflow` if the stored amounts are too large to
    /// combine
    pub fn reconciled_profit(&self, rates: &SettlementRates) -> Result<Decimal, MoneyError> {
        let adjusted = try_sub(
            "platform_profit",
            self.user_amount,
            rates.delivery_charge_for(self.delivery),
        )?;
        let costs = try_add("platform_profit", self.host_amount, self.insurance)
            .and_then(|costs| try_add("platform_profit", costs, self.gst))?;
        Ok(round_money(try_sub("platform_profit", adjusted, costs)?))
    }

    /// Returns a copy with `platform_profit` corrected by the reconciliation law
    pub fn rebalanced(self, rates: &SettlementRates) -> Result<Self, MoneyError> {
        Ok(Self {
            platform_profit: self.reconciled_profit(rates)?,
            ..self
        })
    }

    /// Returns true if the stored profit already satisfies the law
    ///
    /// Amounts whose reconciled profit is out of range are never balanced.
    pub fn is_balanced(&self, rates: &SettlementRates) -> bool {
        matches!(self.reconciled_profit(rates), Ok(profit) if profit == self.platform_profit)
    }
}

/// The settled financial record of one rental transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: BookingId,
    #[serde(flatten)]
    pub amounts: BookingAmounts,
}

impl Booking {
    pub fn new(booking_id: BookingId, amounts: BookingAmounts) -> Self {
        Self { booking_id, amounts }
    }
}
