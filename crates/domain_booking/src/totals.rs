//! Ledger-wide aggregate figures

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{percentage_of, round_money, try_add, MoneyError};
use crate::booking::{Booking, BookingAmounts};

/// Raw column sums over every stored booking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerSums {
    pub total_profit: Decimal,
    pub total_host_amount: Decimal,
    pub total_insurance: Decimal,
    pub total_sales: Decimal,
}

impl LedgerSums {
    /// Adds one booking's amounts to the running sums
    ///
    /// The sums are left untouched when any column would overflow.
    pub fn accumulate(&mut self, amounts: &BookingAmounts) -> Result<(), MoneyError> {
        *self = Self {
            total_profit: try_add("total_profit", self.total_profit, amounts.platform_profit)?,
            total_host_amount: try_add("total_host_amount", self.total_host_amount, amounts.host_amount)?,
            total_insurance: try_add("total_insurance", self.total_insurance, amounts.insurance)?,
            total_sales: try_add("total_sales", self.total_sales, amounts.user_amount)?,
        };
        Ok(())
    }

    /// Sums the amounts of the given bookings
    pub fn from_bookings<'a>(
        bookings: impl IntoIterator<Item = &'a Booking>,
    ) -> Result<Self, MoneyError> {
        let mut sums = Self::default();
        for booking in bookings {
            sums.accumulate(&booking.amounts)?;
        }
        Ok(sums)
    }
}

/// Aggregate totals shown on the ledger dashboard
///
/// EBITDA here is `total_profit + total_insurance`, a platform-specific
/// approximation. Percentages are zero when there are no sales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub total_profit: Decimal,
    pub total_host_amount: Decimal,
    pub total_insurance: Decimal,
    pub total_sales: Decimal,
    pub profit_percentage: Decimal,
    pub ebitda: Decimal,
    pub ebitda_percentage: Decimal,
}

impl TryFrom<LedgerSums> for LedgerTotals {
    type Error = MoneyError;

    fn try_from(sums: LedgerSums) -> Result<Self, Self::Error> {
        let ebitda = try_add("ebitda", sums.total_profit, sums.total_insurance)?;
        Ok(Self {
            total_profit: sums.total_profit,
            total_host_amount: sums.total_host_amount,
            total_insurance: sums.total_insurance,
            total_sales: sums.total_sales,
            profit_percentage: round_money(percentage_of(sums.total_profit, sums.total_sales)?),
            ebitda: round_money(ebitda),
            ebitda_percentage: round_money(percentage_of(ebitda, sums.total_sales)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::BookingId;
    use rust_decimal_macros::dec;

    fn booking(id: &str, user_amount: Decimal, platform_profit: Decimal) -> Booking {
        Booking::new(
            BookingId::new(id).unwrap(),
            BookingAmounts {
                user_amount,
                platform_profit,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_overflowing_column_leaves_sums_untouched() {
        let mut sums = LedgerSums::default();
        sums.accumulate(&booking("BK-1", dec!(100), Decimal::MAX).amounts).unwrap();

        let result = sums.accumulate(&booking("BK-2", dec!(100), dec!(1)).amounts);

        assert_eq!(result, Err(MoneyError::Overflow("total_profit")));
        assert_eq!(sums.total_sales, dec!(100));
        assert_eq!(sums.total_profit, Decimal::MAX);
    }

    #[test]
    fn test_out_of_range_ebitda_is_an_error() {
        let sums = LedgerSums {
            total_profit: Decimal::MAX,
            total_insurance: dec!(1),
            total_sales: dec!(10),
            ..Default::default()
        };
        assert_eq!(LedgerTotals::try_from(sums), Err(MoneyError::Overflow("ebitda")));
    }
}
