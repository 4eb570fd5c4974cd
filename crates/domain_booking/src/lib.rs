//! Booking Domain - Settlement Engine and Ledger Store Port
//!
//! This crate implements the financial core of the rental booking ledger.
//! Every booking splits the renter's payment between the host payout, the
//! platform margin, insurance and GST, with an optional fixed delivery
//! surcharge.
//!
//! # Reconciliation Law
//!
//! With `adjusted = user_amount - delivery_charge`:
//!
//! ```text
//! profit_raw      = adjusted - host_amount
//! gst             = profit_raw * gst_rate
//! insurance       = (host_amount + profit_raw) * insurance_rate
//! platform_profit = adjusted - host_amount - gst - insurance
//! ```
//!
//! Writes do not enforce the law; [`LedgerStore::rebalance`] restores it by
//! correcting `platform_profit` against the stored insurance and GST.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_booking::{SettlementEngine, KnownAmounts, Delivery};
//! use rust_decimal_macros::dec;
//!
//! let engine = SettlementEngine::default();
//! let settlement = engine.solve(
//!     KnownAmounts::user_and_host(dec!(10000), dec!(7000)),
//!     Delivery::No,
//! )?;
//! assert_eq!(settlement.platform_profit, dec!(1060.00));
//! ```

pub mod booking;
pub mod settlement;
pub mod totals;
pub mod ports;
pub mod memory;
pub mod services;
pub mod error;

pub use booking::{Booking, BookingAmounts, Delivery};
pub use settlement::{KnownAmounts, Settlement, SettlementBasis, SettlementEngine, SettlementRates};
pub use totals::{LedgerSums, LedgerTotals};
pub use ports::LedgerStore;
pub use memory::InMemoryLedgerStore;
pub use services::{Dashboard, LedgerService};
pub use error::LedgerError;
