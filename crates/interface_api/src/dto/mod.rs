//! Request and response bodies

pub mod ledger;
