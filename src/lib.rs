//! etfcalc - ETF round-trip profit calculator
//!
//! This library computes the brokerage, statutory charges, GST and income tax
//! of buying and selling exchange-traded fund units under the intraday or
//! delivery regime, and reports the profit left after all of them.

pub mod commands;
pub mod config;
pub mod error;
pub mod fees;
pub mod session;
pub mod utils;
