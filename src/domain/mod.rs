//! Domain types for the looping calculator.
//!
//! This module provides:
//! - Input bundles (market, user, loan, DEX, gas, market view, sweep range)
//! - Open/close result records
//! - The flat, shareable `ScenarioParams` format
//! - Display rounding helpers backed by rust_decimal

pub mod decimal;
pub mod inputs;
pub mod params;
pub mod primitives;
pub mod results;

pub use inputs::{
    DexAssumptions, GasAssumptions, LoanTerms, MarketInputs, MarketView, SweepRange,
    UserPosition,
};
pub use params::ScenarioParams;
pub use primitives::{TokenLabel, TokenLabels};
pub use results::{CloseResult, OpenResult};
