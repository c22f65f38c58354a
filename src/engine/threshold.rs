//! Break-even and total-loss price thresholds.
//!
//! Both are roots of the RoI curve in the collateral price multiplier with the
//! loan price held at spot. Break-even uses the lapse-aware close; total loss
//! forces the unwind so the curve keeps its slope below the lapse point.

use super::closer::unwind;
use super::solver::{bisect, bracket_upward, SolverSettings};
use crate::domain::{
    CloseResult, DexAssumptions, GasAssumptions, MarketInputs, OpenResult, UserPosition,
};
use crate::error::CalcError;
use serde::Serialize;

/// Initial multiplier bracket, i.e. price changes of -100% to +200%.
pub const INITIAL_BRACKET: (f64, f64) = (0.0, 3.0);

/// RoI of an opened position as a function of the collateral price multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoiCurve {
    market: MarketInputs,
    open: OpenResult,
    dex: DexAssumptions,
    gas_usd_cost: f64,
    initial_value_usd: f64,
}

impl RoiCurve {
    pub fn new(
        market: &MarketInputs,
        user: &UserPosition,
        open: &OpenResult,
        dex: &DexAssumptions,
        gas: &GasAssumptions,
    ) -> Result<Self, CalcError> {
        market.validate()?;
        user.validate()?;
        dex.validate()?;
        gas.validate()?;
        Ok(Self {
            market: *market,
            open: *open,
            dex: *dex,
            gas_usd_cost: gas.usd_cost(),
            initial_value_usd: user.usd_value(market),
        })
    }

    pub fn initial_value_usd(&self) -> f64 {
        self.initial_value_usd
    }

    /// Close at `spot * multiplier` for collateral and spot for the loan token.
    ///
    /// Negative multipliers are treated as a collateral price of zero.
    pub fn close_at(&self, multiplier: f64, force_repay: bool) -> CloseResult {
        let future_coll_price = self.market.coll_price_usd * multiplier.max(0.0);
        unwind(
            self.open.final_pledge,
            self.open.owed_repayment,
            future_coll_price / self.market.loan_price_usd,
            &self.dex,
            self.gas_usd_cost,
            force_repay,
        )
    }

    /// RoI as a fraction (-1 is a total loss of the initial position).
    pub fn roi(&self, multiplier: f64, force_repay: bool) -> f64 {
        self.roi_of(&self.close_at(multiplier, force_repay))
    }

    /// RoI implied by a close on this curve.
    pub fn roi_of(&self, close: &CloseResult) -> f64 {
        close.net_leftover * self.market.loan_price_usd / self.initial_value_usd - 1.0
    }
}

/// A solved threshold, expressed both ways.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Threshold {
    pub multiplier: f64,
    /// `(multiplier - 1) * 100`.
    pub price_change_pct: f64,
    pub iterations: u32,
}

impl Threshold {
    fn from_multiplier(multiplier: f64, iterations: u32) -> Self {
        Self {
            multiplier,
            price_change_pct: (multiplier - 1.0) * 100.0,
            iterations,
        }
    }
}

fn solve_roi_level(
    curve: &RoiCurve,
    target_roi: f64,
    force_repay: bool,
    settings: &SolverSettings,
) -> Result<Threshold, CalcError> {
    let f = |m: f64| curve.roi(m, force_repay) - target_roi;
    let (lo, hi) = bracket_upward(f, INITIAL_BRACKET.0, INITIAL_BRACKET.1)?;
    let root = bisect(f, lo, hi, settings)?;
    Ok(Threshold::from_multiplier(root.value, root.iterations))
}

/// Price change at which RoI reaches zero.
pub fn break_even(curve: &RoiCurve, settings: &SolverSettings) -> Result<Threshold, CalcError> {
    solve_roi_level(curve, 0.0, false, settings)
}

/// Price change at which RoI reaches -100%.
pub fn total_loss(curve: &RoiCurve, settings: &SolverSettings) -> Result<Threshold, CalcError> {
    solve_roi_level(curve, -1.0, true, settings)
}
