//! Input bundles for a looping scenario.
//!
//! Each bundle is a flat value record. `validate()` rejects values outside the
//! domain the open/close formulas are defined on, so NaN or infinite outputs
//! never reach the sweep.

use crate::error::CalcError;
use serde::{Deserialize, Serialize};

/// Days per year used for simple-interest accrual.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Gas prices are quoted in gwei (1e-9 of the native token).
pub const GWEI_PER_NATIVE: f64 = 1e9;

fn finite(field: &'static str, value: f64) -> Result<(), CalcError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::invalid(field, format!("must be finite, got {}", value)))
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), CalcError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid(field, format!("must be > 0, got {}", value)))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), CalcError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid(field, format!("must be >= 0, got {}", value)))
    }
}

fn fraction(field: &'static str, value: f64) -> Result<(), CalcError> {
    finite(field, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CalcError::invalid(
            field,
            format!("must be within [0, 1], got {}", value),
        ))
    }
}

/// Spot prices of both tokens in USD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketInputs {
    pub coll_price_usd: f64,
    pub loan_price_usd: f64,
}

impl MarketInputs {
    pub fn new(coll_price_usd: f64, loan_price_usd: f64) -> Result<Self, CalcError> {
        let market = Self {
            coll_price_usd,
            loan_price_usd,
        };
        market.validate()?;
        Ok(market)
    }

    pub fn validate(&self) -> Result<(), CalcError> {
        positive("collPriceUsd", self.coll_price_usd)?;
        positive("loanPriceUsd", self.loan_price_usd)
    }

    /// Loan tokens per collateral token.
    pub fn cross_price(&self) -> f64 {
        self.coll_price_usd / self.loan_price_usd
    }

    /// Prices after applying fractional moves to each token.
    pub fn moved(&self, view: &MarketView) -> MarketInputs {
        MarketInputs {
            coll_price_usd: self.coll_price_usd * (1.0 + view.coll_price_change),
            loan_price_usd: self.loan_price_usd * (1.0 + view.loan_price_change),
        }
    }
}

/// Collateral the user already holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPosition {
    pub coll_amount: f64,
}

impl UserPosition {
    pub fn validate(&self) -> Result<(), CalcError> {
        positive("collAmount", self.coll_amount)
    }

    pub fn usd_value(&self, market: &MarketInputs) -> f64 {
        self.coll_amount * market.coll_price_usd
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    /// Loan-to-value, strictly inside (0, 1).
    pub ltv: f64,
    pub apr: f64,
    pub tenor_days: u32,
    pub upfront_fee: f64,
    pub protocol_fee: f64,
}

impl LoanTerms {
    pub fn validate(&self) -> Result<(), CalcError> {
        finite("ltv", self.ltv)?;
        if !(self.ltv > 0.0 && self.ltv < 1.0) {
            return Err(CalcError::invalid(
                "ltv",
                format!("must be within (0, 1), got {}", self.ltv),
            ));
        }
        fraction("apr", self.apr)?;
        if self.tenor_days < 1 {
            return Err(CalcError::invalid("tenorDays", "must be >= 1"));
        }
        fraction("upfrontFee", self.upfront_fee)?;
        fraction("protocolFee", self.protocol_fee)?;
        if self.total_fee_rate() >= 1.0 {
            return Err(CalcError::invalid(
                "upfrontFee",
                format!(
                    "upfront fee + protocol fee must be < 1, got {}",
                    self.total_fee_rate()
                ),
            ));
        }
        Ok(())
    }

    /// Repayment factor under simple interest over the tenor.
    pub fn accrual_factor(&self) -> f64 {
        1.0 + self.apr * f64::from(self.tenor_days) / DAYS_PER_YEAR
    }

    /// Share of the combined pledge withheld as fees.
    pub fn total_fee_rate(&self) -> f64 {
        self.upfront_fee + self.protocol_fee
    }
}

/// DEX friction applied to every swap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexAssumptions {
    pub slippage: f64,
    pub swap_fee: f64,
}

impl DexAssumptions {
    pub fn validate(&self) -> Result<(), CalcError> {
        fraction("slippage", self.slippage)?;
        fraction("swapFee", self.swap_fee)?;
        if self.slippage + self.swap_fee >= 1.0 {
            return Err(CalcError::invalid(
                "slippage",
                format!(
                    "slippage + swap fee must be < 1, got {}",
                    self.slippage + self.swap_fee
                ),
            ));
        }
        Ok(())
    }

    /// Share of the swapped notional that arrives on the other side.
    pub fn retention(&self) -> f64 {
        1.0 - self.slippage - self.swap_fee
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasAssumptions {
    /// Gas used for the full open + close round trip.
    pub gas_units: f64,
    pub gas_price_gwei: f64,
    pub native_price_usd: f64,
}

impl GasAssumptions {
    pub fn validate(&self) -> Result<(), CalcError> {
        non_negative("gasUnits", self.gas_units)?;
        non_negative("gasPriceGwei", self.gas_price_gwei)?;
        non_negative("nativePriceUsd", self.native_price_usd)
    }

    pub fn usd_cost(&self) -> f64 {
        self.gas_units * self.gas_price_gwei / GWEI_PER_NATIVE * self.native_price_usd
    }
}

/// Expected fractional price moves over the tenor (0.05 = +5%).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketView {
    pub coll_price_change: f64,
    pub loan_price_change: f64,
}

impl MarketView {
    pub fn validate(&self) -> Result<(), CalcError> {
        for (field, value) in [
            ("collPriceChange", self.coll_price_change),
            ("loanPriceChange", self.loan_price_change),
        ] {
            finite(field, value)?;
            if !(-1.0..=10.0).contains(&value) {
                return Err(CalcError::invalid(
                    field,
                    format!("must be within [-1, 10], got {}", value),
                ));
            }
        }
        if self.loan_price_change <= -1.0 {
            return Err(CalcError::invalid(
                "loanPriceChange",
                "loan token cannot go to zero",
            ));
        }
        Ok(())
    }
}

/// Hypothetical collateral price-change interval, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepRange {
    pub min_pct: f64,
    pub max_pct: f64,
}

impl SweepRange {
    pub fn validate(&self) -> Result<(), CalcError> {
        finite("minPriceChangePct", self.min_pct)?;
        finite("maxPriceChangePct", self.max_pct)?;
        if self.min_pct < -100.0 {
            return Err(CalcError::invalid(
                "minPriceChangePct",
                format!("must be >= -100, got {}", self.min_pct),
            ));
        }
        if self.min_pct > self.max_pct {
            return Err(CalcError::invalid(
                "maxPriceChangePct",
                format!("must be >= min ({}), got {}", self.min_pct, self.max_pct),
            ));
        }
        Ok(())
    }
}

impl Default for SweepRange {
    fn default() -> Self {
        Self {
            min_pct: -100.0,
            max_pct: 100.0,
        }
    }
}
