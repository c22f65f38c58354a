//! Outputs of opening and closing a looping position.

use serde::{Deserialize, Serialize};

/// Flows when the position is opened.
///
/// Loan-token amounts: `flashloan_amount`, `owed_repayment`, `sold_on_dex`.
/// Collateral-token amounts: everything else.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenResult {
    pub flashloan_amount: f64,
    pub owed_repayment: f64,
    pub sold_on_dex: f64,
    pub received_from_dex: f64,
    pub combined_pledge: f64,
    pub upfront_fee_abs: f64,
    pub protocol_fee_abs: f64,
    /// Pledge net of both fees; this is what can be reclaimed on repayment.
    pub final_pledge: f64,
}

impl OpenResult {
    /// Interest owed on top of the flash-loan principal.
    pub fn interest(&self) -> f64 {
        self.owed_repayment - self.flashloan_amount
    }

    /// Collateral exposure per unit of collateral the user started with.
    pub fn leverage(&self, user_coll_amount: f64) -> f64 {
        self.final_pledge / user_coll_amount
    }

    pub fn total_fees(&self) -> f64 {
        self.upfront_fee_abs + self.protocol_fee_abs
    }
}

/// Flows when the position is unwound at some future price pair.
///
/// `flashloan_amount` and `sold_on_dex` are collateral-token amounts; the
/// rest are loan-token amounts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseResult {
    pub flashloan_amount: f64,
    pub sold_on_dex: f64,
    pub received_from_dex: f64,
    /// DEX proceeds minus the owed repayment.
    pub gross_leftover: f64,
    /// Gross leftover minus the gas cost.
    pub net_leftover: f64,
    pub rational_to_repay: bool,
}

impl CloseResult {
    /// The borrower walks away: nothing is borrowed, sold or left over.
    pub fn lapsed() -> Self {
        Self::default()
    }

    pub fn is_lapsed(&self) -> bool {
        !self.rational_to_repay
            && self.flashloan_amount == 0.0
            && self.sold_on_dex == 0.0
            && self.received_from_dex == 0.0
            && self.net_leftover == 0.0
    }
}
