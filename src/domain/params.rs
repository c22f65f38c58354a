//! Flat scenario parameters: the shareable query-string format.
//!
//! Every key is optional; missing keys take the default scenario value. The
//! same struct is what the HTTP layer extracts from `?key=value` pairs.

use serde::{Deserialize, Serialize};

use super::{
    DexAssumptions, GasAssumptions, LoanTerms, MarketInputs, MarketView, SweepRange,
    TokenLabels, UserPosition,
};
use crate::config::OpenerMode;
use crate::error::CalcError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScenarioParams {
    pub collateral_token: String,
    pub coll_price_usd: f64,
    pub loan_token: String,
    pub loan_price_usd: f64,
    pub coll_amount: f64,
    pub ltv: f64,
    pub tenor_days: u32,
    pub apr: f64,
    pub upfront_fee: f64,
    pub protocol_fee: f64,
    pub slippage: f64,
    pub swap_fee: f64,
    pub gas_units: f64,
    pub gas_price_gwei: f64,
    pub native_price_usd: f64,
    pub coll_price_change: f64,
    pub loan_price_change: f64,
    pub min_price_change_pct: f64,
    pub max_price_change_pct: f64,
    /// Overrides the configured opener variant for this scenario.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<OpenerMode>,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            collateral_token: "WMNT".to_string(),
            coll_price_usd: 0.38,
            loan_token: "USDT".to_string(),
            loan_price_usd: 1.0,
            coll_amount: 380.0,
            ltv: 0.8,
            tenor_days: 5,
            apr: 0.05,
            upfront_fee: 0.0,
            protocol_fee: 0.002,
            slippage: 0.005,
            swap_fee: 0.0025,
            gas_units: 1_200_000.0,
            gas_price_gwei: 20.0,
            native_price_usd: 0.3,
            coll_price_change: 0.05,
            loan_price_change: 0.0,
            min_price_change_pct: -100.0,
            max_price_change_pct: 100.0,
            mode: None,
        }
    }
}

impl ScenarioParams {
    pub fn labels(&self) -> TokenLabels {
        TokenLabels::new(self.collateral_token.clone(), self.loan_token.clone())
    }

    pub fn market(&self) -> MarketInputs {
        MarketInputs {
            coll_price_usd: self.coll_price_usd,
            loan_price_usd: self.loan_price_usd,
        }
    }

    pub fn user(&self) -> UserPosition {
        UserPosition {
            coll_amount: self.coll_amount,
        }
    }

    pub fn loan(&self) -> LoanTerms {
        LoanTerms {
            ltv: self.ltv,
            apr: self.apr,
            tenor_days: self.tenor_days,
            upfront_fee: self.upfront_fee,
            protocol_fee: self.protocol_fee,
        }
    }

    pub fn dex(&self) -> DexAssumptions {
        DexAssumptions {
            slippage: self.slippage,
            swap_fee: self.swap_fee,
        }
    }

    pub fn gas(&self) -> GasAssumptions {
        GasAssumptions {
            gas_units: self.gas_units,
            gas_price_gwei: self.gas_price_gwei,
            native_price_usd: self.native_price_usd,
        }
    }

    pub fn view(&self) -> MarketView {
        MarketView {
            coll_price_change: self.coll_price_change,
            loan_price_change: self.loan_price_change,
        }
    }

    pub fn range(&self) -> SweepRange {
        SweepRange {
            min_pct: self.min_price_change_pct,
            max_pct: self.max_price_change_pct,
        }
    }

    /// Validate every bundle, failing on the first out-of-domain value.
    pub fn validate(&self) -> Result<(), CalcError> {
        self.market().validate()?;
        self.user().validate()?;
        self.loan().validate()?;
        self.dex().validate()?;
        self.gas().validate()?;
        self.view().validate()?;
        self.range().validate()
    }

    pub fn to_query_string(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(self)
    }

    pub fn from_query_string(query: &str) -> Result<Self, serde_urlencoded::de::Error> {
        serde_urlencoded::from_str(query.trim_start_matches('?'))
    }
}
