use crate::config::{Config, OpenerMode};
use crate::domain::{CloseResult, OpenResult, ScenarioParams, TokenLabels};
use crate::engine::{self, RoiCurve, Sweep, SweepPoint, Threshold};
use crate::error::CalcError;
use crate::report::{self, DetailRow, OverviewBar};
use serde::Serialize;
use tracing::debug;

/// Runs the calculator for a set of scenario parameters.
#[derive(Debug, Clone)]
pub struct ScenarioEvaluator {
    config: Config,
}

/// A validated scenario with its position opened.
#[derive(Debug, Clone)]
pub struct OpenedScenario {
    pub params: ScenarioParams,
    pub mode: OpenerMode,
    pub open: OpenResult,
    pub curve: RoiCurve,
}

/// Unwind at the expected future prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepDive {
    pub future_coll_price_usd: f64,
    pub future_loan_price_usd: f64,
    /// Change of the collateral/loan cross price, in percent.
    pub assumed_price_change_pct: f64,
    pub gas_usd_cost: f64,
    pub close: CloseResult,
    pub roi_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    pub break_even: Threshold,
    pub total_loss: Threshold,
}

/// Everything the presentation layer needs for one scenario.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioReport {
    pub mode: OpenerMode,
    pub tokens: TokenLabels,
    pub initial_value_usd: f64,
    pub open: OpenResult,
    pub leverage: f64,
    pub deep_dive: DeepDive,
    pub thresholds: Thresholds,
    pub sweep: Vec<SweepPoint>,
    pub summary: Vec<String>,
    pub open_details: Vec<DetailRow>,
    pub close_details: Vec<DetailRow>,
    pub overview: Vec<OverviewBar>,
}

impl ScenarioEvaluator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validate all inputs and open the position.
    pub fn open(&self, params: &ScenarioParams) -> Result<OpenedScenario, CalcError> {
        params.validate()?;

        let mode = params.mode.unwrap_or(self.config.opener_mode);
        let market = params.market();
        let user = params.user();
        let dex = params.dex();

        let open = engine::open_with_mode(
            mode,
            &self.config.solver,
            &market,
            &user,
            &params.loan(),
            &dex,
        )?;
        let curve = RoiCurve::new(&market, &user, &open, &dex, &params.gas())?;

        Ok(OpenedScenario {
            params: params.clone(),
            mode,
            open,
            curve,
        })
    }

    pub fn thresholds(&self, scenario: &OpenedScenario) -> Result<Thresholds, CalcError> {
        Ok(Thresholds {
            break_even: engine::break_even(&scenario.curve, &self.config.solver)?,
            total_loss: engine::total_loss(&scenario.curve, &self.config.solver)?,
        })
    }

    pub fn sweep<'a>(&self, scenario: &'a OpenedScenario) -> Result<Sweep<'a>, CalcError> {
        engine::sweep(
            &scenario.curve,
            scenario.params.range(),
            self.config.sweep_samples,
        )
    }

    pub fn evaluate(&self, params: &ScenarioParams) -> Result<ScenarioReport, CalcError> {
        let scenario = self.open(params)?;
        let deep_dive = scenario.deep_dive()?;
        let thresholds = self.thresholds(&scenario)?;
        let sweep: Vec<SweepPoint> = self.sweep(&scenario)?.collect();
        let leverage = scenario.leverage();

        debug!(
            mode = %scenario.mode,
            leverage,
            break_even_pct = thresholds.break_even.price_change_pct,
            total_loss_pct = thresholds.total_loss.price_change_pct,
            deep_dive_roi_pct = deep_dive.roi_pct,
            "Scenario evaluated"
        );

        Ok(ScenarioReport {
            mode: scenario.mode,
            tokens: params.labels(),
            initial_value_usd: scenario.curve.initial_value_usd(),
            open: scenario.open,
            leverage,
            summary: report::summary_lines(&scenario, &deep_dive, &thresholds),
            open_details: report::open_details(&scenario),
            close_details: report::close_details(&scenario, &deep_dive),
            overview: report::overview(&scenario, &deep_dive),
            deep_dive,
            thresholds,
            sweep,
        })
    }
}

impl OpenedScenario {
    pub fn leverage(&self) -> f64 {
        self.open.leverage(self.params.coll_amount)
    }

    /// Close at the prices implied by the scenario's market view.
    pub fn deep_dive(&self) -> Result<DeepDive, CalcError> {
        let market = self.params.market();
        let future = market.moved(&self.params.view());
        let gas_usd_cost = self.params.gas().usd_cost();

        let close = engine::close(
            self.open.final_pledge,
            self.open.owed_repayment,
            future.coll_price_usd,
            future.loan_price_usd,
            &self.params.dex(),
            gas_usd_cost,
            false,
        )?;

        let initial_value_usd = self.curve.initial_value_usd();
        let roi = close.net_leftover * future.loan_price_usd / initial_value_usd - 1.0;
        let coll_ratio = future.coll_price_usd / market.coll_price_usd;
        let loan_ratio = future.loan_price_usd / market.loan_price_usd;

        Ok(DeepDive {
            future_coll_price_usd: future.coll_price_usd,
            future_loan_price_usd: future.loan_price_usd,
            assumed_price_change_pct: (coll_ratio / loan_ratio - 1.0) * 100.0,
            gas_usd_cost,
            close,
            roi_pct: roi * 100.0,
        })
    }
}
