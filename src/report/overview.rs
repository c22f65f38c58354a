//! Assets vs debts before and after looping.

use crate::orchestration::{DeepDive, OpenedScenario};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewBar {
    pub label: &'static str,
    pub value_usd: f64,
    pub amount: f64,
    pub token: String,
    /// Flows owed by the user rather than held.
    pub is_debt: bool,
}

pub fn overview(scenario: &OpenedScenario, deep_dive: &DeepDive) -> Vec<OverviewBar> {
    let params = &scenario.params;
    let open = &scenario.open;
    let coll = params.collateral_token.clone();
    let loan = params.loan_token.clone();
    let leftover = deep_dive.close.net_leftover;

    vec![
        OverviewBar {
            label: "Initial Collateral Value",
            value_usd: params.coll_amount * params.coll_price_usd,
            amount: params.coll_amount,
            token: coll.clone(),
            is_debt: false,
        },
        OverviewBar {
            label: "Leveraged Collateral (Open)",
            value_usd: open.combined_pledge * params.coll_price_usd,
            amount: open.combined_pledge,
            token: coll.clone(),
            is_debt: false,
        },
        OverviewBar {
            label: "Repayment Owed (Open)",
            value_usd: open.owed_repayment * params.loan_price_usd,
            amount: open.owed_repayment,
            token: loan.clone(),
            is_debt: true,
        },
        OverviewBar {
            label: "Leveraged Collateral (Close)",
            value_usd: open.final_pledge * deep_dive.future_coll_price_usd,
            amount: open.final_pledge,
            token: coll,
            is_debt: false,
        },
        OverviewBar {
            label: "Repayment Owed (Close)",
            value_usd: open.owed_repayment * deep_dive.future_loan_price_usd,
            amount: open.owed_repayment,
            token: loan.clone(),
            is_debt: true,
        },
        OverviewBar {
            label: "Final Remainder",
            value_usd: leftover * deep_dive.future_loan_price_usd,
            amount: leftover,
            token: loan,
            is_debt: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::ScenarioParams;
    use crate::orchestration::ScenarioEvaluator;

    #[test]
    fn test_overview_bars() {
        let scenario = ScenarioEvaluator::new(Config::default())
            .open(&ScenarioParams::default())
            .unwrap();
        let deep = scenario.deep_dive().unwrap();
        let bars = overview(&scenario, &deep);

        assert_eq!(bars.len(), 6);
        assert!((bars[0].value_usd - 144.4).abs() < 1e-9);
        assert_eq!(bars[0].token, "WMNT");
        assert!(bars[2].is_debt && bars[4].is_debt);
        assert_eq!(bars[5].token, "USDT");
        assert_eq!(bars[5].amount, deep.close.net_leftover);
        // Leveraged exposure is worth more than the initial stake.
        assert!(bars[1].value_usd > bars[0].value_usd);
    }
}
