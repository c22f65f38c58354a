use crate::domain::decimal::{grouped, percent, token_amount, usd};
use crate::orchestration::{DeepDive, OpenedScenario};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRow {
    pub description: String,
    pub amount: String,
}

fn row(description: impl Into<String>, amount: String) -> DetailRow {
    DetailRow {
        description: description.into(),
        amount,
    }
}

/// Flows of opening the loop, valued at spot prices.
pub fn open_details(scenario: &OpenedScenario) -> Vec<DetailRow> {
    let params = &scenario.params;
    let tokens = params.labels();
    let open = &scenario.open;
    let (coll, loan) = (&tokens.collateral, &tokens.loan);
    let (coll_px, loan_px) = (params.coll_price_usd, params.loan_price_usd);

    vec![
        row(
            "Flashborrow from Lender",
            token_amount(open.flashloan_amount, loan, loan_px),
        ),
        row(
            "Owed Repayment to Lender",
            token_amount(open.owed_repayment, loan, loan_px),
        ),
        row(
            "Interest Owed to Lender",
            token_amount(open.interest(), loan, loan_px),
        ),
        row("Sell on DEX", token_amount(open.sold_on_dex, loan, loan_px)),
        row(
            "Receive from DEX",
            token_amount(open.received_from_dex, coll, coll_px),
        ),
        row(
            "Combined Pledge to Lender",
            token_amount(open.combined_pledge, coll, coll_px),
        ),
        row(
            "Upfront Fee to Lender",
            token_amount(open.upfront_fee_abs, coll, coll_px),
        ),
        row(
            "Fee to Protocol",
            token_amount(open.protocol_fee_abs, coll, coll_px),
        ),
        row(
            "Combined Pledge to Lender (net of fees)",
            token_amount(open.final_pledge, coll, coll_px),
        ),
        row("Leverage", format!("{}x", grouped(scenario.leverage()))),
    ]
}

/// Flows of unwinding at the expected future prices.
pub fn close_details(scenario: &OpenedScenario, deep_dive: &DeepDive) -> Vec<DetailRow> {
    let tokens = scenario.params.labels();
    let (coll, loan) = (&tokens.collateral, &tokens.loan);
    let (coll_px, loan_px) = (deep_dive.future_coll_price_usd, deep_dive.future_loan_price_usd);
    let close = &deep_dive.close;

    let pledge = token_amount(scenario.open.final_pledge, coll, coll_px);
    let debt = token_amount(scenario.open.owed_repayment, loan, loan_px);
    let gas = usd(deep_dive.gas_usd_cost);
    let verdict = if close.rational_to_repay {
        format!(
            "yes, because your reclaimable {} collateral is worth more than your {} debt owed plus {} gas",
            pledge, debt, gas
        )
    } else {
        format!(
            "no, because your reclaimable {} collateral is worth less than your {} debt owed plus {} gas",
            pledge, debt, gas
        )
    };

    vec![
        row("Rational to Repay?", verdict),
        row(
            "Flashborrow from Lender",
            token_amount(close.flashloan_amount, coll, coll_px),
        ),
        row("Sell on DEX", token_amount(close.sold_on_dex, coll, coll_px)),
        row(
            "Receive from DEX",
            token_amount(close.received_from_dex, loan, loan_px),
        ),
        row(
            "Repayment to Lender",
            token_amount(scenario.open.owed_repayment, loan, loan_px),
        ),
        row("Gas Cost", usd(deep_dive.gas_usd_cost)),
        row(
            "Amount Left After Repay and Gas",
            token_amount(close.net_leftover, loan, loan_px),
        ),
        row("RoI", percent(deep_dive.roi_pct)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::ScenarioParams;
    use crate::orchestration::ScenarioEvaluator;

    fn scenario(params: ScenarioParams) -> (OpenedScenario, DeepDive) {
        let scenario = ScenarioEvaluator::new(Config::default())
            .open(&params)
            .unwrap();
        let deep = scenario.deep_dive().unwrap();
        (scenario, deep)
    }

    #[test]
    fn test_open_details_rows() {
        let (scenario, _) = scenario(ScenarioParams::default());
        let rows = open_details(&scenario);
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].description, "Flashborrow from Lender");
        assert_eq!(rows[0].amount, "722.00 USDT ($722.00)");
        assert_eq!(rows[6].amount, "0.00 WMNT ($0.00)");
        assert!(rows[9].amount.ends_with('x'));
    }

    #[test]
    fn test_close_details_profitable() {
        let (scenario, deep) = scenario(ScenarioParams::default());
        let rows = close_details(&scenario, &deep);
        assert_eq!(rows.len(), 8);
        assert!(rows[0].amount.starts_with("yes, because"));
        assert_eq!(rows[5].amount, "$0.01");
    }

    #[test]
    fn test_close_details_lapse_from_gas() {
        // Roughly $300 of gas against a ~173 USDT gross leftover.
        let (scenario, deep) = scenario(ScenarioParams {
            gas_units: 5e10,
            ..ScenarioParams::default()
        });
        let open = &scenario.open;
        let proceeds = open.final_pledge * deep.future_coll_price_usd
            / deep.future_loan_price_usd
            * scenario.params.dex().retention();
        assert!(proceeds > open.owed_repayment);

        let rows = close_details(&scenario, &deep);
        assert!(rows[0].amount.starts_with("no, because"));
        assert!(rows[0].amount.ends_with("plus $300.00 gas"));
    }

    #[test]
    fn test_close_details_lapsed() {
        let (scenario, deep) = scenario(ScenarioParams {
            coll_price_change: -0.9,
            ..ScenarioParams::default()
        });
        let rows = close_details(&scenario, &deep);
        assert!(rows[0].amount.starts_with("no, because"));
        assert_eq!(rows[1].amount, "0.00 WMNT ($0.00)");
        assert_eq!(rows[7].amount, "-100.00%");
    }
}
