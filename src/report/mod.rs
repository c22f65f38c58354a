//! Presentation data for a scenario: summary lines, detail tables and the
//! assets-vs-debts overview. Nothing here renders; it only formats.

pub mod overview;
pub mod tables;

pub use overview::{overview, OverviewBar};
pub use tables::{close_details, open_details, DetailRow};

use crate::domain::decimal::{grouped, percent, token_amount};
use crate::orchestration::{DeepDive, OpenedScenario, Thresholds};

pub fn summary_lines(
    scenario: &OpenedScenario,
    deep_dive: &DeepDive,
    thresholds: &Thresholds,
) -> Vec<String> {
    let params = &scenario.params;
    let tokens = params.labels();

    vec![
        format!(
            "Initial Position: {}",
            token_amount(params.coll_amount, &tokens.collateral, params.coll_price_usd)
        ),
        format!("Leverage: {}x", grouped(scenario.leverage())),
        format!(
            "Break even price change: {}",
            percent(thresholds.break_even.price_change_pct)
        ),
        format!(
            "Total loss price change: {}",
            percent(thresholds.total_loss.price_change_pct)
        ),
        format!(
            "Assumed {} price change: {}",
            tokens.pair(),
            percent(deep_dive.assumed_price_change_pct)
        ),
        format!(
            "Resulting Closing Position: {}",
            token_amount(
                deep_dive.close.net_leftover,
                &tokens.loan,
                deep_dive.future_loan_price_usd
            )
        ),
        format!("Resulting RoI: {}", percent(deep_dive.roi_pct)),
    ]
}
