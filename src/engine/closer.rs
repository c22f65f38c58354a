use crate::domain::{CloseResult, DexAssumptions};
use crate::error::CalcError;

fn validate(
    final_pledge: f64,
    owed_repayment: f64,
    future_coll_price: f64,
    future_loan_price: f64,
    dex: &DexAssumptions,
    gas_usd_cost: f64,
) -> Result<(), CalcError> {
    for (field, value) in [
        ("finalPledge", final_pledge),
        ("owedRepayment", owed_repayment),
        ("futureCollPrice", future_coll_price),
        ("gasUsdCost", gas_usd_cost),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(CalcError::invalid(
                field,
                format!("must be finite and >= 0, got {}", value),
            ));
        }
    }
    if !future_loan_price.is_finite() || future_loan_price <= 0.0 {
        return Err(CalcError::invalid(
            "futureLoanPrice",
            format!("must be > 0, got {}", future_loan_price),
        ));
    }
    dex.validate()
}

/// Unwind a position at a future price pair.
///
/// The whole reclaimable pledge is flash-borrowed, sold for loan tokens, and
/// the debt plus gas is paid from the proceeds. When nothing would be left the
/// borrower lets the loan lapse instead and every flow is zero, unless
/// `force_repay` asks for the loss-making unwind to be reported anyway.
///
/// Repaying is rational only when the leftover is positive net of gas; a
/// positive gross leftover that gas eats up still lapses.
pub fn close(
    final_pledge: f64,
    owed_repayment: f64,
    future_coll_price: f64,
    future_loan_price: f64,
    dex: &DexAssumptions,
    gas_usd_cost: f64,
    force_repay: bool,
) -> Result<CloseResult, CalcError> {
    validate(
        final_pledge,
        owed_repayment,
        future_coll_price,
        future_loan_price,
        dex,
        gas_usd_cost,
    )?;
    Ok(unwind(
        final_pledge,
        owed_repayment,
        future_coll_price / future_loan_price,
        dex,
        gas_usd_cost,
        force_repay,
    ))
}

/// `close` without validation, for callers that validated once up front.
pub(crate) fn unwind(
    final_pledge: f64,
    owed_repayment: f64,
    cross_price: f64,
    dex: &DexAssumptions,
    gas_usd_cost: f64,
    force_repay: bool,
) -> CloseResult {
    let flashloan_amount = final_pledge;
    let sold_on_dex = flashloan_amount;
    let received_from_dex = sold_on_dex * cross_price * dex.retention();
    let gross_leftover = received_from_dex - owed_repayment;
    let net_leftover = gross_leftover - gas_usd_cost;
    let rational_to_repay = net_leftover > 0.0;

    if !rational_to_repay && !force_repay {
        return CloseResult::lapsed();
    }

    CloseResult {
        flashloan_amount,
        sold_on_dex,
        received_from_dex,
        gross_leftover,
        net_leftover,
        rational_to_repay,
    }
}
