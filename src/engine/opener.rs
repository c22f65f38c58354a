use super::equilibrium;
use super::solver::SolverSettings;
use crate::config::OpenerMode;
use crate::domain::{DexAssumptions, LoanTerms, MarketInputs, OpenResult, UserPosition};
use crate::error::CalcError;

fn validate(
    market: &MarketInputs,
    user: &UserPosition,
    loan: &LoanTerms,
    dex: &DexAssumptions,
) -> Result<(), CalcError> {
    market.validate()?;
    user.validate()?;
    loan.validate()?;
    dex.validate()
}

/// Closed-form loan size: `user * cross / (1 - ltv)`.
pub fn simple_flashloan(market: &MarketInputs, user: &UserPosition, loan: &LoanTerms) -> f64 {
    user.coll_amount * market.cross_price() / (1.0 - loan.ltv)
}

/// Open a looping position with the closed-form loan size.
pub fn open(
    market: &MarketInputs,
    user: &UserPosition,
    loan: &LoanTerms,
    dex: &DexAssumptions,
) -> Result<OpenResult, CalcError> {
    validate(market, user, loan, dex)?;
    let flashloan = simple_flashloan(market, user, loan);
    Ok(settle(flashloan, market, user, loan, dex))
}

/// Open a looping position, sizing the loan according to `mode`.
pub fn open_with_mode(
    mode: OpenerMode,
    settings: &SolverSettings,
    market: &MarketInputs,
    user: &UserPosition,
    loan: &LoanTerms,
    dex: &DexAssumptions,
) -> Result<OpenResult, CalcError> {
    match mode {
        OpenerMode::Simple => open(market, user, loan, dex),
        OpenerMode::Equilibrium => {
            validate(market, user, loan, dex)?;
            let root = equilibrium::solve_flashloan(market, user, loan, dex, settings)?;
            Ok(settle(root.value, market, user, loan, dex))
        }
    }
}

/// Flows that follow from a given flash-loan amount.
fn settle(
    flashloan: f64,
    market: &MarketInputs,
    user: &UserPosition,
    loan: &LoanTerms,
    dex: &DexAssumptions,
) -> OpenResult {
    let owed_repayment = flashloan * loan.accrual_factor();
    let sold_on_dex = flashloan;
    let received_from_dex = sold_on_dex / market.cross_price() * dex.retention();
    let combined_pledge = user.coll_amount + received_from_dex;
    let upfront_fee_abs = combined_pledge * loan.upfront_fee;
    let protocol_fee_abs = combined_pledge * loan.protocol_fee;

    OpenResult {
        flashloan_amount: flashloan,
        owed_repayment,
        sold_on_dex,
        received_from_dex,
        combined_pledge,
        upfront_fee_abs,
        protocol_fee_abs,
        final_pledge: combined_pledge - upfront_fee_abs - protocol_fee_abs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market() -> MarketInputs {
        MarketInputs {
            coll_price_usd: 0.38,
            loan_price_usd: 1.0,
        }
    }

    fn user() -> UserPosition {
        UserPosition { coll_amount: 380.0 }
    }

    fn loan() -> LoanTerms {
        LoanTerms {
            ltv: 0.8,
            apr: 0.05,
            tenor_days: 5,
            upfront_fee: 0.0,
            protocol_fee: 0.002,
        }
    }

    fn dex() -> DexAssumptions {
        DexAssumptions {
            slippage: 0.005,
            swap_fee: 0.0025,
        }
    }

    fn close_to(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_reference_scenario() {
        let open = open(&market(), &user(), &loan(), &dex()).unwrap();
        assert!(close_to(open.flashloan_amount, 722.0, 1e-9));
        assert!(close_to(open.owed_repayment, 722.0 * (1.0 + 0.05 * 5.0 / 365.0), 1e-9));
        assert!(close_to(open.owed_repayment, 722.494, 1e-3));
        assert_eq!(open.sold_on_dex, open.flashloan_amount);
        assert!(close_to(open.received_from_dex, 722.0 / 0.38 * 0.9925, 1e-9));
        assert!(close_to(open.received_from_dex, 1885.75, 1e-2));
        assert!(close_to(open.combined_pledge, 380.0 + open.received_from_dex, 1e-9));
        assert_eq!(open.upfront_fee_abs, 0.0);
        assert!(close_to(open.protocol_fee_abs, open.combined_pledge * 0.002, 1e-12));
        assert!(close_to(open.final_pledge, open.combined_pledge * 0.998, 1e-9));
    }

    #[test]
    fn test_ltv_of_one_is_rejected() {
        let mut terms = loan();
        terms.ltv = 1.0;
        let err = open(&market(), &user(), &terms, &dex()).unwrap_err();
        assert!(matches!(err, CalcError::InvalidParameter { field: "ltv", .. }));
    }

    #[test]
    fn test_zero_price_is_rejected() {
        let bad = MarketInputs {
            coll_price_usd: 0.0,
            loan_price_usd: 1.0,
        };
        assert!(open(&bad, &user(), &loan(), &dex()).is_err());
    }

    #[test]
    fn test_leverage_exceeds_one() {
        let open = open(&market(), &user(), &loan(), &dex()).unwrap();
        let leverage = open.leverage(user().coll_amount);
        assert!(leverage > 1.0);
        let net_received = open.received_from_dex - open.total_fees();
        assert!(close_to(leverage, 1.0 + net_received / 380.0, 1e-12));
    }

    #[test]
    fn test_simple_mode_matches_open() {
        let a = open(&market(), &user(), &loan(), &dex()).unwrap();
        let b = open_with_mode(
            OpenerMode::Simple,
            &SolverSettings::default(),
            &market(),
            &user(),
            &loan(),
            &dex(),
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_equilibrium_mode_is_self_consistent() {
        let mut terms = loan();
        terms.upfront_fee = 0.01;
        let open = open_with_mode(
            OpenerMode::Equilibrium,
            &SolverSettings::default(),
            &market(),
            &user(),
            &terms,
            &dex(),
        )
        .unwrap();
        let supported = open.combined_pledge * (1.0 - terms.upfront_fee) * 0.38 * terms.ltv;
        assert!(close_to(open.flashloan_amount, supported, 1e-6));
    }

    #[test]
    fn test_equilibrium_mode_validates_first() {
        let mut terms = loan();
        terms.ltv = 1.0;
        let err = open_with_mode(
            OpenerMode::Equilibrium,
            &SolverSettings::default(),
            &market(),
            &user(),
            &terms,
            &dex(),
        )
        .unwrap_err();
        assert!(matches!(err, CalcError::InvalidParameter { .. }));
    }
}
