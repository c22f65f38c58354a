//! Self-consistent flash-loan sizing.
//!
//! The upfront fee is charged on the post-swap pledge, the pledge depends on
//! the loan size, and the loan size is bounded by the fee-adjusted pledge:
//!
//! ```text
//! flashloan = (user + flashloan / cross * retention) * (1 - upfront_fee) * cross * ltv
//! ```
//!
//! The fixed point is found by minimizing the squared residual, seeded from
//! the simple closed form.

use super::opener::simple_flashloan;
use super::solver::{minimize_squared_residual, Root, SolverSettings};
use crate::domain::{DexAssumptions, LoanTerms, MarketInputs, UserPosition};
use crate::error::CalcError;

/// `flashloan - supported_loan(flashloan)`; zero at equilibrium.
pub fn residual(
    flashloan: f64,
    market: &MarketInputs,
    user: &UserPosition,
    loan: &LoanTerms,
    dex: &DexAssumptions,
) -> f64 {
    let cross = market.cross_price();
    let pledge = user.coll_amount + flashloan / cross * dex.retention();
    flashloan - pledge * (1.0 - loan.upfront_fee) * cross * loan.ltv
}

/// Solve for the equilibrium flash-loan amount (in loan tokens).
///
/// Inputs are assumed validated.
pub fn solve_flashloan(
    market: &MarketInputs,
    user: &UserPosition,
    loan: &LoanTerms,
    dex: &DexAssumptions,
    settings: &SolverSettings,
) -> Result<Root, CalcError> {
    let seed = simple_flashloan(market, user, loan);
    minimize_squared_residual(|x| residual(x, market, user, loan, dex), seed, settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> (MarketInputs, UserPosition, LoanTerms, DexAssumptions) {
        (
            MarketInputs {
                coll_price_usd: 0.38,
                loan_price_usd: 1.0,
            },
            UserPosition { coll_amount: 380.0 },
            LoanTerms {
                ltv: 0.8,
                apr: 0.05,
                tenor_days: 5,
                upfront_fee: 0.01,
                protocol_fee: 0.002,
            },
            DexAssumptions {
                slippage: 0.005,
                swap_fee: 0.0025,
            },
        )
    }

    /// The relation is linear in the loan size, so the fixed point has a
    /// closed form to check the numerical solve against.
    fn linear_fixed_point(
        market: &MarketInputs,
        user: &UserPosition,
        loan: &LoanTerms,
        dex: &DexAssumptions,
    ) -> f64 {
        let k = (1.0 - loan.upfront_fee) * loan.ltv;
        user.coll_amount * market.cross_price() * k / (1.0 - dex.retention() * k)
    }

    #[test]
    fn test_solution_matches_fixed_point() {
        let (market, user, loan, dex) = inputs();
        let root = solve_flashloan(&market, &user, &loan, &dex, &SolverSettings::default())
            .unwrap();
        let expected = linear_fixed_point(&market, &user, &loan, &dex);
        assert!((root.value - expected).abs() / expected < 1e-9);
        assert!(residual(root.value, &market, &user, &loan, &dex).abs() < 1e-6);
    }

    #[test]
    fn test_converges_in_a_handful_of_iterations() {
        let (market, user, loan, dex) = inputs();
        let root = solve_flashloan(&market, &user, &loan, &dex, &SolverSettings::default())
            .unwrap();
        assert!(root.iterations <= 5, "took {} iterations", root.iterations);
    }

    #[test]
    fn test_frictionless_fixed_point() {
        let (market, user, mut loan, _) = inputs();
        loan.upfront_fee = 0.0;
        let dex = DexAssumptions {
            slippage: 0.0,
            swap_fee: 0.0,
        };
        let root = solve_flashloan(&market, &user, &loan, &dex, &SolverSettings::default())
            .unwrap();
        // Without frictions the loan equals ltv of the whole pledge value.
        let expected = 380.0 * 0.38 * 0.8 / 0.2;
        assert!((root.value - expected).abs() < 1e-6);
    }

    #[test]
    fn test_zero_iteration_budget_fails() {
        let (market, user, loan, dex) = inputs();
        let settings = SolverSettings {
            tolerance: 1e-12,
            max_iterations: 0,
        };
        let err = solve_flashloan(&market, &user, &loan, &dex, &settings).unwrap_err();
        assert!(matches!(err, CalcError::SolverNonConvergence { .. }));
    }
}
