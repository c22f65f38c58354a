//! Scalar numerical solvers used by the engine.
//!
//! Two routines: a bracketing bisection for monotone root-finding and a
//! Gauss-Newton minimizer of a squared scalar residual. Both stop on a
//! relative tolerance and give up with `SolverNonConvergence` after
//! `max_iterations`.

use crate::error::CalcError;

/// Upper bound on how many times a bracket may be doubled while searching
/// for a sign change.
pub const MAX_BRACKET_EXPANSIONS: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverSettings {
    /// Relative tolerance on the root (bisection) or residual (Gauss-Newton).
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 200,
        }
    }
}

/// A converged solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    pub value: f64,
    pub iterations: u32,
    /// Function value (or residual) at `value`.
    pub residual: f64,
}

fn opposite_signs(a: f64, b: f64) -> bool {
    (a < 0.0 && b > 0.0) || (a > 0.0 && b < 0.0)
}

/// Find `x` in `[lo, hi]` with `f(x) = 0` by bisection.
///
/// `f(lo)` and `f(hi)` must have opposite signs (or one of them be zero).
pub fn bisect<F>(f: F, lo: f64, hi: f64, settings: &SolverSettings) -> Result<Root, CalcError>
where
    F: Fn(f64) -> f64,
{
    let (mut lo, mut hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if f_lo == 0.0 {
        return Ok(Root {
            value: lo,
            iterations: 0,
            residual: 0.0,
        });
    }
    if f_hi == 0.0 {
        return Ok(Root {
            value: hi,
            iterations: 0,
            residual: 0.0,
        });
    }
    if !opposite_signs(f_lo, f_hi) {
        return Err(CalcError::non_convergence("bisection", 0));
    }

    for iteration in 1..=settings.max_iterations {
        let mid = lo + (hi - lo) / 2.0;
        let f_mid = f(mid);
        if !f_mid.is_finite() {
            return Err(CalcError::non_convergence("bisection", iteration));
        }

        let half_width = (hi - lo) / 2.0;
        if f_mid == 0.0 || half_width <= settings.tolerance * mid.abs().max(1.0) {
            return Ok(Root {
                value: mid,
                iterations: iteration,
                residual: f_mid,
            });
        }

        if opposite_signs(f_lo, f_mid) {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    Err(CalcError::non_convergence(
        "bisection",
        settings.max_iterations,
    ))
}

/// Grow `[lo, hi]` upward (doubling its width) until `f` changes sign.
///
/// Returns the bracket; `lo` is never moved.
pub fn bracket_upward<F>(f: F, lo: f64, hi: f64) -> Result<(f64, f64), CalcError>
where
    F: Fn(f64) -> f64,
{
    let f_lo = f(lo);
    let mut hi = hi;
    for expansion in 0..=MAX_BRACKET_EXPANSIONS {
        let f_hi = f(hi);
        if f_lo == 0.0 || f_hi == 0.0 || opposite_signs(f_lo, f_hi) {
            return Ok((lo, hi));
        }
        if !f_hi.is_finite() {
            return Err(CalcError::non_convergence("bracket", expansion));
        }
        hi = lo + (hi - lo) * 2.0;
    }
    Err(CalcError::non_convergence("bracket", MAX_BRACKET_EXPANSIONS))
}

/// Minimize `residual(x)^2` starting from `seed`.
///
/// Each step is a Gauss-Newton update `x -= r / r'` with a central-difference
/// derivative. Converged when `|r| <= tolerance * max(1, |x|)`.
pub fn minimize_squared_residual<F>(
    residual: F,
    seed: f64,
    settings: &SolverSettings,
) -> Result<Root, CalcError>
where
    F: Fn(f64) -> f64,
{
    let mut x = seed;

    for iteration in 0..=settings.max_iterations {
        let r = residual(x);
        if !r.is_finite() {
            return Err(CalcError::non_convergence("gauss-newton", iteration));
        }

        let scale = x.abs().max(1.0);
        if r.abs() <= settings.tolerance * scale {
            return Ok(Root {
                value: x,
                iterations: iteration,
                residual: r,
            });
        }
        if iteration == settings.max_iterations {
            break;
        }

        let h = 1e-6 * scale;
        let slope = (residual(x + h) - residual(x - h)) / (2.0 * h);
        if !slope.is_finite() || slope == 0.0 {
            return Err(CalcError::non_convergence("gauss-newton", iteration));
        }
        x -= r / slope;
    }

    Err(CalcError::non_convergence(
        "gauss-newton",
        settings.max_iterations,
    ))
}
