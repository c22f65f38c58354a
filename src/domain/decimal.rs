//! Display rounding for calculator outputs, backed by rust_decimal.
//!
//! The engine works in `f64`; values are converted to `rust_decimal` only at the
//! presentation edge so rounding is exact and does not depend on binary
//! float formatting.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::TokenLabel;

/// Decimal places used for every displayed amount.
pub const DISPLAY_DP: u32 = 2;

/// Round an `f64` to `dp` decimal places (midpoint away from zero).
///
/// Returns `None` for NaN or infinite input.
pub fn round_dp(value: f64, dp: u32) -> Option<Decimal> {
    let mut d = Decimal::from_f64(value)?
        .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    d.rescale(dp);
    if d.is_zero() {
        d.set_sign_positive(true);
    }
    Some(d)
}

/// `1234567.891` -> `"1,234,567.89"`.
pub fn grouped(value: f64) -> String {
    let Some(d) = round_dp(value, DISPLAY_DP) else {
        return value.to_string();
    };
    let s = d.to_string();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));

    let mut out = String::with_capacity(s.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    if frac_part.is_empty() {
        format!("{}{}", sign, out)
    } else {
        format!("{}{}.{}", sign, out, frac_part)
    }
}

pub fn usd(value: f64) -> String {
    if value < 0.0 && round_dp(value, DISPLAY_DP).is_some_and(|d| !d.is_zero()) {
        format!("-${}", grouped(-value))
    } else {
        format!("${}", grouped(value.abs()))
    }
}

pub fn percent(value_pct: f64) -> String {
    format!("{}%", grouped(value_pct))
}

/// `"1,234.56 WMNT ($469.13)"`.
pub fn token_amount(amount: f64, token: &TokenLabel, price_usd: f64) -> String {
    format!("{} {} ({})", grouped(amount), token, usd(amount * price_usd))
}
