use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Round a score to `dp` decimal places.
///
/// Works on the exact binary value of the float, so `0.15` (stored just below
/// the midpoint) rounds down, and exact midpoints such as `2.25` go to the even
/// digit. Values `Decimal` cannot represent (NaN, infinities, out of range) are
/// returned unchanged.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Float display used in alert text: whole numbers keep one decimal (`3.0`)
pub fn display_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Sum of `score * weight` over the given pairs
pub fn weighted_sum<'a, I>(pairs: I) -> f64
where
    I: IntoIterator<Item = (&'a f64, &'a f64)>,
{
    pairs.into_iter().map(|(score, weight)| score * weight).sum()
}
