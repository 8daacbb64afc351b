//! Closest-value special bets.
//!
//! An exact guess earns the full value. Otherwise the guess(es) nearest to
//! the resolved value across the whole pool earn a third. Ties are all
//! rewarded.

use crate::scoring::context::ClosestValueContext;

/// Multiplier for an exact guess.
pub const EXACT_MULTIPLIER: f64 = 1.0;
/// Multiplier for the closest non-exact guess(es).
pub const CLOSEST_MULTIPLIER: f64 = 1.0 / 3.0;

pub fn evaluate_closest_value(ctx: &ClosestValueContext) -> f64 {
    if ctx.prediction == ctx.actual {
        return EXACT_MULTIPLIER;
    }

    let min_diff = ctx
        .all_predictions
        .iter()
        .map(|v| (v - ctx.actual).abs())
        .reduce(f64::min);

    match min_diff {
        Some(min) if (ctx.prediction - ctx.actual).abs() == min => CLOSEST_MULTIPLIER,
        _ => 0.0,
    }
}
