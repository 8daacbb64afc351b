//! Multi-game series rules. A series cannot end level.

use crate::scoring::context::{SeriesContext, Side};

pub fn evaluate_series_exact(ctx: &SeriesContext) -> bool {
    match (ctx.prediction, ctx.actual) {
        (Some(predicted), Some(actual)) => predicted == actual,
        _ => false,
    }
}

pub fn evaluate_series_winner(ctx: &SeriesContext) -> bool {
    match (ctx.prediction, ctx.actual) {
        (Some(predicted), Some(actual)) => {
            let side = actual.side();
            side != Side::Draw && predicted.side() == side
        }
        _ => false,
    }
}
