//! Single-entity special bets: plain equality on the resolved id or value.

use crate::scoring::context::SpecialBetContext;

fn both_equal<T: PartialEq>(predicted: Option<T>, actual: Option<T>) -> bool {
    matches!((predicted, actual), (Some(p), Some(a)) if p == a)
}

pub fn evaluate_exact_team(ctx: &SpecialBetContext) -> bool {
    both_equal(ctx.prediction.team_id, ctx.actual.team_id)
}

pub fn evaluate_exact_player(ctx: &SpecialBetContext) -> bool {
    both_equal(ctx.prediction.player_id, ctx.actual.player_id)
}

pub fn evaluate_exact_value(ctx: &SpecialBetContext) -> bool {
    both_equal(ctx.prediction.value, ctx.actual.value)
}
