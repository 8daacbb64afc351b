//! Head-to-head match rules.
//!
//! Every rule declines (returns `false` / `0`) while the regulation score is
//! unset. Overlaps between rules (`exact_score` vs `score_difference` and
//! friends) are resolved by the coordinator, not here.

use crate::scoring::context::{MatchContext, ScorePair, ScorerRankConfig};

/// Predicted and regulation scores, when both are available.
fn scores(ctx: &MatchContext) -> Option<(ScorePair, ScorePair)> {
    Some((ctx.prediction.score?, ctx.actual.regulation?))
}

/// Predicted score equals the regulation score and the overtime pick matches
/// whether the game went to overtime or a shootout.
pub fn evaluate_exact_score(ctx: &MatchContext) -> bool {
    let Some((predicted, actual)) = scores(ctx) else {
        return false;
    };
    predicted == actual && ctx.prediction.overtime == ctx.actual.went_to_extra_time()
}

pub fn evaluate_score_difference(ctx: &MatchContext) -> bool {
    scores(ctx).is_some_and(|(predicted, actual)| predicted.difference() == actual.difference())
}

pub fn evaluate_one_team_score(ctx: &MatchContext) -> bool {
    scores(ctx).is_some_and(|(predicted, actual)| {
        predicted.home == actual.home || predicted.away == actual.away
    })
}

/// Predicted winner (or draw) against the final, post-overtime score.
pub fn evaluate_winner(ctx: &MatchContext) -> bool {
    if !ctx.actual.is_finished() {
        return false;
    }
    match (ctx.prediction.score, ctx.actual.final_score) {
        (Some(predicted), Some(actual)) => predicted.side() == actual.side(),
        _ => false,
    }
}

pub fn evaluate_draw(ctx: &MatchContext) -> bool {
    scores(ctx).is_some_and(|(predicted, actual)| predicted.is_draw() && actual.is_draw())
}

/// Whether the scorer pick was right. `Some(rank)` carries the hit scorer's
/// rank (`None` inside for unranked scorers and correct "no scorer" picks).
fn scorer_hit(ctx: &MatchContext) -> Option<Option<u32>> {
    if !ctx.actual.is_finished() {
        return None;
    }
    match ctx.prediction.scorer_id {
        Some(player_id) => ctx.actual.scorer(player_id).map(|s| s.rank),
        None if ctx.prediction.no_scorer && ctx.actual.scorers.is_empty() => Some(None),
        None => None,
    }
}

pub fn evaluate_scorer(ctx: &MatchContext) -> bool {
    scorer_hit(ctx).is_some()
}

/// Rank-weighted scorer rule: configured points for the scorer's rank,
/// `unranked_points` for unranked scorers and correct "no scorer" picks.
///
/// `None` for a wrong or empty pick. A correct pick can still be worth `0`
/// when its rank is configured that way.
pub fn evaluate_ranked_scorer(ctx: &MatchContext, config: &ScorerRankConfig) -> Option<i32> {
    scorer_hit(ctx).map(|rank| config.points_for_rank(rank))
}

/// Advancing side in a playoff game. Not applicable outside playoffs.
pub fn evaluate_soccer_playoff_advance(ctx: &MatchContext) -> bool {
    if !ctx.actual.playoff || !ctx.actual.is_finished() {
        return false;
    }
    match (ctx.prediction.home_advance, ctx.actual.home_advanced) {
        (Some(predicted), Some(actual)) => predicted == actual,
        _ => false,
    }
}
