use crate::scoring::context::{GroupStageConfig, GroupStageContext};

/// Three-tier group pick: outright winner, else advancing team, else nothing.
/// The winner tier wins even when the winner is also listed as advancing.
pub fn evaluate_group_stage_team(ctx: &GroupStageContext, config: &GroupStageConfig) -> i32 {
    let Some(team_id) = ctx.predicted_team_id else {
        return 0;
    };
    if ctx.winner_team_id == Some(team_id) {
        config.winner_points
    } else if ctx.advanced_team_ids.contains(&team_id) {
        config.advance_points
    } else {
        0
    }
}
