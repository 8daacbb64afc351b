//! Pure translators from stored records to evaluation contexts.
//!
//! Builders never fetch anything: every record (and, for comparative rules,
//! the full pool of competing bets) must already be loaded by the caller.

use std::collections::HashMap;

use crate::error::{EvaluationError, EvaluationResult};

use super::context::{
    ClosestValueContext, GroupStageContext, MatchContext, MatchOutcome, MatchPrediction,
    QuestionContext, ScorePair, SeriesContext, SpecialBetContext,
};
use super::records::{
    GroupStageBetRecord, GroupStageResultRecord, MatchBetRecord, MatchResultRecord,
    QuestionBetRecord, QuestionResultRecord, SeriesBetRecord, SeriesResultRecord,
    SpecialBetRecord, SpecialResultRecord,
};

/// Build a match context.
///
/// `scorer_ranks` (player id -> rank) overrides any rank stored on the
/// result's scorer list; pass it when the ranking lives outside the match
/// record (e.g. a league-wide top-scorer table).
pub fn build_match_context(
    bet: &MatchBetRecord,
    result: &MatchResultRecord,
    scorer_ranks: Option<&HashMap<i64, u32>>,
) -> EvaluationResult<MatchContext> {
    let no_scorer = bet.no_scorer.unwrap_or(false);
    if no_scorer && bet.scorer_id.is_some() {
        return Err(EvaluationError::Validation(format!(
            "bet {} picks scorer {:?} and no-scorer at the same time",
            bet.id, bet.scorer_id
        )));
    }

    let regulation = ScorePair::from_parts(result.home_regular_score, result.away_regular_score);
    let extra_time = result.is_overtime || result.is_shootout;
    // Without extra time the final score is the regulation score.
    let final_score = ScorePair::from_parts(result.home_final_score, result.away_final_score)
        .or(if extra_time { None } else { regulation });

    let scorers = result
        .scorers
        .iter()
        .map(|s| {
            let mut scorer = *s;
            if let Some(rank) = scorer_ranks.and_then(|ranks| ranks.get(&s.player_id)) {
                scorer.rank = Some(*rank);
            }
            scorer
        })
        .collect();

    Ok(MatchContext {
        prediction: MatchPrediction {
            score: ScorePair::from_parts(bet.home_score, bet.away_score),
            overtime: bet.overtime.unwrap_or(false),
            scorer_id: bet.scorer_id,
            no_scorer,
            home_advance: bet.home_advance,
        },
        actual: MatchOutcome {
            regulation,
            final_score,
            overtime: result.is_overtime,
            shootout: result.is_shootout,
            playoff: result.is_playoff,
            scorers,
            home_advanced: result.home_advanced,
        },
    })
}

pub fn build_series_context(bet: &SeriesBetRecord, result: &SeriesResultRecord) -> SeriesContext {
    SeriesContext {
        prediction: ScorePair::from_parts(bet.home_score, bet.away_score),
        actual: ScorePair::from_parts(result.home_score, result.away_score),
    }
}

pub fn build_special_bet_context(
    bet: &SpecialBetRecord,
    result: &SpecialResultRecord,
) -> SpecialBetContext {
    SpecialBetContext {
        prediction: bet.pick,
        actual: result.result,
    }
}

/// Build a closest-value context.
///
/// `all_bets` is every bet submitted for the event (the caller's own bet
/// included). Bets without a value are left out of the pool. Fails when the
/// caller's value or the resolved value is missing.
pub fn build_closest_value_context(
    bet: &SpecialBetRecord,
    result: &SpecialResultRecord,
    all_bets: &[SpecialBetRecord],
) -> EvaluationResult<ClosestValueContext> {
    let (Some(prediction), Some(actual)) = (bet.pick.value, result.result.value) else {
        return Err(EvaluationError::Validation(format!(
            "value predictions required (bet {}, result {})",
            bet.id, result.id
        )));
    };

    Ok(ClosestValueContext {
        prediction,
        actual,
        all_predictions: all_bets.iter().filter_map(|b| b.pick.value).collect(),
    })
}

pub fn build_group_stage_context(
    bet: &GroupStageBetRecord,
    result: &GroupStageResultRecord,
) -> GroupStageContext {
    GroupStageContext {
        predicted_team_id: bet.team_id,
        winner_team_id: result.winner_team_id,
        advanced_team_ids: result.advanced_team_ids.clone(),
    }
}

pub fn build_question_context(
    bet: &QuestionBetRecord,
    result: &QuestionResultRecord,
) -> QuestionContext {
    QuestionContext {
        prediction: bet.answer,
        actual: result.correct_answer,
    }
}
