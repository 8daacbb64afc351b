//! Evaluates every bet of one finalized event.
//!
//! Input records are already loaded. Contexts are built fresh for every run,
//! bets are scored independently (in parallel) and the result is returned as
//! a complete replacement set for the event: callers overwrite what they
//! stored before instead of adding to it.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

use crate::error::EvaluationResult;
use crate::scoring::builders::{
    build_closest_value_context, build_group_stage_context, build_match_context,
    build_question_context, build_series_context, build_special_bet_context,
};
use crate::scoring::records::{
    GroupStageBetRecord, GroupStageResultRecord, MatchBetRecord, MatchResultRecord,
    QuestionBetRecord, QuestionResultRecord, SeriesBetRecord, SeriesResultRecord,
    SpecialBetRecord, SpecialResultRecord,
};
use crate::scoring::{
    score_prediction, Category, LeagueRules, RawRuleSetting, RuleAwards, RuleId, RuleInput,
    RuleSetting,
};

/// All records of one event: its result and every bet placed on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventRecords {
    Match {
        result: MatchResultRecord,
        bets: Vec<MatchBetRecord>,
        /// Player id -> rank, when ranks come from outside the match record.
        #[serde(default)]
        scorer_ranks: Option<HashMap<i64, u32>>,
    },
    Series {
        result: SeriesResultRecord,
        bets: Vec<SeriesBetRecord>,
    },
    Special {
        result: SpecialResultRecord,
        bets: Vec<SpecialBetRecord>,
    },
    GroupStage {
        result: GroupStageResultRecord,
        bets: Vec<GroupStageBetRecord>,
    },
    Question {
        result: QuestionResultRecord,
        bets: Vec<QuestionBetRecord>,
    },
}

impl EventRecords {
    pub fn kind(&self) -> &'static str {
        match self {
            EventRecords::Match { .. } => "match",
            EventRecords::Series { .. } => "series",
            EventRecords::Special { .. } => "special",
            EventRecords::GroupStage { .. } => "group_stage",
            EventRecords::Question { .. } => "question",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            EventRecords::Match { .. } => Category::Match,
            EventRecords::Series { .. } => Category::Series,
            EventRecords::Special { .. } | EventRecords::GroupStage { .. } => Category::Special,
            EventRecords::Question { .. } => Category::Question,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventBatch {
    pub event_id: i64,
    pub event: EventRecords,
    /// Rules attached to this event itself (e.g. the evaluator chosen for a
    /// single special bet). When present they replace the league's rules of
    /// the event's category.
    #[serde(default)]
    pub rules: Option<Vec<RawRuleSetting>>,
}

impl EventBatch {
    /// Stable key identifying the event in the points store.
    pub fn key(&self) -> String {
        format!("{}:{}", self.event.kind(), self.event_id)
    }
}

/// Points earned by one bet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionScore {
    pub bet_id: i64,
    pub user_id: i64,
    pub awards: BTreeMap<RuleId, i32>,
    pub total: i32,
}

impl PredictionScore {
    fn new(bet_id: i64, user_id: i64, awards: RuleAwards) -> Self {
        let total = awards.total();
        PredictionScore {
            bet_id,
            user_id,
            awards: awards.awards,
            total,
        }
    }
}

/// Complete scoring of one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventScores {
    pub event_key: String,
    pub scores: Vec<PredictionScore>,
}

impl EventScores {
    pub fn user_totals(&self) -> BTreeMap<i64, i32> {
        let mut totals = BTreeMap::new();
        for score in &self.scores {
            *totals.entry(score.user_id).or_insert(0) += score.total;
        }
        totals
    }
}

/// Score every bet of `batch` against `league`.
///
/// A single malformed record fails the whole event so that no user of the
/// event is scored while another is not.
pub fn evaluate_event(batch: &EventBatch, league: &LeagueRules) -> EvaluationResult<EventScores> {
    let category = batch.event.category();
    let settings = match &batch.rules {
        Some(raw) => LeagueRules::resolve(raw)?.for_category(category),
        None => league.for_category(category),
    };
    debug!(
        "Evaluating {} with {} rule(s): {:?}",
        batch.key(),
        settings.len(),
        settings.iter().map(|s| s.rule).collect::<Vec<_>>()
    );

    let scores = match &batch.event {
        EventRecords::Match {
            result,
            bets,
            scorer_ranks,
        } => score_match_bets(result, bets, scorer_ranks.as_ref(), &settings)?,
        EventRecords::Series { result, bets } => bets
            .par_iter()
            .map(|bet| -> EvaluationResult<PredictionScore> {
                let ctx = build_series_context(bet, result);
                let awards = score_prediction(category, &[RuleInput::Series(&ctx)], &settings)?;
                Ok(PredictionScore::new(bet.id, bet.user_id, awards))
            })
            .collect::<EvaluationResult<Vec<_>>>()?,
        EventRecords::Special { result, bets } => score_special_bets(result, bets, &settings)?,
        EventRecords::GroupStage { result, bets } => bets
            .par_iter()
            .map(|bet| -> EvaluationResult<PredictionScore> {
                let ctx = build_group_stage_context(bet, result);
                let awards =
                    score_prediction(category, &[RuleInput::GroupStage(&ctx)], &settings)?;
                Ok(PredictionScore::new(bet.id, bet.user_id, awards))
            })
            .collect::<EvaluationResult<Vec<_>>>()?,
        EventRecords::Question { result, bets } => bets
            .par_iter()
            .map(|bet| -> EvaluationResult<PredictionScore> {
                let ctx = build_question_context(bet, result);
                let awards = score_prediction(category, &[RuleInput::Question(&ctx)], &settings)?;
                Ok(PredictionScore::new(bet.id, bet.user_id, awards))
            })
            .collect::<EvaluationResult<Vec<_>>>()?,
    };

    let scores = EventScores {
        event_key: batch.key(),
        scores,
    };
    info!(
        "Evaluated {} bet(s) for {} ({} point(s) awarded)",
        scores.scores.len(),
        scores.event_key,
        scores.scores.iter().map(|s| s.total).sum::<i32>()
    );
    Ok(scores)
}

fn score_match_bets(
    result: &MatchResultRecord,
    bets: &[MatchBetRecord],
    scorer_ranks: Option<&HashMap<i64, u32>>,
    settings: &[RuleSetting],
) -> EvaluationResult<Vec<PredictionScore>> {
    bets.par_iter()
        .map(|bet| -> EvaluationResult<PredictionScore> {
            let ctx = build_match_context(bet, result, scorer_ranks)?;
            let awards = score_prediction(Category::Match, &[RuleInput::Match(&ctx)], settings)?;
            Ok(PredictionScore::new(bet.id, bet.user_id, awards))
        })
        .collect()
}

fn score_special_bets(
    result: &SpecialResultRecord,
    bets: &[SpecialBetRecord],
    settings: &[RuleSetting],
) -> EvaluationResult<Vec<PredictionScore>> {
    // Team and player events carry no value; value rules just do not apply.
    let wants_closest =
        result.result.value.is_some() && settings.iter().any(|s| s.rule.is_closest_value());
    bets.par_iter()
        .map(|bet| -> EvaluationResult<PredictionScore> {
            let ctx = build_special_bet_context(bet, result);
            let closest = if wants_closest {
                Some(build_closest_value_context(bet, result, bets)?)
            } else {
                None
            };
            let mut inputs = vec![RuleInput::Special(&ctx)];
            if let Some(closest) = &closest {
                inputs.push(RuleInput::ClosestValue(closest));
            }
            let awards = score_prediction(Category::Special, &inputs, settings)?;
            Ok(PredictionScore::new(bet.id, bet.user_id, awards))
        })
        .collect()
}
