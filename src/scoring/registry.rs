//! Closed mapping from rule identifiers to evaluator functions.
//!
//! League configuration stores rules by name; `RuleId::from_name` turns the
//! name into an identifier and `RuleId::evaluator` hands back the function.
//! Both are exhaustive matches, so adding a rule is a compile-time change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EvaluationError;

use super::context::{
    ClosestValueContext, GroupStageConfig, GroupStageContext, MatchContext, QuestionContext,
    RuleConfig, RuleOutcome, ScorerRankConfig, SeriesContext, SpecialBetContext,
};
use super::rules;

/// Bet category a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Match,
    Series,
    Special,
    Question,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Match => "match",
            Category::Series => "series",
            Category::Special => "special",
            Category::Question => "question",
        })
    }
}

/// Every scoring rule the engine knows. Declaration order is evaluation
/// order within a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    ExactScore,
    ScoreDifference,
    OneTeamScore,
    Winner,
    Draw,
    Scorer,
    RankedScorer,
    SoccerPlayoffAdvance,
    SeriesExact,
    SeriesWinner,
    ExactTeam,
    ExactPlayer,
    ExactValue,
    ClosestValue,
    GroupStageTeam,
    Question,
}

impl RuleId {
    pub const ALL: [RuleId; 16] = [
        RuleId::ExactScore,
        RuleId::ScoreDifference,
        RuleId::OneTeamScore,
        RuleId::Winner,
        RuleId::Draw,
        RuleId::Scorer,
        RuleId::RankedScorer,
        RuleId::SoccerPlayoffAdvance,
        RuleId::SeriesExact,
        RuleId::SeriesWinner,
        RuleId::ExactTeam,
        RuleId::ExactPlayer,
        RuleId::ExactValue,
        RuleId::ClosestValue,
        RuleId::GroupStageTeam,
        RuleId::Question,
    ];

    /// Name as stored in league configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::ExactScore => "exact_score",
            RuleId::ScoreDifference => "score_difference",
            RuleId::OneTeamScore => "one_team_score",
            RuleId::Winner => "winner",
            RuleId::Draw => "draw",
            RuleId::Scorer => "scorer",
            RuleId::RankedScorer => "ranked_scorer",
            RuleId::SoccerPlayoffAdvance => "soccer_playoff_advance",
            RuleId::SeriesExact => "series_exact",
            RuleId::SeriesWinner => "series_winner",
            RuleId::ExactTeam => "exact_team",
            RuleId::ExactPlayer => "exact_player",
            RuleId::ExactValue => "exact_value",
            RuleId::ClosestValue => "closest_value",
            RuleId::GroupStageTeam => "group_stage_team",
            RuleId::Question => "question",
        }
    }

    pub fn from_name(name: &str) -> Option<RuleId> {
        RuleId::ALL.iter().copied().find(|rule| rule.as_str() == name)
    }

    pub fn category(&self) -> Category {
        match self {
            RuleId::ExactScore
            | RuleId::ScoreDifference
            | RuleId::OneTeamScore
            | RuleId::Winner
            | RuleId::Draw
            | RuleId::Scorer
            | RuleId::RankedScorer
            | RuleId::SoccerPlayoffAdvance => Category::Match,
            RuleId::SeriesExact | RuleId::SeriesWinner => Category::Series,
            RuleId::ExactTeam
            | RuleId::ExactPlayer
            | RuleId::ExactValue
            | RuleId::ClosestValue
            | RuleId::GroupStageTeam => Category::Special,
            RuleId::Question => Category::Question,
        }
    }

    pub fn is_rank_based_scorer(&self) -> bool {
        matches!(self, RuleId::RankedScorer)
    }

    pub fn is_closest_value(&self) -> bool {
        matches!(self, RuleId::ClosestValue)
    }

    pub fn is_group_stage(&self) -> bool {
        matches!(self, RuleId::GroupStageTeam)
    }

    /// Rules that cannot award anything without a league-specific config.
    pub fn requires_config(&self) -> bool {
        self.is_rank_based_scorer() || self.is_group_stage()
    }

    pub fn evaluator(&self) -> Evaluator {
        match self {
            RuleId::ExactScore => Evaluator::Match(rules::evaluate_exact_score),
            RuleId::ScoreDifference => Evaluator::Match(rules::evaluate_score_difference),
            RuleId::OneTeamScore => Evaluator::Match(rules::evaluate_one_team_score),
            RuleId::Winner => Evaluator::Match(rules::evaluate_winner),
            RuleId::Draw => Evaluator::Match(rules::evaluate_draw),
            RuleId::Scorer => Evaluator::Match(rules::evaluate_scorer),
            RuleId::RankedScorer => Evaluator::RankedScorer(rules::evaluate_ranked_scorer),
            RuleId::SoccerPlayoffAdvance => {
                Evaluator::Match(rules::evaluate_soccer_playoff_advance)
            }
            RuleId::SeriesExact => Evaluator::Series(rules::evaluate_series_exact),
            RuleId::SeriesWinner => Evaluator::Series(rules::evaluate_series_winner),
            RuleId::ExactTeam => Evaluator::Special(rules::evaluate_exact_team),
            RuleId::ExactPlayer => Evaluator::Special(rules::evaluate_exact_player),
            RuleId::ExactValue => Evaluator::Special(rules::evaluate_exact_value),
            RuleId::ClosestValue => Evaluator::ClosestValue(rules::evaluate_closest_value),
            RuleId::GroupStageTeam => Evaluator::GroupStage(rules::evaluate_group_stage_team),
            RuleId::Question => Evaluator::Question(rules::evaluate_question),
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleId {
    type Err = EvaluationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleId::from_name(s).ok_or_else(|| EvaluationError::UnknownRule(s.to_string()))
    }
}

/// Look up the evaluator for a configured rule name.
pub fn get_evaluator(name: &str) -> Option<Evaluator> {
    RuleId::from_name(name).map(|rule| rule.evaluator())
}

pub fn get_category(name: &str) -> Option<Category> {
    RuleId::from_name(name).map(|rule| rule.category())
}

/// A context borrowed for one rule call.
#[derive(Debug, Clone, Copy)]
pub enum RuleInput<'a> {
    Match(&'a MatchContext),
    Series(&'a SeriesContext),
    Special(&'a SpecialBetContext),
    ClosestValue(&'a ClosestValueContext),
    GroupStage(&'a GroupStageContext),
    Question(&'a QuestionContext),
}

/// Evaluator function reference, grouped by call signature.
#[derive(Clone, Copy)]
pub enum Evaluator {
    Match(fn(&MatchContext) -> bool),
    RankedScorer(fn(&MatchContext, &ScorerRankConfig) -> Option<i32>),
    Series(fn(&SeriesContext) -> bool),
    Special(fn(&SpecialBetContext) -> bool),
    ClosestValue(fn(&ClosestValueContext) -> f64),
    GroupStage(fn(&GroupStageContext, &GroupStageConfig) -> i32),
    Question(fn(&QuestionContext) -> f64),
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Evaluator::Match(_) => "Match",
            Evaluator::RankedScorer(_) => "RankedScorer",
            Evaluator::Series(_) => "Series",
            Evaluator::Special(_) => "Special",
            Evaluator::ClosestValue(_) => "ClosestValue",
            Evaluator::GroupStage(_) => "GroupStage",
            Evaluator::Question(_) => "Question",
        };
        write!(f, "Evaluator::{}", kind)
    }
}

impl Evaluator {
    /// Run the evaluator against `input`.
    ///
    /// Returns `None` when the evaluator does not take this kind of context.
    /// Config-driven evaluators given no config, or the wrong kind of config,
    /// award nothing.
    pub fn apply(&self, input: RuleInput<'_>, config: Option<&RuleConfig>) -> Option<RuleOutcome> {
        let outcome = match (*self, input) {
            (Evaluator::Match(f), RuleInput::Match(ctx)) => RuleOutcome::Award(f(ctx)),
            (Evaluator::RankedScorer(f), RuleInput::Match(ctx)) => match config {
                Some(RuleConfig::ScorerRanks(ranks)) => match f(ctx, ranks) {
                    Some(points) => RuleOutcome::Points { points, hit: true },
                    None => RuleOutcome::Points { points: 0, hit: false },
                },
                _ => RuleOutcome::Points { points: 0, hit: false },
            },
            (Evaluator::Series(f), RuleInput::Series(ctx)) => RuleOutcome::Award(f(ctx)),
            (Evaluator::Special(f), RuleInput::Special(ctx)) => RuleOutcome::Award(f(ctx)),
            (Evaluator::ClosestValue(f), RuleInput::ClosestValue(ctx)) => {
                RuleOutcome::Multiplier(f(ctx))
            }
            (Evaluator::GroupStage(f), RuleInput::GroupStage(ctx)) => match config {
                Some(RuleConfig::GroupStage(tiers)) => {
                    let points = f(ctx, tiers);
                    RuleOutcome::Points { points, hit: points != 0 }
                }
                _ => RuleOutcome::Points { points: 0, hit: false },
            },
            (Evaluator::Question(f), RuleInput::Question(ctx)) => RuleOutcome::Multiplier(f(ctx)),
            _ => return None,
        };
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::context::{ScorePair, SpecialResult};

    #[test]
    fn test_names_round_trip_through_lookup() {
        for rule in RuleId::ALL {
            assert_eq!(RuleId::from_name(rule.as_str()), Some(rule));
            assert_eq!(rule.to_string().parse::<RuleId>(), Ok(rule));
        }
    }

    #[test]
    fn test_unknown_names_resolve_to_none() {
        assert!(get_evaluator("exact_scor").is_none());
        assert!(get_category("").is_none());
        assert_eq!(
            "bogus".parse::<RuleId>(),
            Err(EvaluationError::UnknownRule("bogus".into()))
        );
    }

    #[test]
    fn test_serde_names_match_config_names() {
        for rule in RuleId::ALL {
            let json = serde_json::to_string(&rule).unwrap();
            assert_eq!(json, format!("\"{}\"", rule.as_str()));
        }
    }

    #[test]
    fn test_categories() {
        assert_eq!(get_category("exact_score"), Some(Category::Match));
        assert_eq!(get_category("ranked_scorer"), Some(Category::Match));
        assert_eq!(get_category("series_winner"), Some(Category::Series));
        assert_eq!(get_category("closest_value"), Some(Category::Special));
        assert_eq!(get_category("group_stage_team"), Some(Category::Special));
        assert_eq!(get_category("question"), Some(Category::Question));
    }

    #[test]
    fn test_family_predicates() {
        assert!(RuleId::RankedScorer.is_rank_based_scorer());
        assert!(!RuleId::Scorer.is_rank_based_scorer());
        assert!(RuleId::ClosestValue.is_closest_value());
        assert!(RuleId::GroupStageTeam.is_group_stage());
        assert!(RuleId::GroupStageTeam.requires_config());
        assert!(!RuleId::ClosestValue.requires_config());
    }

    #[test]
    fn test_evaluator_runs_through_lookup() {
        let ctx = SpecialBetContext {
            prediction: SpecialResult { team_id: Some(4), ..Default::default() },
            actual: SpecialResult { team_id: Some(4), ..Default::default() },
        };
        let evaluator = get_evaluator("exact_team").unwrap();
        assert_eq!(
            evaluator.apply(RuleInput::Special(&ctx), None),
            Some(RuleOutcome::Award(true))
        );
    }

    #[test]
    fn test_evaluator_rejects_foreign_context() {
        let ctx = SeriesContext {
            prediction: Some(ScorePair::new(4, 0)),
            actual: Some(ScorePair::new(4, 0)),
        };
        assert_eq!(RuleId::ExactScore.evaluator().apply(RuleInput::Series(&ctx), None), None);
    }

    #[test]
    fn test_missing_config_awards_nothing() {
        let ctx = GroupStageContext {
            predicted_team_id: Some(1),
            winner_team_id: Some(1),
            advanced_team_ids: vec![1],
        };
        let evaluator = RuleId::GroupStageTeam.evaluator();
        assert_eq!(
            evaluator.apply(RuleInput::GroupStage(&ctx), None),
            Some(RuleOutcome::Points { points: 0, hit: false })
        );
        let config = RuleConfig::GroupStage(GroupStageConfig {
            winner_points: 4,
            advance_points: 1,
        });
        assert_eq!(
            evaluator.apply(RuleInput::GroupStage(&ctx), Some(&config)),
            Some(RuleOutcome::Points { points: 4, hit: true })
        );
    }
}
