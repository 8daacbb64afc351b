//! Applies a league's rules to one prediction and resolves overlaps.
//!
//! Rules that describe overlapping outcomes are arranged into ordered
//! exclusion groups: within a group only the first configured rule that
//! awards keeps its points. Evaluators stay oblivious of each other.

use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};

use crate::error::{EvaluationError, EvaluationResult};

use super::context::RuleOutcome;
use super::league::RuleSetting;
use super::registry::{Category, RuleId, RuleInput};

/// Ordered mutual-exclusion groups, highest priority first.
///
/// A rule claims its group when its pick was right, even if its configured
/// tier pays `0`.
pub const EXCLUSION_GROUPS: &[&[RuleId]] = &[
    &[RuleId::ExactScore, RuleId::ScoreDifference, RuleId::OneTeamScore],
    &[RuleId::ExactScore, RuleId::Draw],
    &[RuleId::SeriesExact, RuleId::SeriesWinner],
    &[RuleId::RankedScorer, RuleId::Scorer],
];

/// Points awarded per rule for a single prediction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleAwards {
    /// Every rule evaluated for the prediction, excluded ones at `0`.
    pub awards: BTreeMap<RuleId, i32>,
}

impl RuleAwards {
    pub fn total(&self) -> i32 {
        self.awards.values().sum()
    }
}

/// Rules suppressed by a higher-priority rule of the same group.
fn excluded_rules(awarding: &HashSet<RuleId>) -> HashSet<RuleId> {
    let mut excluded = HashSet::new();
    for group in EXCLUSION_GROUPS {
        if let Some(pos) = group.iter().position(|rule| awarding.contains(rule)) {
            excluded.extend(group[pos + 1..].iter().copied());
        }
    }
    excluded
}

/// Evaluate `settings` for one prediction of a `category` event.
///
/// `inputs` holds every context built for the prediction; each rule runs on
/// the first input its evaluator accepts and is skipped when none fits.
pub fn score_prediction(
    category: Category,
    inputs: &[RuleInput<'_>],
    settings: &[RuleSetting],
) -> EvaluationResult<RuleAwards> {
    let mut outcomes: Vec<(&RuleSetting, RuleOutcome)> = Vec::with_capacity(settings.len());
    for setting in settings {
        let rule = setting.rule;
        if rule.category() != category {
            return Err(EvaluationError::CategoryMismatch {
                rule,
                expected: rule.category(),
                event: category,
            });
        }
        if rule.requires_config() && setting.config.is_none() {
            warn!("Rule {} has no configuration; it will not award points", rule);
        }

        let evaluator = rule.evaluator();
        let Some(outcome) = inputs
            .iter()
            .find_map(|input| evaluator.apply(*input, setting.config.as_ref()))
        else {
            debug!("Rule {} does not apply to this bet, skipping", rule);
            continue;
        };
        outcomes.push((setting, outcome));
    }

    let awarding: HashSet<RuleId> = outcomes
        .iter()
        .filter(|(_, outcome)| outcome.awards())
        .map(|(setting, _)| setting.rule)
        .collect();
    let excluded = excluded_rules(&awarding);

    let mut awards = RuleAwards::default();
    for (setting, outcome) in outcomes {
        let points = if excluded.contains(&setting.rule) {
            0
        } else {
            outcome.scaled(setting.points)
        };
        awards.awards.insert(setting.rule, points);
    }
    Ok(awards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::context::{
        MatchContext, MatchOutcome, MatchPrediction, RuleConfig, ScorePair, Scorer,
        ScorerRankConfig, SeriesContext,
    };

    fn match_settings() -> Vec<RuleSetting> {
        vec![
            RuleSetting::new(RuleId::ExactScore, 5),
            RuleSetting::new(RuleId::ScoreDifference, 3),
            RuleSetting::new(RuleId::OneTeamScore, 1),
            RuleSetting::new(RuleId::Winner, 2),
            RuleSetting::new(RuleId::Draw, 1),
        ]
    }

    fn make_ctx(pred: (i32, i32), reg: Option<(i32, i32)>) -> MatchContext {
        let regulation = reg.map(|(h, a)| ScorePair::new(h, a));
        MatchContext {
            prediction: MatchPrediction {
                score: Some(ScorePair::new(pred.0, pred.1)),
                overtime: false,
                scorer_id: None,
                no_scorer: false,
                home_advance: None,
            },
            actual: MatchOutcome {
                regulation,
                final_score: regulation,
                overtime: false,
                shootout: false,
                playoff: false,
                scorers: vec![],
                home_advanced: None,
            },
        }
    }

    impl RuleAwards {
        fn get(&self, rule: RuleId) -> i32 {
            self.awards.get(&rule).copied().unwrap_or(0)
        }
    }

    fn score(ctx: &MatchContext, settings: &[RuleSetting]) -> RuleAwards {
        score_prediction(Category::Match, &[RuleInput::Match(ctx)], settings).unwrap()
    }

    #[test]
    fn test_exact_draw_excludes_difference_and_draw() {
        let awards = score(&make_ctx((2, 2), Some((2, 2))), &match_settings());
        assert_eq!(awards.get(RuleId::ExactScore), 5);
        assert_eq!(awards.get(RuleId::ScoreDifference), 0);
        assert_eq!(awards.get(RuleId::OneTeamScore), 0);
        assert_eq!(awards.get(RuleId::Draw), 0);
        assert_eq!(awards.get(RuleId::Winner), 2);
        assert_eq!(awards.total(), 7);
    }

    #[test]
    fn test_difference_excludes_one_team_score() {
        // 3:1 vs 2:0 only matches on difference; 2:1 vs 2:0 matches home score.
        let awards = score(&make_ctx((3, 1), Some((2, 0))), &match_settings());
        assert_eq!(awards.get(RuleId::ScoreDifference), 3);
        assert_eq!(awards.get(RuleId::OneTeamScore), 0);

        let awards = score(&make_ctx((2, 1), Some((2, 0))), &match_settings());
        assert_eq!(awards.get(RuleId::ScoreDifference), 0);
        assert_eq!(awards.get(RuleId::OneTeamScore), 1);
        assert_eq!(awards.get(RuleId::Winner), 2);
    }

    #[test]
    fn test_non_exact_draw_keeps_difference_and_draw() {
        let awards = score(&make_ctx((1, 1), Some((2, 2))), &match_settings());
        assert_eq!(awards.get(RuleId::ScoreDifference), 3);
        assert_eq!(awards.get(RuleId::Draw), 1);
    }

    #[test]
    fn test_at_most_one_score_rule_awards() {
        let exclusive = [RuleId::ExactScore, RuleId::ScoreDifference, RuleId::OneTeamScore];
        for ph in 0..4 {
            for pa in 0..4 {
                for ah in 0..4 {
                    for aa in 0..4 {
                        let awards = score(&make_ctx((ph, pa), Some((ah, aa))), &match_settings());
                        let paying = exclusive.iter().filter(|r| awards.get(**r) > 0).count();
                        assert!(paying <= 1, "{}:{} vs {}:{}", ph, pa, ah, aa);
                    }
                }
            }
        }
    }

    #[test]
    fn test_unfinished_match_awards_nothing() {
        let awards = score(&make_ctx((1, 0), None), &match_settings());
        assert_eq!(awards.total(), 0);
        assert_eq!(awards.awards.len(), 5);
    }

    #[test]
    fn test_exclusion_only_considers_configured_rules() {
        let settings = vec![RuleSetting::new(RuleId::ScoreDifference, 3)];
        let awards = score(&make_ctx((2, 1), Some((2, 1))), &settings);
        assert_eq!(awards.get(RuleId::ScoreDifference), 3);
    }

    #[test]
    fn test_ranked_scorer_beats_flat_scorer() {
        let mut ctx = make_ctx((1, 0), Some((1, 0)));
        ctx.actual.scorers = vec![Scorer { player_id: 7, rank: Some(1) }];
        ctx.prediction.scorer_id = Some(7);
        let ranks = RuleConfig::ScorerRanks(ScorerRankConfig {
            ranked_points: [(1, 6)].into_iter().collect(),
            unranked_points: 2,
        });
        let settings = vec![
            RuleSetting::new(RuleId::Scorer, 2),
            RuleSetting::new(RuleId::RankedScorer, 0).with_config(ranks),
        ];
        let awards = score(&ctx, &settings);
        assert_eq!(awards.get(RuleId::RankedScorer), 6);
        assert_eq!(awards.get(RuleId::Scorer), 0);
    }

    #[test]
    fn test_zero_point_ranked_hit_still_excludes_flat_scorer() {
        let mut ctx = make_ctx((1, 0), Some((1, 0)));
        ctx.actual.scorers = vec![Scorer { player_id: 9, rank: None }];
        ctx.prediction.scorer_id = Some(9);
        let ranks = RuleConfig::ScorerRanks(ScorerRankConfig {
            ranked_points: [(1, 6)].into_iter().collect(),
            unranked_points: 0,
        });
        let settings = vec![
            RuleSetting::new(RuleId::Scorer, 2),
            RuleSetting::new(RuleId::RankedScorer, 0).with_config(ranks),
        ];
        let awards = score(&ctx, &settings);
        assert_eq!(awards.get(RuleId::RankedScorer), 0);
        assert_eq!(awards.get(RuleId::Scorer), 0);
        assert_eq!(awards.total(), 0);
    }

    #[test]
    fn test_unconfigured_ranked_scorer_leaves_flat_scorer_paying() {
        let mut ctx = make_ctx((1, 0), Some((1, 0)));
        ctx.actual.scorers = vec![Scorer { player_id: 9, rank: None }];
        ctx.prediction.scorer_id = Some(9);
        let settings = vec![
            RuleSetting::new(RuleId::Scorer, 2),
            RuleSetting::new(RuleId::RankedScorer, 0),
        ];
        let awards = score(&ctx, &settings);
        assert_eq!(awards.get(RuleId::RankedScorer), 0);
        assert_eq!(awards.get(RuleId::Scorer), 2);
    }

    #[test]
    fn test_series_exact_excludes_series_winner() {
        let ctx = SeriesContext {
            prediction: Some(ScorePair::new(4, 2)),
            actual: Some(ScorePair::new(4, 2)),
        };
        let settings = vec![
            RuleSetting::new(RuleId::SeriesExact, 5),
            RuleSetting::new(RuleId::SeriesWinner, 2),
        ];
        let awards =
            score_prediction(Category::Series, &[RuleInput::Series(&ctx)], &settings).unwrap();
        assert_eq!(awards.get(RuleId::SeriesExact), 5);
        assert_eq!(awards.get(RuleId::SeriesWinner), 0);
    }

    #[test]
    fn test_rule_from_another_category_is_rejected() {
        let ctx = make_ctx((1, 0), Some((1, 0)));
        let settings = vec![RuleSetting::new(RuleId::SeriesExact, 5)];
        let err =
            score_prediction(Category::Match, &[RuleInput::Match(&ctx)], &settings).unwrap_err();
        assert!(matches!(err, EvaluationError::CategoryMismatch { .. }));
    }

    #[test]
    fn test_scoring_is_repeatable() {
        let ctx = make_ctx((2, 0), Some((3, 1)));
        let first = score(&ctx, &match_settings());
        let second = score(&ctx, &match_settings());
        assert_eq!(first, second);
    }
}
