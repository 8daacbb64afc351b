//! Normalized evaluation inputs shared by every rule.
//!
//! Contexts are built fresh for each evaluation run from already-loaded
//! records (see `super::builders`) and are never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A home/away score pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorePair {
    pub home: i32,
    pub away: i32,
}

impl ScorePair {
    pub fn new(home: i32, away: i32) -> Self {
        ScorePair { home, away }
    }

    /// Build a pair only when both sides are present.
    pub fn from_parts(home: Option<i32>, away: Option<i32>) -> Option<Self> {
        Some(ScorePair {
            home: home?,
            away: away?,
        })
    }

    /// Signed goal margin, widened so extreme scores cannot overflow.
    pub fn difference(&self) -> i64 {
        i64::from(self.home) - i64::from(self.away)
    }

    pub fn is_draw(&self) -> bool {
        self.home == self.away
    }

    pub fn side(&self) -> Side {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => Side::Home,
            std::cmp::Ordering::Less => Side::Away,
            std::cmp::Ordering::Equal => Side::Draw,
        }
    }
}

/// Winning side of a score pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
    Draw,
}

/// One actual scorer of a match, optionally ranked (top scorer = rank 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorer {
    pub player_id: i64,
    pub rank: Option<u32>,
}

// ── Match ────────────────────────────────────────────────────────────────────

/// A user's head-to-head match prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchPrediction {
    pub score: Option<ScorePair>,
    pub overtime: bool,
    pub scorer_id: Option<i64>,
    /// Explicit "nobody scores" pick. Never combined with `scorer_id`;
    /// the match builder rejects bets that set both.
    pub no_scorer: bool,
    /// Predicted advancing side in a playoff game (`true` = home).
    pub home_advance: Option<bool>,
}

/// The finalized outcome of a match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// Regulation-time score. `None` means the match is not finished.
    pub regulation: Option<ScorePair>,
    /// Score after overtime / shootout.
    pub final_score: Option<ScorePair>,
    pub overtime: bool,
    pub shootout: bool,
    pub playoff: bool,
    pub scorers: Vec<Scorer>,
    /// Advancing side of a playoff game (`true` = home).
    pub home_advanced: Option<bool>,
}

impl MatchOutcome {
    pub fn is_finished(&self) -> bool {
        self.regulation.is_some()
    }

    /// Whether the match went past regulation time.
    pub fn went_to_extra_time(&self) -> bool {
        self.overtime || self.shootout
    }

    pub fn scorer(&self, player_id: i64) -> Option<&Scorer> {
        self.scorers.iter().find(|s| s.player_id == player_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchContext {
    pub prediction: MatchPrediction,
    pub actual: MatchOutcome,
}

// ── Series ───────────────────────────────────────────────────────────────────

/// A multi-game series: the score counts games won by each side.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesContext {
    pub prediction: Option<ScorePair>,
    pub actual: Option<ScorePair>,
}

// ── Special bets ─────────────────────────────────────────────────────────────

/// A single resolved entity: a team, a player, or a numeric value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecialResult {
    pub team_id: Option<i64>,
    pub player_id: Option<i64>,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpecialBetContext {
    pub prediction: SpecialResult,
    pub actual: SpecialResult,
}

/// Comparative context: one numeric guess against the pool of every guess
/// submitted for the same event.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosestValueContext {
    pub prediction: f64,
    pub actual: f64,
    pub all_predictions: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupStageContext {
    pub predicted_team_id: Option<i64>,
    pub winner_team_id: Option<i64>,
    pub advanced_team_ids: Vec<i64>,
}

// ── Questions ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionContext {
    pub prediction: Option<bool>,
    pub actual: Option<bool>,
}

// ── Rule configuration ───────────────────────────────────────────────────────

/// Per-rank scorer rewards. Ranks missing from `ranked_points` fall back to
/// `unranked_points`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorerRankConfig {
    pub ranked_points: BTreeMap<u32, i32>,
    pub unranked_points: i32,
}

impl ScorerRankConfig {
    pub fn points_for_rank(&self, rank: Option<u32>) -> i32 {
        rank.and_then(|r| self.ranked_points.get(&r).copied())
            .unwrap_or(self.unranked_points)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStageConfig {
    pub winner_points: i32,
    pub advance_points: i32,
}

/// League-specific configuration attached to a single rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleConfig {
    ScorerRanks(ScorerRankConfig),
    GroupStage(GroupStageConfig),
}

/// Raw output of a single evaluator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleOutcome {
    Award(bool),
    /// Absolute points, already taken from the rule's own configuration.
    /// `hit` records whether the pick was right, even when the rank or tier
    /// is configured to pay nothing.
    Points { points: i32, hit: bool },
    /// Fraction of the league's configured value for the rule.
    Multiplier(f64),
}

impl RuleOutcome {
    pub fn awards(&self) -> bool {
        match *self {
            RuleOutcome::Award(hit) => hit,
            RuleOutcome::Points { hit, .. } => hit,
            RuleOutcome::Multiplier(m) => m != 0.0,
        }
    }

    /// Scale against the league's configured value for the rule.
    pub fn scaled(&self, configured_points: i32) -> i32 {
        match *self {
            RuleOutcome::Award(true) => configured_points,
            RuleOutcome::Award(false) => 0,
            RuleOutcome::Points { points, .. } => points,
            RuleOutcome::Multiplier(m) => (m * configured_points as f64).round() as i32,
        }
    }
}
