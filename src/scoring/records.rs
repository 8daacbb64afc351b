use serde::{Deserialize, Serialize};

use super::context::{Scorer, SpecialResult};

/// A stored match bet, as handed over by the persistence layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchBetRecord {
    pub id: i64,
    pub user_id: i64,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    #[serde(default)]
    pub overtime: Option<bool>,
    #[serde(default)]
    pub scorer_id: Option<i64>,
    #[serde(default)]
    pub no_scorer: Option<bool>,
    #[serde(default)]
    pub home_advance: Option<bool>,
}

/// A stored match result. Regulation scores are `None` until the match ends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchResultRecord {
    pub id: i64,
    pub home_regular_score: Option<i32>,
    pub away_regular_score: Option<i32>,
    pub home_final_score: Option<i32>,
    pub away_final_score: Option<i32>,
    #[serde(default)]
    pub is_overtime: bool,
    #[serde(default)]
    pub is_shootout: bool,
    #[serde(default)]
    pub is_playoff: bool,
    #[serde(default)]
    pub home_advanced: Option<bool>,
    #[serde(default)]
    pub scorers: Vec<Scorer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesBetRecord {
    pub id: i64,
    pub user_id: i64,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesResultRecord {
    pub id: i64,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecialBetRecord {
    pub id: i64,
    pub user_id: i64,
    #[serde(flatten)]
    pub pick: SpecialResult,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecialResultRecord {
    pub id: i64,
    #[serde(flatten)]
    pub result: SpecialResult,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupStageBetRecord {
    pub id: i64,
    pub user_id: i64,
    pub team_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupStageResultRecord {
    pub id: i64,
    pub winner_team_id: Option<i64>,
    #[serde(default)]
    pub advanced_team_ids: Vec<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionBetRecord {
    pub id: i64,
    pub user_id: i64,
    pub answer: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionResultRecord {
    pub id: i64,
    pub correct_answer: Option<bool>,
}
