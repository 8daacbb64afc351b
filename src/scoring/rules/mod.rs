pub mod closest_value;
pub mod group_stage;
pub mod match_rules;
pub mod question;
pub mod series;
pub mod special;

pub use closest_value::evaluate_closest_value;
pub use group_stage::evaluate_group_stage_team;
pub use match_rules::{
    evaluate_draw, evaluate_exact_score, evaluate_one_team_score, evaluate_ranked_scorer,
    evaluate_score_difference, evaluate_scorer, evaluate_soccer_playoff_advance, evaluate_winner,
};
pub use question::evaluate_question;
pub use series::{evaluate_series_exact, evaluate_series_winner};
pub use special::{evaluate_exact_player, evaluate_exact_team, evaluate_exact_value};
