pub mod builders;
pub mod context;
pub mod coordinator;
pub mod league;
pub mod records;
pub mod registry;
pub mod rules;

pub use context::{RuleConfig, RuleOutcome};
pub use coordinator::{score_prediction, RuleAwards};
pub use league::{LeagueRules, RawRuleSetting, RuleSetting};
pub use registry::{get_category, get_evaluator, Category, Evaluator, RuleId, RuleInput};
