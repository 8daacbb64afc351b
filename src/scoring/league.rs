use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{EvaluationError, EvaluationResult};

use super::context::RuleConfig;
use super::registry::{Category, RuleId};

/// A rule as stored in league configuration, before name resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRuleSetting {
    pub name: String,
    #[serde(default)]
    pub points: i32,
    #[serde(default)]
    pub config: Option<RuleConfig>,
}

/// A resolved rule with the league's point value and optional config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSetting {
    pub rule: RuleId,
    /// Points for a boolean award, or the base scaled by a multiplier.
    pub points: i32,
    pub config: Option<RuleConfig>,
}

impl RuleSetting {
    pub fn new(rule: RuleId, points: i32) -> Self {
        RuleSetting {
            rule,
            points,
            config: None,
        }
    }

    pub fn with_config(mut self, config: RuleConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// The immutable set of rules a league scores with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueRules {
    pub rules: Vec<RuleSetting>,
}

impl LeagueRules {
    /// Resolve stored rule names. Unknown or repeated names are a
    /// configuration error.
    pub fn resolve(raw: &[RawRuleSetting]) -> EvaluationResult<Self> {
        let mut seen = HashSet::new();
        let mut rules = Vec::with_capacity(raw.len());
        for setting in raw {
            let rule: RuleId = setting.name.parse()?;
            if !seen.insert(rule) {
                return Err(EvaluationError::Validation(format!(
                    "rule {} configured more than once",
                    rule
                )));
            }
            rules.push(RuleSetting {
                rule,
                points: setting.points,
                config: setting.config.clone(),
            });
        }
        rules.sort_by_key(|s| s.rule);
        Ok(LeagueRules { rules })
    }

    /// Settings of one category, in evaluation order.
    pub fn for_category(&self, category: Category) -> Vec<RuleSetting> {
        let mut settings: Vec<RuleSetting> = self
            .rules
            .iter()
            .filter(|s| s.rule.category() == category)
            .cloned()
            .collect();
        settings.sort_by_key(|s| s.rule);
        settings
    }
}
