use thiserror::Error;

use crate::scoring::{Category, RuleId};

/// Hard failures raised while preparing an evaluation.
///
/// A rule that simply does not apply (unfinished outcome, missing pick,
/// mismatched config) is not an error: it returns `false` / `0`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// A record is missing a field its bet category mandates.
    #[error("validation error: {0}")]
    Validation(String),

    /// A league configuration names a rule the engine does not know.
    #[error("unknown rule in league configuration: {0}")]
    UnknownRule(String),

    #[error("rule {rule} belongs to the {expected} category, not {event}")]
    CategoryMismatch {
        rule: RuleId,
        expected: Category,
        event: Category,
    },
}

pub type EvaluationResult<T> = Result<T, EvaluationError>;
