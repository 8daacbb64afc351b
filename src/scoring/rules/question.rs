use crate::scoring::context::QuestionContext;

/// Multiplier for a wrong answer.
pub const WRONG_ANSWER_MULTIPLIER: f64 = -0.5;

/// Yes/no question: `1.0` when right, `-0.5` when a wrong answer was picked,
/// `0.0` with no pick or no resolved answer.
pub fn evaluate_question(ctx: &QuestionContext) -> f64 {
    match (ctx.prediction, ctx.actual) {
        (Some(pick), Some(answer)) if pick == answer => 1.0,
        (Some(_), Some(_)) => WRONG_ANSWER_MULTIPLIER,
        _ => 0.0,
    }
}
