pub mod config;
pub mod error;
pub mod orchestrator;
pub mod scoring;
pub mod store;

pub use error::{EvaluationError, EvaluationResult};
pub use orchestrator::{evaluate_event, EventBatch, EventScores, PredictionScore};
