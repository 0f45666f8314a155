//! Configuration errors.
//!
//! Evaluation never fails. Loading an [`EvaluatorConfig`](crate::EvaluatorConfig)
//! from an external source can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration source could not be read.
    #[error("failed to read evaluator config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration was not valid JSON or had the wrong shape.
    #[error("invalid evaluator config: {0}")]
    Parse(#[from] serde_json::Error),
}
