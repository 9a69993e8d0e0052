//! Error types for the medops binary.

use medops_baseline::BaselineError;
use medops_engine::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl From<BaselineError> for CliError {
    fn from(err: BaselineError) -> Self {
        CliError::Engine(EngineError::Baseline(err))
    }
}

pub type CliResult<T> = Result<T, CliError>;
