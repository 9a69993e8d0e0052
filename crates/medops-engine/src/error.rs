//! Error types for the engine facade.

use medops_baseline::BaselineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("baseline error: {0}")]
    Baseline(#[from] BaselineError),
}

impl From<config::ConfigError> for EngineError {
    fn from(err: config::ConfigError) -> Self {
        EngineError::Config(err.to_string())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let e = EngineError::Config("unknown jitter mode".into());
        assert_eq!(e.to_string(), "configuration error: unknown jitter mode");

        let e: EngineError = BaselineError::LockError.into();
        assert!(e.to_string().starts_with("baseline error:"));
    }
}
