use thiserror::Error;

/// Errors from the baseline store.
#[derive(Debug, Error)]
pub enum BaselineError {
    #[error("persistence error: {0}")]
    PersistenceError(String),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("lock acquisition failed")]
    LockError,

    #[error("invalid seasonal profile for {disease}: {detail}")]
    InvalidProfile { disease: String, detail: String },

    #[error("baseline version {version} published in memory but not saved: {reason}")]
    SaveFailed { version: u64, reason: String },
}

impl From<std::io::Error> for BaselineError {
    fn from(e: std::io::Error) -> Self {
        BaselineError::PersistenceError(e.to_string())
    }
}

impl From<serde_json::Error> for BaselineError {
    fn from(e: serde_json::Error) -> Self {
        BaselineError::SerializationError(e.to_string())
    }
}

/// Convenience type alias for baseline results.
pub type BaselineResult<T> = Result<T, BaselineError>;
