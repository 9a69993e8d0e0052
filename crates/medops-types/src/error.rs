use thiserror::Error;

/// Errors raised while interpreting caller-supplied selectors.
///
/// Record deserialization never fails on bad numbers (those default to zero);
/// only selectors that change which engine branch runs are validated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("unknown resource scope: {0} (expected all, beds, staff or equipment)")]
    UnknownResourceScope(String),

    #[error("unknown anomaly scope: {0} (expected all, resource, patient or financial)")]
    UnknownAnomalyScope(String),
}

/// Convenience type alias for type-level results.
pub type TypesResult<T> = Result<T, TypesError>;
