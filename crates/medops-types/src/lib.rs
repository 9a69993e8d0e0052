//! # medops-types
//!
//! Shared domain records for the hospital operations analytics engines.
//!
//! Every record here is a plain request-scoped value: the engines build them,
//! hand them to the caller, and never share them across calls. Input records
//! deserialize leniently (see [`lenient`]) so that a malformed snapshot
//! degrades to zeros instead of failing the whole request.
//!
//! ## Wire format
//!
//! Output records serialize with camelCase keys (`chartData`, `riskLevel`,
//! `relatedMetric`, ...). Series entries keep the snake_case metric names the
//! fetch layer produces (`bed_occupancy`, `daily_expenses`, ...).

#![deny(unsafe_code)]

pub mod anomaly;
pub mod error;
pub mod lenient;
pub mod prediction;
pub mod recommendation;
pub mod resource;
pub mod scope;
pub mod series;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use anomaly::{Anomaly, AnomalyCategory, ChartPoint, Severity};
pub use error::{TypesError, TypesResult};
pub use prediction::{Prediction, RiskLevel, TrendPoint};
pub use recommendation::{Impact, Recommendation, RecommendationBuilder};
pub use resource::{ResourceKind, ResourceSnapshot};
pub use scope::{AnomalyScope, ResourceScope};
pub use series::{date_only, CaseEntry, FinancialEntry, PatientEntry, ResourceEntry};

/// Round to one decimal place, the precision used for reported percentages.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
