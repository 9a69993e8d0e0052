//! # medops-anomaly
//!
//! Anomaly detection engine. Every series entry is checked metric by metric
//! against the baseline's normal ranges:
//!
//! ```text
//!   flag  ⇔  |value - mean| > k · std   and   deviation on the metric's bad side
//!
//!   k = 2.0 (resource, patient), 2.5 (financial); revenue per bed flags below
//!   the mean, every other metric above it.
//! ```
//!
//! Severity comes from a fixed per-metric cut line on the raw value (see
//! [`rules`]). Each category also returns a chart series of actual vs normal
//! values, one point per entry.

#![deny(unsafe_code)]

pub mod detector;
pub mod report;
pub mod rules;

pub use detector::{AnomalyDetector, DetectionConfig, MetricEntry};
pub use report::{AnomalyCategories, AnomalyReport, CategoryReport};
pub use rules::{rules_for, CategoryRules, Direction, MetricRule, SeverityRule};
