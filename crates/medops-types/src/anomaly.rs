//! Anomaly records and chart points produced by the anomaly engine.

use serde::{Deserialize, Serialize};

/// Anomaly severity. Assigned from the metric's absolute value, not its deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Medium,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "critical"),
            Self::Warning => write!(f, "warning"),
            Self::Medium => write!(f, "medium"),
        }
    }
}

/// The three metric categories checked for anomalies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyCategory {
    Resource,
    Patient,
    Financial,
}

impl AnomalyCategory {
    pub const ALL: [AnomalyCategory; 3] = [Self::Resource, Self::Patient, Self::Financial];

    /// Key used in reports and in the baseline's normal-range table.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Resource => "resource",
            Self::Patient => "patient",
            Self::Financial => "financial",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Resource => "Resource Usage Anomalies",
            Self::Patient => "Patient Care Anomalies",
            Self::Financial => "Financial Anomalies",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Resource => "Detection of unusual patterns in hospital resource utilization",
            Self::Patient => "Detection of unusual patterns in patient care metrics",
            Self::Financial => "Detection of unusual patterns in financial and billing metrics",
        }
    }
}

impl std::fmt::Display for AnomalyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A flagged metric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    /// The input entry's date, verbatim.
    pub timestamp: String,
    pub related_metric: String,
}

/// One normal-vs-actual comparison point for a category chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: String,
    #[serde(rename = "normal")]
    pub normal_value: f64,
    #[serde(rename = "actual")]
    pub actual_value: f64,
    #[serde(rename = "anomaly")]
    pub is_anomaly: bool,
}
