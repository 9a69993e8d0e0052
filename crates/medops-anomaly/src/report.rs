//! Anomaly report shapes.

use chrono::{DateTime, Utc};
use medops_types::{Anomaly, ChartPoint};
use serde::{Deserialize, Serialize};

/// Findings and chart series for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReport {
    pub title: String,
    pub description: String,
    pub anomalies: Vec<Anomaly>,
    pub chart_data: Vec<ChartPoint>,
}

/// Per-category results. A category without input is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnomalyCategories {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<CategoryReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<CategoryReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financial: Option<CategoryReport>,
}

impl AnomalyCategories {
    /// The categories present, in resource, patient, financial order.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryReport> {
        [&self.resource, &self.patient, &self.financial]
            .into_iter()
            .flatten()
    }
}

/// Result of one `detect` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyReport {
    pub categories: AnomalyCategories,
    pub total_anomalies: usize,
    pub detection_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_wire_shape() {
        let v = serde_json::to_value(AnomalyReport::default()).unwrap();
        assert_eq!(v["totalAnomalies"], 0);
        assert!(v["categories"].as_object().unwrap().is_empty());
        assert!(v["detectionDate"].is_string());
    }

    #[test]
    fn iter_skips_absent_categories() {
        let report = CategoryReport {
            title: "t".into(),
            description: "d".into(),
            anomalies: Vec::new(),
            chart_data: Vec::new(),
        };
        let categories = AnomalyCategories {
            resource: None,
            patient: Some(report),
            financial: None,
        };
        assert_eq!(categories.iter().count(), 1);
        let v = serde_json::to_value(&categories).unwrap();
        assert!(v.get("resource").is_none());
        assert_eq!(v["patient"]["chartData"], serde_json::json!([]));
    }
}
