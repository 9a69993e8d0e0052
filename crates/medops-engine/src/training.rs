//! Retraining the baseline from labeled records.
//!
//! ```text
//!   TrainingData ──► per metric: population mean / std of non-anomalous records
//!                ──► per disease: TrendSeasonalModel::fit(case history)
//!                ──► next BaselineSnapshot (unchanged where data was insufficient)
//! ```

use std::collections::BTreeMap;

use medops_anomaly::{rules_for, MetricEntry};
use medops_baseline::{parse_day, BaselineSnapshot, NormalRange, TrendSeasonalModel};
use medops_types::{AnomalyCategory, CaseEntry, FinancialEntry, PatientEntry, ResourceEntry};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum usable records for a metric to be re-estimated.
pub const MIN_RECORDS: usize = 2;

/// Labeled training records. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingData {
    #[serde(default)]
    pub resource: Vec<ResourceEntry>,
    #[serde(default)]
    pub patient: Vec<PatientEntry>,
    #[serde(default)]
    pub financial: Vec<FinancialEntry>,
    /// Case history per disease.
    #[serde(default)]
    pub diseases: BTreeMap<String, Vec<CaseEntry>>,
}

impl TrainingData {
    pub fn is_empty(&self) -> bool {
        self.resource.is_empty()
            && self.patient.is_empty()
            && self.financial.is_empty()
            && self.diseases.values().all(Vec::is_empty)
    }
}

/// Outcome of a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingStatus {
    pub status: String,
    pub message: String,
    /// Baseline version in effect after training.
    pub version: u64,
    pub metrics_retrained: usize,
    pub diseases_fitted: usize,
    pub synthetic_data: bool,
    pub persisted: bool,
}

/// What [`retrain`] changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrainSummary {
    pub metrics_retrained: usize,
    pub diseases_fitted: usize,
}

/// Build the next snapshot from `base` and `data`. Version and timestamp are
/// left for the store to assign on publish.
pub fn retrain(base: &BaselineSnapshot, data: &TrainingData) -> (BaselineSnapshot, RetrainSummary) {
    let mut next = base.clone();
    let mut summary = RetrainSummary::default();

    summary.metrics_retrained += refit_ranges(&mut next, AnomalyCategory::Resource, &data.resource);
    summary.metrics_retrained += refit_ranges(&mut next, AnomalyCategory::Patient, &data.patient);
    summary.metrics_retrained += refit_ranges(&mut next, AnomalyCategory::Financial, &data.financial);

    for (disease, history) in &data.diseases {
        let points: Vec<_> = history
            .iter()
            .filter_map(|e| parse_day(&e.date).map(|d| (d, e.cases)))
            .collect();
        match TrendSeasonalModel::fit(&points) {
            Some(model) => {
                debug!(disease = %disease, observations = model.observations, "forecast model fitted");
                next.forecast_models.insert(disease.clone(), model);
                summary.diseases_fitted += 1;
            }
            None => debug!(disease = %disease, "not enough dated observations to fit"),
        }
    }

    (next, summary)
}

/// Re-estimate every metric of `category` from the non-anomalous entries.
/// Returns the number of metrics updated.
fn refit_ranges<E>(snapshot: &mut BaselineSnapshot, category: AnomalyCategory, entries: &[E]) -> usize
where
    E: MetricEntry + Labeled,
{
    let rules = rules_for(category);
    let normal: Vec<&E> = entries.iter().filter(|e| !e.is_anomaly()).collect();
    if normal.len() < MIN_RECORDS {
        return 0;
    }

    let mut updated = 0;
    for rule in rules.rules {
        let values: Vec<f64> = normal.iter().map(|e| e.value(rule.metric)).collect();
        let range = population_range(&values);
        snapshot
            .normal_ranges
            .entry(rules.baseline_key.to_string())
            .or_default()
            .insert(rule.metric.to_string(), range);
        updated += 1;
    }
    updated
}

/// Population mean and standard deviation.
pub fn population_range(values: &[f64]) -> NormalRange {
    if values.is_empty() {
        return NormalRange::new(0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    NormalRange::new(mean, variance.sqrt())
}

/// Records that carry an anomaly label.
pub trait Labeled {
    fn is_anomaly(&self) -> bool;
}

impl Labeled for ResourceEntry {
    fn is_anomaly(&self) -> bool {
        self.is_anomaly
    }
}

impl Labeled for PatientEntry {
    fn is_anomaly(&self) -> bool {
        self.is_anomaly
    }
}

impl Labeled for FinancialEntry {
    fn is_anomaly(&self) -> bool {
        self.is_anomaly
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medops_baseline::{category, metric};

    fn entry(date: &str, bed: f64, is_anomaly: bool) -> ResourceEntry {
        ResourceEntry {
            date: date.into(),
            bed_occupancy: bed,
            staff_utilization: 80.0,
            equipment_usage: 65.0,
            is_anomaly,
        }
    }

    #[test]
    fn population_statistics() {
        let r = population_range(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(r.mean, 5.0);
        assert_eq!(r.std, 2.0);
    }

    #[test]
    fn anomalous_records_are_excluded() {
        let base = BaselineSnapshot::defaults();
        let data = TrainingData {
            resource: vec![
                entry("2025-01-01", 70.0, false),
                entry("2025-01-02", 80.0, false),
                entry("2025-01-03", 140.0, true),
            ],
            ..Default::default()
        };
        let (next, summary) = retrain(&base, &data);
        assert_eq!(summary.metrics_retrained, 3);
        let bed = next.range(category::RESOURCE, metric::BED_OCCUPANCY);
        assert_eq!(bed.mean, 75.0);
        assert_eq!(bed.std, 5.0);
        // Untouched categories keep their ranges.
        assert_eq!(
            next.range(category::FINANCIAL, metric::DAILY_EXPENSES),
            base.range(category::FINANCIAL, metric::DAILY_EXPENSES)
        );
    }

    #[test]
    fn too_few_records_keep_old_range() {
        let base = BaselineSnapshot::defaults();
        let data = TrainingData {
            resource: vec![entry("2025-01-01", 99.0, false), entry("2025-01-02", 10.0, true)],
            ..Default::default()
        };
        let (next, summary) = retrain(&base, &data);
        assert_eq!(summary.metrics_retrained, 0);
        assert_eq!(next, base);
    }

    #[test]
    fn diseases_with_two_dates_get_models() {
        let base = BaselineSnapshot::defaults();
        let mut diseases = BTreeMap::new();
        diseases.insert(
            "Influenza".to_string(),
            vec![
                CaseEntry { date: "2024-01-01".into(), cases: 40.0 },
                CaseEntry { date: "2024-02-01".into(), cases: 44.0 },
            ],
        );
        diseases.insert(
            "Asthma".to_string(),
            vec![CaseEntry { date: "2024-01-01".into(), cases: 12.0 }],
        );
        diseases.insert(
            "Bronchitis".to_string(),
            vec![
                CaseEntry { date: "not a date".into(), cases: 3.0 },
                CaseEntry { date: "2024-01-01T08:00:00".into(), cases: 5.0 },
            ],
        );
        let data = TrainingData { diseases, ..Default::default() };
        let (next, summary) = retrain(&base, &data);
        assert_eq!(summary.diseases_fitted, 1);
        assert!(next.model("Influenza").is_some());
        assert!(next.model("Asthma").is_none());
        assert!(next.model("Bronchitis").is_none());
    }

    #[test]
    fn training_data_deserializes_partially() {
        let data: TrainingData = serde_json::from_str(
            r#"{"patient": [{"date": "2025-01-01", "readmission_rate": "9.1", "is_anomaly": true}]}"#,
        )
        .unwrap();
        assert!(data.resource.is_empty());
        assert_eq!(data.patient[0].readmission_rate, 9.1);
        assert!(data.patient[0].is_anomaly);
        assert!(!data.is_empty());
        assert!(TrainingData::default().is_empty());
    }
}
