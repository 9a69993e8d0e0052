//! The anomaly detector: applies category rules to series entries.
//!
//! ```text
//!   entries ──► for each entry, for each MetricRule
//!                 ├── |value - mean| > sigma * std ?
//!                 ├── deviation on the rule's side ?
//!                 └── Anomaly { id: prefix-n, severity from absolute value }
//!           ──► chart: one point per entry (actual vs normal, anomaly flag)
//! ```

use chrono::{DateTime, Utc};
use medops_baseline::{BaselineSnapshot, NormalRange};
use medops_types::{
    date_only, Anomaly, AnomalyCategory, AnomalyScope, ChartPoint, FinancialEntry, PatientEntry,
    ResourceEntry,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::report::{AnomalyCategories, AnomalyReport, CategoryReport};
use crate::rules::{rules_for, CategoryRules};

// ── Configuration ───────────────────────────────────────────────────────

/// Sigma multipliers applied to each category's standard deviations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Resource and patient categories.
    pub sigma_multiplier: f64,
    pub financial_sigma_multiplier: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            sigma_multiplier: 2.0,
            financial_sigma_multiplier: 2.5,
        }
    }
}

impl DetectionConfig {
    pub fn sigma_for(&self, category: AnomalyCategory) -> f64 {
        match category {
            AnomalyCategory::Financial => self.financial_sigma_multiplier,
            AnomalyCategory::Resource | AnomalyCategory::Patient => self.sigma_multiplier,
        }
    }
}

// ── Series access ───────────────────────────────────────────────────────

/// A dated entry whose metrics can be looked up by name.
pub trait MetricEntry {
    fn date(&self) -> &str;

    /// Value of `metric`, or 0 for a metric this entry does not carry.
    fn value(&self, metric: &str) -> f64;
}

impl MetricEntry for ResourceEntry {
    fn date(&self) -> &str {
        &self.date
    }

    fn value(&self, metric: &str) -> f64 {
        match metric {
            medops_baseline::metric::BED_OCCUPANCY => self.bed_occupancy,
            medops_baseline::metric::STAFF_UTILIZATION => self.staff_utilization,
            medops_baseline::metric::EQUIPMENT_USAGE => self.equipment_usage,
            _ => 0.0,
        }
    }
}

impl MetricEntry for PatientEntry {
    fn date(&self) -> &str {
        &self.date
    }

    fn value(&self, metric: &str) -> f64 {
        match metric {
            medops_baseline::metric::READMISSION_RATE => self.readmission_rate,
            medops_baseline::metric::LENGTH_OF_STAY => self.length_of_stay,
            medops_baseline::metric::MEDICATION_ERRORS => self.medication_errors,
            _ => 0.0,
        }
    }
}

impl MetricEntry for FinancialEntry {
    fn date(&self) -> &str {
        &self.date
    }

    fn value(&self, metric: &str) -> f64 {
        match metric {
            medops_baseline::metric::DAILY_EXPENSES => self.daily_expenses,
            medops_baseline::metric::REVENUE_PER_BED => self.revenue_per_bed,
            medops_baseline::metric::SUPPLY_COSTS => self.supply_costs,
            _ => 0.0,
        }
    }
}

// ── Detector ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct AnomalyDetector {
    config: DetectionConfig,
}

impl AnomalyDetector {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Detect anomalies in every selected category that has entries.
    ///
    /// Categories that are unselected or have no entries are omitted.
    pub fn detect(
        &self,
        baseline: &BaselineSnapshot,
        resource: &[ResourceEntry],
        patient: &[PatientEntry],
        financial: &[FinancialEntry],
        scope: AnomalyScope,
    ) -> AnomalyReport {
        self.detect_at(baseline, resource, patient, financial, scope, Utc::now())
    }

    /// [`detect`](Self::detect) with the report stamped `as_of`.
    pub fn detect_at(
        &self,
        baseline: &BaselineSnapshot,
        resource: &[ResourceEntry],
        patient: &[PatientEntry],
        financial: &[FinancialEntry],
        scope: AnomalyScope,
        as_of: DateTime<Utc>,
    ) -> AnomalyReport {
        let mut categories = AnomalyCategories::default();

        if scope.includes(AnomalyCategory::Resource) && !resource.is_empty() {
            categories.resource =
                Some(self.detect_category(baseline, AnomalyCategory::Resource, resource));
        }
        if scope.includes(AnomalyCategory::Patient) && !patient.is_empty() {
            categories.patient =
                Some(self.detect_category(baseline, AnomalyCategory::Patient, patient));
        }
        if scope.includes(AnomalyCategory::Financial) && !financial.is_empty() {
            categories.financial =
                Some(self.detect_category(baseline, AnomalyCategory::Financial, financial));
        }

        let total_anomalies = categories.iter().map(|c| c.anomalies.len()).sum();
        debug!(
            scope = ?scope,
            baseline_version = baseline.version,
            total_anomalies = total_anomalies,
            "anomaly detection complete"
        );

        AnomalyReport {
            categories,
            total_anomalies,
            detection_date: as_of,
        }
    }

    /// Run one category's rules over `entries` and build its chart.
    pub fn detect_category<E: MetricEntry>(
        &self,
        baseline: &BaselineSnapshot,
        category: AnomalyCategory,
        entries: &[E],
    ) -> CategoryReport {
        let rules = rules_for(category);
        let sigma = self.config.sigma_for(category);
        let ranges: Vec<NormalRange> = rules
            .rules
            .iter()
            .map(|rule| baseline.range(rules.baseline_key, rule.metric))
            .collect();

        let mut anomalies: Vec<Anomaly> = Vec::new();
        for entry in entries {
            for (rule, range) in rules.rules.iter().zip(&ranges) {
                let value = entry.value(rule.metric);
                let deviation = range.deviation(value);
                if !(range.exceeds(value, sigma) && rule.direction.matches(deviation)) {
                    continue;
                }
                anomalies.push(Anomaly {
                    id: format!("{}-{}", rule.id_prefix, anomalies.len()),
                    title: rule.title.to_string(),
                    description: (rule.describe)(value, range.mean),
                    severity: rule.severity.assign(value),
                    timestamp: entry.date().to_string(),
                    related_metric: rule.related_metric.to_string(),
                });
            }
        }

        let normal_value = chart_normal(baseline, rules);
        let chart_data = entries
            .iter()
            .map(|entry| ChartPoint {
                date: date_only(entry.date()).to_string(),
                normal_value,
                actual_value: mean(rules.chart_metrics.iter().map(|m| entry.value(m))),
                is_anomaly: anomalies.iter().any(|a| a.timestamp == entry.date()),
            })
            .collect();

        if !anomalies.is_empty() {
            debug!(
                category = %category,
                count = anomalies.len(),
                sigma = sigma,
                "anomalies flagged"
            );
        }

        CategoryReport {
            title: category.title().to_string(),
            description: category.description().to_string(),
            anomalies,
            chart_data,
        }
    }
}

fn chart_normal(baseline: &BaselineSnapshot, rules: &CategoryRules) -> f64 {
    mean(
        rules
            .chart_metrics
            .iter()
            .map(|m| baseline.range(rules.baseline_key, m).mean),
    )
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}
