//! Baseline type definitions.
//!
//! Key types: `NormalRange` (per-metric anomaly reference), `SeasonalProfile`
//! (per-disease incidence calendar), `BaselineSnapshot` (one complete,
//! versioned copy of everything the engines read).

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BaselineError, BaselineResult};
use crate::model::TrendSeasonalModel;

// ── Metric Names ────────────────────────────────────────────────────────

/// Category keys of the normal-range table.
pub mod category {
    pub const RESOURCE: &str = "resource";
    pub const PATIENT: &str = "patient";
    pub const FINANCIAL: &str = "financial";
}

/// Metric keys within each category.
pub mod metric {
    pub const BED_OCCUPANCY: &str = "bed_occupancy";
    pub const STAFF_UTILIZATION: &str = "staff_utilization";
    pub const EQUIPMENT_USAGE: &str = "equipment_usage";
    pub const READMISSION_RATE: &str = "readmission_rate";
    pub const LENGTH_OF_STAY: &str = "length_of_stay";
    pub const MEDICATION_ERRORS: &str = "medication_errors";
    pub const DAILY_EXPENSES: &str = "daily_expenses";
    pub const REVENUE_PER_BED: &str = "revenue_per_bed";
    pub const SUPPLY_COSTS: &str = "supply_costs";
}

// ── Normal Range ────────────────────────────────────────────────────────

/// Mean and standard deviation of a metric under normal operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalRange {
    pub mean: f64,
    pub std: f64,
}

impl NormalRange {
    pub const fn new(mean: f64, std: f64) -> Self {
        Self { mean, std }
    }

    /// Signed distance from the mean.
    pub fn deviation(&self, value: f64) -> f64 {
        value - self.mean
    }

    /// `|value - mean| > sigma * std`.
    pub fn exceeds(&self, value: f64, sigma: f64) -> bool {
        self.deviation(value).abs() > sigma * self.std
    }
}

// ── Seasonal Profile ────────────────────────────────────────────────────

/// Incidence period a calendar month falls in for a given disease.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    Peak,
    Moderate,
    Low,
}

/// Per-disease seasonal incidence description.
///
/// Months not listed as peak or moderate are low (multiplier 1.0).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeasonalProfile {
    pub peak_months: BTreeSet<u32>,
    pub moderate_months: BTreeSet<u32>,
    pub baseline_value: f64,
    pub peak_multiplier: f64,
    pub year_trend: f64,
}

impl SeasonalProfile {
    /// Build a profile; a month listed in both sets is kept as peak only.
    pub fn new(
        peak: impl IntoIterator<Item = u32>,
        moderate: impl IntoIterator<Item = u32>,
        baseline_value: f64,
        peak_multiplier: f64,
        year_trend: f64,
    ) -> Self {
        let mut profile = Self {
            peak_months: peak.into_iter().collect(),
            moderate_months: moderate.into_iter().collect(),
            baseline_value,
            peak_multiplier,
            year_trend,
        };
        profile.normalize();
        profile
    }

    /// A flat profile with no seasonal structure. Always usable.
    pub fn neutral(baseline_value: f64) -> Self {
        Self {
            peak_months: BTreeSet::new(),
            moderate_months: BTreeSet::new(),
            baseline_value,
            peak_multiplier: 1.0,
            year_trend: 1.0,
        }
    }

    /// Remove from `moderate_months` anything also in `peak_months`.
    pub fn normalize(&mut self) {
        let peak = &self.peak_months;
        self.moderate_months.retain(|m| !peak.contains(m));
    }

    pub fn period_of(&self, month: u32) -> Period {
        if self.peak_months.contains(&month) {
            Period::Peak
        } else if self.moderate_months.contains(&month) {
            Period::Moderate
        } else {
            Period::Low
        }
    }

    /// Peak: `peak_multiplier`; moderate: midway between it and 1.0; low: 1.0.
    pub fn multiplier_for(&self, month: u32) -> f64 {
        match self.period_of(month) {
            Period::Peak => self.peak_multiplier,
            Period::Moderate => (self.peak_multiplier + 1.0) / 2.0,
            Period::Low => 1.0,
        }
    }

    /// Reject profiles the engines cannot compute with.
    pub fn validate(&self, disease: &str) -> BaselineResult<()> {
        let invalid = |detail: &str| BaselineError::InvalidProfile {
            disease: disease.to_string(),
            detail: detail.to_string(),
        };
        if let Some(m) = self
            .peak_months
            .iter()
            .chain(self.moderate_months.iter())
            .find(|m| !(1..=12).contains(*m))
        {
            return Err(invalid(&format!("month {} outside 1..=12", m)));
        }
        if !self.baseline_value.is_finite() || self.baseline_value < 0.0 {
            return Err(invalid("baseline_value must be a non-negative number"));
        }
        if !self.peak_multiplier.is_finite() || self.peak_multiplier <= 0.0 {
            return Err(invalid("peak_multiplier must be positive"));
        }
        if !self.year_trend.is_finite() || self.year_trend <= 0.0 {
            return Err(invalid("year_trend must be positive"));
        }
        Ok(())
    }
}

// ── Snapshot ────────────────────────────────────────────────────────────

/// One complete version of the baseline state.
///
/// Readers hold an `Arc<BaselineSnapshot>` for the length of a call; the store
/// replaces the whole snapshot on publish, never individual fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaselineSnapshot {
    pub version: u64,
    pub updated_at: DateTime<Utc>,
    pub normal_ranges: BTreeMap<String, BTreeMap<String, NormalRange>>,
    pub seasonal_profiles: BTreeMap<String, SeasonalProfile>,
    #[serde(default)]
    pub forecast_models: BTreeMap<String, TrendSeasonalModel>,
}

impl BaselineSnapshot {
    /// Built-in defaults: version 0, no fitted models.
    pub fn defaults() -> Self {
        Self {
            version: 0,
            updated_at: Utc::now(),
            normal_ranges: default_normal_ranges(),
            seasonal_profiles: default_seasonal_profiles(),
            forecast_models: BTreeMap::new(),
        }
    }

    /// The range for `category.metric`, falling back to the built-in default.
    pub fn range(&self, category: &str, metric: &str) -> NormalRange {
        self.normal_ranges
            .get(category)
            .and_then(|metrics| metrics.get(metric))
            .copied()
            .or_else(|| {
                default_normal_ranges()
                    .get(category)
                    .and_then(|metrics| metrics.get(metric))
                    .copied()
            })
            .unwrap_or_default()
    }

    pub fn profile(&self, disease: &str) -> Option<&SeasonalProfile> {
        self.seasonal_profiles.get(disease)
    }

    pub fn model(&self, disease: &str) -> Option<&TrendSeasonalModel> {
        self.forecast_models.get(disease)
    }

    /// Normalize every profile and check it is usable.
    pub fn validate(&mut self) -> BaselineResult<()> {
        for (disease, profile) in self.seasonal_profiles.iter_mut() {
            profile.normalize();
            profile.validate(disease)?;
        }
        Ok(())
    }
}

impl Default for BaselineSnapshot {
    fn default() -> Self {
        Self::defaults()
    }
}

// ── Defaults ────────────────────────────────────────────────────────────

/// Default normal ranges per category and metric.
pub fn default_normal_ranges() -> BTreeMap<String, BTreeMap<String, NormalRange>> {
    let table: [(&str, [(&str, NormalRange); 3]); 3] = [
        (
            category::RESOURCE,
            [
                (metric::BED_OCCUPANCY, NormalRange::new(75.0, 10.0)),
                (metric::STAFF_UTILIZATION, NormalRange::new(80.0, 8.0)),
                (metric::EQUIPMENT_USAGE, NormalRange::new(65.0, 12.0)),
            ],
        ),
        (
            category::PATIENT,
            [
                (metric::READMISSION_RATE, NormalRange::new(8.5, 1.5)),
                (metric::LENGTH_OF_STAY, NormalRange::new(4.2, 0.8)),
                (metric::MEDICATION_ERRORS, NormalRange::new(2.1, 1.0)),
            ],
        ),
        (
            category::FINANCIAL,
            [
                (metric::DAILY_EXPENSES, NormalRange::new(24500.0, 3500.0)),
                (metric::REVENUE_PER_BED, NormalRange::new(3200.0, 450.0)),
                (metric::SUPPLY_COSTS, NormalRange::new(8500.0, 1200.0)),
            ],
        ),
    ];

    table
        .into_iter()
        .map(|(cat, metrics)| {
            let inner = metrics
                .into_iter()
                .map(|(name, range)| (name.to_string(), range))
                .collect();
            (cat.to_string(), inner)
        })
        .collect()
}

/// Default seasonal profiles.
///
/// Numeric parameters sit at the centre of the historically observed ranges.
pub fn default_seasonal_profiles() -> BTreeMap<String, SeasonalProfile> {
    let table: [(&str, &[u32], &[u32], f64, f64, f64); 8] = [
        ("Influenza", &[1, 2, 12], &[3, 11], 22.5, 3.25, 1.075),
        ("COVID-19", &[1, 12], &[2, 7, 8, 11], 30.0, 2.75, 1.0),
        ("Pneumonia", &[12, 1, 2], &[3, 11], 17.5, 2.15, 1.025),
        ("Gastroenteritis", &[1, 7], &[2, 6, 8, 12], 25.0, 1.75, 0.975),
        ("Common Cold", &[10, 11, 12, 1, 2], &[3, 9], 45.0, 1.95, 1.0),
        ("Bronchitis", &[12, 1, 2], &[3, 11], 15.0, 1.95, 1.0),
        ("Asthma", &[5, 9], &[4, 6, 8, 10], 20.0, 1.6, 1.05),
        ("Allergies", &[4, 5, 9], &[3, 6, 8, 10], 30.0, 2.15, 1.07),
    ];

    table
        .into_iter()
        .map(|(name, peak, moderate, baseline, mult, trend)| {
            (
                name.to_string(),
                SeasonalProfile::new(
                    peak.iter().copied(),
                    moderate.iter().copied(),
                    baseline,
                    mult,
                    trend,
                ),
            )
        })
        .collect()
}
