//! Baseline-consistent synthetic data.
//!
//! Stands in for the fetch layer when it has nothing to supply: sample
//! resource groups, a week of operational series with a few deviating days,
//! disease case counts, and labeled training records. Every generator takes
//! the current [`BaselineSnapshot`] so the data stays centred on the ranges
//! and profiles the engines compare against.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use medops_baseline::{category, metric, BaselineSnapshot, SeasonalProfile};
use medops_types::{
    round1, CaseEntry, FinancialEntry, PatientEntry, ResourceEntry, ResourceSnapshot,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::training::TrainingData;

/// Days in the operational series.
pub const SERIES_DAYS: u64 = 7;

/// Days of labeled training records per category.
pub const TRAINING_DAYS: u64 = 60;

/// Share of training records labeled anomalous.
pub const TRAINING_ANOMALY_RATE: f64 = 0.05;

/// Monthly case observations per disease in training history.
pub const TRAINING_MONTHS: u64 = 36;

// ── Sample resource groups ──────────────────────────────────────────────

pub fn sample_beds() -> Vec<ResourceSnapshot> {
    vec![
        ResourceSnapshot::new("ICU", 25, 22, 3),
        ResourceSnapshot::new("ER", 15, 12, 3),
        ResourceSnapshot::new("General", 60, 45, 15),
        ResourceSnapshot::new("Pediatric", 20, 8, 12),
        ResourceSnapshot::new("Maternity", 10, 8, 2),
    ]
}

pub fn sample_staff() -> Vec<ResourceSnapshot> {
    vec![
        ResourceSnapshot::new("Physician", 22, 18, 4),
        ResourceSnapshot::new("Nurse", 35, 32, 3),
        ResourceSnapshot::new("Technician", 18, 15, 3),
        ResourceSnapshot::new("Admin", 12, 5, 7),
    ]
}

pub fn sample_equipment() -> Vec<ResourceSnapshot> {
    vec![
        ResourceSnapshot::new("Ventilators", 15, 12, 3),
        ResourceSnapshot::new("MRI", 3, 2, 0),
        ResourceSnapshot::new("X-ray", 18, 8, 8),
        ResourceSnapshot::new("CT Scan", 4, 3, 1),
        ResourceSnapshot::new("Ultrasound", 10, 7, 3),
        ResourceSnapshot::new("Monitoring", 15, 13, 2),
    ]
}

// ── Generator ───────────────────────────────────────────────────────────

/// Operational series for one week.
#[derive(Debug, Clone, Default)]
pub struct OperationalSeries {
    pub resource: Vec<ResourceEntry>,
    pub patient: Vec<PatientEntry>,
    pub financial: Vec<FinancialEntry>,
}

/// Case history and current counts per disease.
#[derive(Debug, Clone, Default)]
pub struct CaseCounts {
    pub historical: BTreeMap<String, Vec<CaseEntry>>,
    pub current: BTreeMap<String, u64>,
}

/// Synthetic data generator over an injectable random source.
pub struct SyntheticSource<R: Rng> {
    rng: R,
    today: NaiveDate,
}

impl SyntheticSource<StdRng> {
    pub fn seeded(seed: u64, as_of: DateTime<Utc>) -> Self {
        Self::new(StdRng::seed_from_u64(seed), as_of)
    }
}

impl<R: Rng> SyntheticSource<R> {
    pub fn new(rng: R, as_of: DateTime<Utc>) -> Self {
        Self {
            rng,
            today: as_of.date_naive(),
        }
    }

    fn days_ago(&self, days: u64) -> NaiveDate {
        self.today
            .checked_sub_days(Days::new(days))
            .unwrap_or(self.today)
    }

    /// The last `days` dates, oldest first, ending today.
    fn trailing_dates(&self, days: u64) -> Vec<String> {
        (0..days)
            .rev()
            .map(|ago| self.days_ago(ago).format("%Y-%m-%d").to_string())
            .collect()
    }

    /// A week of operational series. Resource values run high on the last
    /// three days, patient values on days 3 to 6, financial values on days 3 to 5.
    pub fn operational_series(&mut self, baseline: &BaselineSnapshot) -> OperationalSeries {
        let dates = self.trailing_dates(SERIES_DAYS);
        let mean = |cat: &str, m: &str| baseline.range(cat, m).mean;
        let mut series = OperationalSeries::default();

        for (i, date) in dates.iter().enumerate() {
            let r = if i >= 4 {
                self.rng.gen_range(1.15..=1.25)
            } else {
                self.rng.gen_range(0.9..=1.1)
            };
            series.resource.push(ResourceEntry {
                date: date.clone(),
                bed_occupancy: round1(mean(category::RESOURCE, metric::BED_OCCUPANCY) * r),
                staff_utilization: round1(mean(category::RESOURCE, metric::STAFF_UTILIZATION) * r),
                equipment_usage: round1(mean(category::RESOURCE, metric::EQUIPMENT_USAGE) * r),
                is_anomaly: false,
            });
        }

        for (i, date) in dates.iter().enumerate() {
            let r = if (2..=5).contains(&i) {
                self.rng.gen_range(1.2..=1.4)
            } else {
                self.rng.gen_range(0.9..=1.1)
            };
            series.patient.push(PatientEntry {
                date: date.clone(),
                readmission_rate: round1(mean(category::PATIENT, metric::READMISSION_RATE) * r),
                length_of_stay: round1(mean(category::PATIENT, metric::LENGTH_OF_STAY) * r),
                medication_errors: round1(mean(category::PATIENT, metric::MEDICATION_ERRORS) * r),
                is_anomaly: false,
            });
        }

        for (i, date) in dates.iter().enumerate() {
            let r = if (2..=4).contains(&i) {
                self.rng.gen_range(1.25..=1.35)
            } else {
                self.rng.gen_range(0.9..=1.1)
            };
            series.financial.push(FinancialEntry {
                date: date.clone(),
                daily_expenses: (mean(category::FINANCIAL, metric::DAILY_EXPENSES) * r).round(),
                // Revenue moves against expenses.
                revenue_per_bed: (mean(category::FINANCIAL, metric::REVENUE_PER_BED) * (2.0 - r))
                    .round(),
                supply_costs: (mean(category::FINANCIAL, metric::SUPPLY_COSTS) * r).round(),
                is_anomaly: false,
            });
        }

        series
    }

    /// Current counts from each profile's multiplier for this month, and a
    /// history of six points five days apart around that count.
    pub fn case_counts(&mut self, baseline: &BaselineSnapshot) -> CaseCounts {
        let month = self.today.month();
        let mut counts = CaseCounts::default();

        for (disease, profile) in &baseline.seasonal_profiles {
            let factor = self.rng.gen_range(0.8..=1.2);
            let current = (profile.baseline_value * profile.multiplier_for(month) * factor) as u64;

            let history = (1..=6u64)
                .rev()
                .map(|step| {
                    let variation = self.rng.gen_range(0.8..=1.2);
                    CaseEntry {
                        date: self.days_ago(step * 5).format("%Y-%m-%d").to_string(),
                        cases: (current as f64 * variation).trunc(),
                    }
                })
                .collect();

            counts.current.insert(disease.clone(), current);
            counts.historical.insert(disease.clone(), history);
        }

        counts
    }

    /// Labeled training records for every category plus monthly case history
    /// for every profiled disease.
    ///
    /// Normal records are uniform within `±√3·σ` of the mean, which has
    /// standard deviation `σ`, so retraining on them keeps the ranges stable.
    /// Anomalous records sit 2.5 to 4 σ away on a random side.
    pub fn labeled_training(&mut self, baseline: &BaselineSnapshot) -> TrainingData {
        let dates = self.trailing_dates(TRAINING_DAYS);
        let mut data = TrainingData::default();

        for date in &dates {
            let is_anomaly = self.rng.gen_bool(TRAINING_ANOMALY_RATE);
            let mut v = |m: &str| self.labeled_value(baseline, category::RESOURCE, m, is_anomaly);
            data.resource.push(ResourceEntry {
                date: date.clone(),
                bed_occupancy: v(metric::BED_OCCUPANCY),
                staff_utilization: v(metric::STAFF_UTILIZATION),
                equipment_usage: v(metric::EQUIPMENT_USAGE),
                is_anomaly,
            });
        }

        for date in &dates {
            let is_anomaly = self.rng.gen_bool(TRAINING_ANOMALY_RATE);
            let mut v = |m: &str| self.labeled_value(baseline, category::PATIENT, m, is_anomaly);
            data.patient.push(PatientEntry {
                date: date.clone(),
                readmission_rate: v(metric::READMISSION_RATE),
                length_of_stay: v(metric::LENGTH_OF_STAY),
                medication_errors: v(metric::MEDICATION_ERRORS),
                is_anomaly,
            });
        }

        for date in &dates {
            let is_anomaly = self.rng.gen_bool(TRAINING_ANOMALY_RATE);
            let mut v = |m: &str| self.labeled_value(baseline, category::FINANCIAL, m, is_anomaly);
            data.financial.push(FinancialEntry {
                date: date.clone(),
                daily_expenses: v(metric::DAILY_EXPENSES),
                revenue_per_bed: v(metric::REVENUE_PER_BED),
                supply_costs: v(metric::SUPPLY_COSTS),
                is_anomaly,
            });
        }

        for (disease, profile) in &baseline.seasonal_profiles {
            let history = self.monthly_history(profile);
            data.diseases.insert(disease.clone(), history);
        }

        data
    }

    fn labeled_value(
        &mut self,
        baseline: &BaselineSnapshot,
        category: &str,
        metric: &str,
        is_anomaly: bool,
    ) -> f64 {
        let range = baseline.range(category, metric);
        let value = if is_anomaly {
            let side = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            range.mean + self.rng.gen_range(2.5..=4.0) * range.std * side
        } else {
            range.mean + self.rng.gen_range(-1.0..=1.0) * 3f64.sqrt() * range.std
        };
        round1(value.max(0.0))
    }

    /// Thirty-day steps over the last three years, scaled by season and by
    /// the profile's trend once per elapsed year.
    fn monthly_history(&mut self, profile: &SeasonalProfile) -> Vec<CaseEntry> {
        let start = self.days_ago(365 * 3);
        (0..TRAINING_MONTHS)
            .map(|offset| {
                let date = start
                    .checked_add_days(Days::new(30 * offset))
                    .unwrap_or(start);
                let year_factor = profile.year_trend.powi((offset / 12) as i32);
                let factor = self.rng.gen_range(0.8..=1.2);
                let cases = profile.baseline_value
                    * profile.multiplier_for(date.month())
                    * year_factor
                    * factor;
                CaseEntry {
                    date: date.format("%Y-%m-%d").to_string(),
                    cases: cases.trunc(),
                }
            })
            .collect()
    }
}

impl<R: Rng> std::fmt::Debug for SyntheticSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntheticSource")
            .field("today", &self.today)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn sample_groups_match_fixture() {
        assert_eq!(sample_beds().len(), 5);
        assert_eq!(sample_staff().len(), 4);
        assert_eq!(sample_equipment().len(), 6);
        assert_eq!(sample_beds()[0].group_name, "ICU");
        assert_eq!(sample_beds()[0].used_count, 22);
    }

    #[test]
    fn operational_series_spans_a_week() {
        let baseline = BaselineSnapshot::defaults();
        let series = SyntheticSource::seeded(1, as_of()).operational_series(&baseline);
        assert_eq!(series.resource.len(), 7);
        assert_eq!(series.patient.len(), 7);
        assert_eq!(series.financial.len(), 7);
        assert_eq!(series.resource[0].date, "2025-03-04");
        assert_eq!(series.resource[6].date, "2025-03-10");
        // Last three resource days are 15-25% above the 75% mean.
        assert!(series.resource[6].bed_occupancy >= 86.0);
        assert!(series.resource[0].bed_occupancy <= 82.6);
    }

    #[test]
    fn case_counts_cover_every_profile() {
        let baseline = BaselineSnapshot::defaults();
        let counts = SyntheticSource::seeded(2, as_of()).case_counts(&baseline);
        assert_eq!(counts.current.len(), baseline.seasonal_profiles.len());
        for history in counts.historical.values() {
            assert_eq!(history.len(), 6);
            assert_eq!(history[0].date, "2025-02-08");
            assert_eq!(history[5].date, "2025-03-05");
        }
    }

    #[test]
    fn labeled_training_shape() {
        let baseline = BaselineSnapshot::defaults();
        let data = SyntheticSource::seeded(3, as_of()).labeled_training(&baseline);
        assert_eq!(data.resource.len(), 60);
        assert_eq!(data.patient.len(), 60);
        assert_eq!(data.financial.len(), 60);
        assert_eq!(data.diseases.len(), baseline.seasonal_profiles.len());
        assert!(data.diseases.values().all(|h| h.len() == 36));

        let range = baseline.range(category::RESOURCE, metric::BED_OCCUPANCY);
        let limit = 3f64.sqrt() * range.std + 0.05;
        for entry in data.resource.iter().filter(|e| !e.is_anomaly) {
            assert!((entry.bed_occupancy - range.mean).abs() <= limit);
        }
        for entry in data.resource.iter().filter(|e| e.is_anomaly) {
            assert!((entry.bed_occupancy - range.mean).abs() >= 2.5 * range.std - 0.05);
        }
    }

    #[test]
    fn same_seed_same_data() {
        let baseline = BaselineSnapshot::defaults();
        let a = SyntheticSource::seeded(7, as_of()).labeled_training(&baseline);
        let b = SyntheticSource::seeded(7, as_of()).labeled_training(&baseline);
        assert_eq!(a, b);
    }
}
