//! The outbreak predictor: scores every known disease and builds the report.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use medops_baseline::{BaselineSnapshot, SeasonalProfile};
use medops_types::{date_only, CaseEntry, Prediction, Recommendation, RiskLevel, TrendPoint};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::jitter::{Jitter, JitterMode};
use crate::recommend::recommendations;
use crate::risk::{change_percentage, classify, rank, ConfidenceBands};
use crate::strategy::ForecastStrategy;
use crate::trend::monthly_trend;

// ── Configuration ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutbreakConfig {
    /// Horizon used when the caller does not supply one.
    pub default_horizon_days: u32,
    pub confidence: ConfidenceBands,
}

impl Default for OutbreakConfig {
    fn default() -> Self {
        Self {
            default_horizon_days: 30,
            confidence: ConfidenceBands::default(),
        }
    }
}

// ── Report ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutbreakReport {
    /// Ranked: High before Medium before Low, then by descending change.
    pub predictions: Vec<Prediction>,
    pub highest_risk_disease: Option<Prediction>,
    pub monthly_trend: Vec<TrendPoint>,
    pub recommendations: Vec<Recommendation>,
    pub analysis_date: DateTime<Utc>,
}

// ── Predictor ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct OutbreakPredictor {
    config: OutbreakConfig,
    jitter: JitterMode,
}

impl OutbreakPredictor {
    pub fn new(config: OutbreakConfig, jitter: JitterMode) -> Self {
        Self { config, jitter }
    }

    pub fn config(&self) -> &OutbreakConfig {
        &self.config
    }

    pub fn jitter_mode(&self) -> JitterMode {
        self.jitter
    }

    /// Score every profiled or mentioned disease and build the report.
    ///
    /// The jitter source is created fresh for each call, so a seeded or
    /// disabled mode gives identical reports for identical inputs.
    pub fn predict(
        &self,
        baseline: &BaselineSnapshot,
        historical: &BTreeMap<String, Vec<CaseEntry>>,
        current: &BTreeMap<String, u64>,
        horizon_days: u32,
        as_of: DateTime<Utc>,
    ) -> OutbreakReport {
        let mut jitter = Jitter::new(self.jitter);
        let today = as_of.date_naive();
        let target = today
            .checked_add_days(Days::new(u64::from(horizon_days)))
            .unwrap_or(today);

        let diseases: BTreeSet<&str> = baseline
            .seasonal_profiles
            .keys()
            .chain(current.keys())
            .chain(historical.keys())
            .map(String::as_str)
            .collect();

        let mut predictions = Vec::with_capacity(diseases.len());
        let mut highest: Option<Prediction> = None;
        let mut highest_score = 0.0;

        for disease in diseases {
            let prediction = self.score(baseline, disease, historical, current, target, &mut jitter);
            debug!(
                disease,
                risk = %prediction.risk_level,
                current = prediction.current_cases,
                predicted = prediction.predicted_cases,
                change = prediction.change_percentage,
                "disease scored"
            );

            let score = prediction.risk_score();
            if prediction.risk_level == RiskLevel::High && score > highest_score {
                highest_score = score;
                highest = Some(prediction.clone());
            }
            predictions.push(prediction);
        }

        rank(&mut predictions);
        let highest = highest.or_else(|| predictions.first().cloned());

        let (monthly_trend, recommendations) = match &highest {
            Some(top) => {
                let profile = baseline
                    .profile(&top.disease)
                    .cloned()
                    .unwrap_or_else(|| SeasonalProfile::neutral(top.current_cases as f64));
                (
                    monthly_trend(&profile, today.month(), &mut jitter),
                    recommendations(top, horizon_days),
                )
            }
            None => (Vec::new(), Vec::new()),
        };

        info!(
            diseases = predictions.len(),
            highest = highest.as_ref().map(|p| p.disease.as_str()).unwrap_or("none"),
            horizon_days,
            "outbreak prediction complete"
        );

        OutbreakReport {
            predictions,
            highest_risk_disease: highest,
            monthly_trend,
            recommendations,
            analysis_date: as_of,
        }
    }

    fn score(
        &self,
        baseline: &BaselineSnapshot,
        disease: &str,
        historical: &BTreeMap<String, Vec<CaseEntry>>,
        current: &BTreeMap<String, u64>,
        target: NaiveDate,
        jitter: &mut Jitter,
    ) -> Prediction {
        let current_cases = current
            .get(disease)
            .copied()
            .or_else(|| historical.get(disease).and_then(|s| latest_count(s)))
            .or_else(|| baseline.profile(disease).map(|p| p.baseline_value.max(0.0) as u64))
            .unwrap_or(1)
            .max(1);

        let strategy = ForecastStrategy::select(baseline, disease, current_cases);
        let predicted = strategy.forecast(current_cases, target, jitter);
        let change = change_percentage(current_cases, predicted);
        let risk = classify(change, predicted);
        let confidence = self.config.confidence.confidence(risk, jitter);

        Prediction {
            disease: disease.to_string(),
            risk_level: risk,
            current_cases,
            predicted_cases: predicted,
            change_percentage: change,
            confidence,
        }
    }
}

/// Case count of the most recent entry in a series.
fn latest_count(series: &[CaseEntry]) -> Option<u64> {
    series
        .iter()
        .max_by(|a, b| date_only(&a.date).cmp(date_only(&b.date)))
        .map(|e| e.cases.max(0.0) as u64)
}
