//! Subcommand execution: request document in, report document out.

use std::str::FromStr;

use anyhow::Context;
use chrono::{DateTime, Utc};
use medops_engine::{sample_beds, sample_equipment, sample_staff, AnalyticsEngine, SyntheticSource};
use medops_types::{AnomalyScope, ResourceScope};
use rand::Rng;
use serde_json::Value;
use tracing::{debug, warn};

use crate::input::{self, DetectRequest, OptimizeRequest, PredictRequest, TrainRequest};

/// Which analysis to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::Subcommand)]
pub enum Command {
    /// Recommend bed, staff, and equipment reallocations
    Optimize,
    /// Flag operational metrics outside their normal range
    Detect,
    /// Forecast disease case counts and outbreak risk
    Predict,
    /// Retrain normal ranges and forecast models
    Train,
    /// Print the baseline snapshot in effect
    Baseline,
}

impl Command {
    /// The `message` of the error payload when this command fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Optimize => "Failed to optimize resources",
            Self::Detect => "Failed to detect anomalies",
            Self::Predict => "Failed to predict disease outbreak",
            Self::Train => "Failed to train models",
            Self::Baseline => "Failed to load baseline",
        }
    }
}

/// Run `command` against `raw` request JSON.
pub fn execute<R: Rng>(
    command: Command,
    engine: &AnalyticsEngine,
    raw: &str,
    synthetic: &mut SyntheticSource<R>,
    now: DateTime<Utc>,
) -> anyhow::Result<Value> {
    let output = match command {
        Command::Optimize => {
            let req: OptimizeRequest = input::parse(raw).context("invalid optimize request")?;
            optimize(engine, req)?
        }
        Command::Detect => {
            let req: DetectRequest = input::parse(raw).context("invalid detect request")?;
            detect(engine, req, synthetic, now)?
        }
        Command::Predict => {
            let req: PredictRequest = input::parse(raw).context("invalid predict request")?;
            predict(engine, req, synthetic, now)?
        }
        Command::Train => {
            let req: TrainRequest = input::parse(raw).context("invalid train request")?;
            let status = engine.train(req.training_data).context("training failed")?;
            serde_json::to_value(status)?
        }
        Command::Baseline => serde_json::to_value(&*engine.baseline())?,
    };
    Ok(output)
}

/// Parse a selector; an unrecognized one selects nothing rather than failing.
fn scope_or_none<S>(raw: Option<&str>, none: S) -> S
where
    S: FromStr + Default,
    S::Err: std::fmt::Display,
{
    match raw {
        None => S::default(),
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!(selector = raw, error = %e, "unrecognized scope, selecting nothing");
            none
        }),
    }
}

fn optimize(engine: &AnalyticsEngine, req: OptimizeRequest) -> anyhow::Result<Value> {
    let scope = scope_or_none(req.resource_type.as_deref(), ResourceScope::None);
    let beds = req.beds_data.unwrap_or_else(sample_beds);
    let staff = req.staff_data.unwrap_or_else(sample_staff);
    let equipment = req.equipment_data.unwrap_or_else(sample_equipment);
    debug!(
        beds = beds.len(),
        staff = staff.len(),
        equipment = equipment.len(),
        "optimizing"
    );
    let report = engine.optimize(&beds, &staff, &equipment, scope);
    Ok(serde_json::to_value(report)?)
}

fn detect<R: Rng>(
    engine: &AnalyticsEngine,
    req: DetectRequest,
    synthetic: &mut SyntheticSource<R>,
    now: DateTime<Utc>,
) -> anyhow::Result<Value> {
    let scope = scope_or_none(req.detection_type.as_deref(), AnomalyScope::None);

    let supplied = req.resource_data.is_some() || req.patient_data.is_some() || req.financial_data.is_some();
    let (resource, patient, financial) = if supplied {
        (
            req.resource_data.unwrap_or_default(),
            req.patient_data.unwrap_or_default(),
            req.financial_data.unwrap_or_default(),
        )
    } else {
        debug!("no series supplied, using synthetic week");
        let series = synthetic.operational_series(&engine.baseline());
        (series.resource, series.patient, series.financial)
    };

    let report = engine.detect_at(&resource, &patient, &financial, scope, now);
    Ok(serde_json::to_value(report)?)
}

fn predict<R: Rng>(
    engine: &AnalyticsEngine,
    req: PredictRequest,
    synthetic: &mut SyntheticSource<R>,
    now: DateTime<Utc>,
) -> anyhow::Result<Value> {
    let as_of = req.as_of.unwrap_or(now);
    let (historical, current) = if req.is_empty() {
        debug!("no case data supplied, using synthetic counts");
        let counts = synthetic.case_counts(&engine.baseline());
        (counts.historical, counts.current)
    } else {
        let current = req.current_counts();
        (req.historical_data.unwrap_or_default(), current)
    };

    let report = engine.predict(&historical, &current, req.prediction_days, as_of);
    Ok(serde_json::to_value(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use medops_engine::EngineConfig;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 20, 0, 0, 0).unwrap()
    }

    fn run(command: Command, raw: &str) -> anyhow::Result<Value> {
        let engine = AnalyticsEngine::in_memory(EngineConfig::default()).unwrap();
        let mut synthetic = SyntheticSource::seeded(1, now());
        execute(command, &engine, raw, &mut synthetic, now())
    }

    #[test]
    fn optimize_with_supplied_beds() {
        let out = run(
            Command::Optimize,
            r#"{"bedsData": [{"ward": "ICU", "total": 20, "occupied": 19}], "resourceType": "beds"}"#,
        )
        .unwrap();
        assert_eq!(out["resources"]["beds"]["optimal"], 22);
        assert_eq!(out["resources"]["staff"]["utilizationImprovement"], "0%");
        assert_eq!(out["recommendations"][0]["id"], "bed-icu");
    }

    #[test]
    fn optimize_falls_back_to_samples() {
        let out = run(Command::Optimize, "").unwrap();
        assert_eq!(out["resources"]["beds"]["chartData"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn unknown_scope_selects_nothing() {
        let out = run(
            Command::Optimize,
            r#"{"bedsData": [{"ward": "ICU", "total": 20, "occupied": 19}], "resourceType": "rooms"}"#,
        )
        .unwrap();
        assert_eq!(out["resources"]["beds"]["current"], 0);
        assert_eq!(out["resources"]["beds"]["utilizationImprovement"], "0%");
        assert!(out["recommendations"].as_array().unwrap().is_empty());

        let out = run(
            Command::Detect,
            r#"{"resourceData": [{"date": "2025-01-02", "bed_occupancy": 98}], "detectionType": "weather"}"#,
        )
        .unwrap();
        assert_eq!(out["totalAnomalies"], 0);
        assert!(out["categories"].as_object().unwrap().is_empty());
    }

    #[test]
    fn detect_with_one_section_leaves_others_empty() {
        let out = run(
            Command::Detect,
            r#"{"resourceData": [{"date": "2025-01-02", "bed_occupancy": 98, "staff_utilization": 80, "equipment_usage": 65}]}"#,
        )
        .unwrap();
        assert_eq!(out["totalAnomalies"], 1);
        assert_eq!(out["categories"]["resource"]["anomalies"][0]["severity"], "critical");
        assert!(out["categories"].get("patient").is_none());
        assert!(out["detectionDate"].as_str().unwrap().starts_with("2024-12-20"));
    }

    #[test]
    fn predict_reports_analysis_date() {
        let out = run(Command::Predict, r#"{"currentData": {"Influenza": 20}, "predictionDays": 30}"#)
            .unwrap();
        assert_eq!(out["highestRiskDisease"]["disease"], "Influenza");
        assert_eq!(out["monthlyTrend"].as_array().unwrap().len(), 18);
        assert!(out["analysisDate"].as_str().unwrap().starts_with("2024-12-20"));
    }

    #[test]
    fn train_and_baseline() {
        let engine = AnalyticsEngine::in_memory(EngineConfig::default()).unwrap();
        let mut synthetic = SyntheticSource::seeded(1, now());
        let status = execute(Command::Train, &engine, "{}", &mut synthetic, now()).unwrap();
        assert_eq!(status["status"], "success");
        assert_eq!(status["syntheticData"], true);

        let baseline = execute(Command::Baseline, &engine, "", &mut synthetic, now()).unwrap();
        assert_eq!(baseline["version"], 1);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = run(Command::Train, "{not json").unwrap_err();
        assert!(format!("{err:#}").contains("invalid train request"));
        assert_eq!(Command::Train.failure_message(), "Failed to train models");
    }
}
