//! Request documents read by each subcommand.
//!
//! Field names follow the request bodies of the service this binary stands
//! in for (`bedsData`, `detectionType`, `predictionDays`, ...), with short
//! aliases. A missing section is filled from the synthetic source.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use medops_engine::TrainingData;
use medops_types::lenient::value_to_count;
use medops_types::{CaseEntry, FinancialEntry, PatientEntry, ResourceEntry, ResourceSnapshot};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    #[serde(default, alias = "beds", alias = "beds_data")]
    pub beds_data: Option<Vec<ResourceSnapshot>>,
    #[serde(default, alias = "staff", alias = "staff_data")]
    pub staff_data: Option<Vec<ResourceSnapshot>>,
    #[serde(default, alias = "equipment", alias = "equipment_data")]
    pub equipment_data: Option<Vec<ResourceSnapshot>>,
    #[serde(default, alias = "resource_type", alias = "scope")]
    pub resource_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectRequest {
    #[serde(default, alias = "resource", alias = "resource_data")]
    pub resource_data: Option<Vec<ResourceEntry>>,
    #[serde(default, alias = "patient", alias = "patient_data")]
    pub patient_data: Option<Vec<PatientEntry>>,
    #[serde(default, alias = "financial", alias = "financial_data")]
    pub financial_data: Option<Vec<FinancialEntry>>,
    #[serde(default, alias = "detection_type", alias = "scope")]
    pub detection_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    #[serde(default, alias = "historical", alias = "historical_data")]
    pub historical_data: Option<BTreeMap<String, Vec<CaseEntry>>>,
    /// Counts per disease; numbers or numeric strings.
    #[serde(default, alias = "current", alias = "current_data")]
    pub current_data: Option<BTreeMap<String, Value>>,
    #[serde(default, alias = "prediction_days", alias = "horizon_days")]
    pub prediction_days: Option<u32>,
    #[serde(default, alias = "as_of")]
    pub as_of: Option<DateTime<Utc>>,
}

impl PredictRequest {
    /// True when neither history nor current counts were supplied.
    pub fn is_empty(&self) -> bool {
        self.historical_data.as_ref().map_or(true, BTreeMap::is_empty)
            && self.current_data.as_ref().map_or(true, BTreeMap::is_empty)
    }

    pub fn current_counts(&self) -> BTreeMap<String, u64> {
        self.current_data
            .iter()
            .flatten()
            .map(|(disease, value)| (disease.clone(), value_to_count(value)))
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainRequest {
    #[serde(default, alias = "training_data")]
    pub training_data: Option<TrainingData>,
}

/// Parse a request, treating blank input as `{}`.
pub fn parse<T>(raw: &str) -> serde_json::Result<T>
where
    T: for<'de> Deserialize<'de> + Default,
{
    if raw.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(raw)
}
