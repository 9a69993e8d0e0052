//! Time-series entries supplied by the fetch layer.
//!
//! Entries are kept in caller order, which is treated as chronological.
//! `date` is the caller's ISO-8601 date or date-time string, untouched.
//! `is_anomaly` is only meaningful in training data.

use serde::{Deserialize, Serialize};

use crate::lenient::{bool_or_false, f64_or_zero, string_or_empty};

/// Strip the time portion from an ISO-8601 date-time (`2024-01-02T08:00` → `2024-01-02`).
pub fn date_only(date: &str) -> &str {
    match date.split_once('T') {
        Some((day, _)) => day,
        None => date,
    }
}

/// Daily resource utilization percentages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceEntry {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub date: String,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub bed_occupancy: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub staff_utilization: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub equipment_usage: f64,
    #[serde(default, deserialize_with = "bool_or_false", skip_serializing_if = "is_false")]
    pub is_anomaly: bool,
}

/// Daily patient-care indicators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientEntry {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub date: String,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub readmission_rate: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub length_of_stay: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub medication_errors: f64,
    #[serde(default, deserialize_with = "bool_or_false", skip_serializing_if = "is_false")]
    pub is_anomaly: bool,
}

/// Daily financial figures, in currency units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialEntry {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub date: String,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub daily_expenses: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub revenue_per_bed: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub supply_costs: f64,
    #[serde(default, deserialize_with = "bool_or_false", skip_serializing_if = "is_false")]
    pub is_anomaly: bool,
}

/// One disease case count observation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseEntry {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub date: String,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub cases: f64,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}
