//! Selectors choosing which resource type or anomaly category to analyze.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::anomaly::AnomalyCategory;
use crate::error::TypesError;
use crate::resource::ResourceKind;

/// Optimizer scope: everything, one resource type, or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceScope {
    #[default]
    All,
    Beds,
    Staff,
    Equipment,
    /// Every type gets the placeholder summary.
    None,
}

impl ResourceScope {
    pub fn includes(&self, kind: ResourceKind) -> bool {
        matches!(
            (self, kind),
            (Self::All, _)
                | (Self::Beds, ResourceKind::Beds)
                | (Self::Staff, ResourceKind::Staff)
                | (Self::Equipment, ResourceKind::Equipment)
        )
    }
}

impl FromStr for ResourceScope {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "beds" | "bed" => Ok(Self::Beds),
            "staff" => Ok(Self::Staff),
            "equipment" => Ok(Self::Equipment),
            "none" => Ok(Self::None),
            other => Err(TypesError::UnknownResourceScope(other.to_string())),
        }
    }
}

/// Anomaly scope: everything, one category, or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyScope {
    #[default]
    All,
    Resource,
    Patient,
    Financial,
    /// Every category is omitted.
    None,
}

impl AnomalyScope {
    pub fn includes(&self, category: AnomalyCategory) -> bool {
        matches!(
            (self, category),
            (Self::All, _)
                | (Self::Resource, AnomalyCategory::Resource)
                | (Self::Patient, AnomalyCategory::Patient)
                | (Self::Financial, AnomalyCategory::Financial)
        )
    }
}

impl FromStr for AnomalyScope {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "resource" | "resources" => Ok(Self::Resource),
            "patient" | "patients" => Ok(Self::Patient),
            "financial" | "finance" => Ok(Self::Financial),
            "none" => Ok(Self::None),
            other => Err(TypesError::UnknownAnomalyScope(other.to_string())),
        }
    }
}
