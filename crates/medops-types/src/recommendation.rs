//! Recommendation records and the shared synthesizer that shapes them.
//!
//! Every engine turns a detected condition into the same record shape:
//!
//! ```text
//!   condition ──► RecommendationBuilder ──► Recommendation
//!                 (id, area, impact,        {id, resource, area, title, impact,
//!                  texts, checklist)          description, actionRequired, ...}
//! ```

use serde::{Deserialize, Serialize};

/// Expected impact of acting on a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Impact {
    High,
    Medium,
}

/// A structured, human-readable recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    /// `Beds`, `Staff`, `Equipment`, or `Outbreak`.
    pub resource: String,
    /// Group name, disease name, or a cross-cutting area such as `Scheduling`.
    pub area: String,
    pub title: String,
    pub impact: Impact,
    pub description: String,
    pub action_required: String,
    /// Action checklist (outbreak recommendations only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u32>,
}

impl Recommendation {
    pub fn builder(id: impl Into<String>) -> RecommendationBuilder {
        RecommendationBuilder::new(id)
    }
}

/// Builder for [`Recommendation`].
#[derive(Debug, Clone)]
pub struct RecommendationBuilder {
    rec: Recommendation,
}

impl RecommendationBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            rec: Recommendation {
                id: id.into(),
                resource: String::new(),
                area: String::new(),
                title: String::new(),
                impact: Impact::Medium,
                description: String::new(),
                action_required: String::new(),
                actions: Vec::new(),
                confidence: None,
            },
        }
    }

    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.rec.resource = resource.into();
        self
    }

    pub fn area(mut self, area: impl Into<String>) -> Self {
        self.rec.area = area.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.rec.title = title.into();
        self
    }

    pub fn impact(mut self, impact: Impact) -> Self {
        self.rec.impact = impact;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.rec.description = description.into();
        self
    }

    pub fn action_required(mut self, action: impl Into<String>) -> Self {
        self.rec.action_required = action.into();
        self
    }

    /// Set the checklist. `action_required` defaults to the first item when unset.
    pub fn actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rec.actions = actions.into_iter().map(Into::into).collect();
        self
    }

    pub fn confidence(mut self, confidence: u32) -> Self {
        self.rec.confidence = Some(confidence);
        self
    }

    pub fn build(mut self) -> Recommendation {
        if self.rec.action_required.is_empty() {
            if let Some(first) = self.rec.actions.first() {
                self.rec.action_required = first.clone();
            }
        }
        self.rec
    }
}

/// Lowercase a group name and replace spaces with `-` for use in ids (`X-ray` → `x-ray`).
pub fn slug(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "-")
}
