use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::remote::Document;

/// Derived per-project task statistics. Computed on read, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total_tasks: u32,
    pub completed_tasks: u32,
    /// Percentage, possibly fractional. Exactly 0 for an empty task list.
    pub progress: f64,
}

impl ProjectStats {
    pub fn from_counts(total_tasks: u32, completed_tasks: u32) -> Self {
        let progress = if total_tasks == 0 {
            0.0
        } else {
            f64::from(completed_tasks) / f64::from(total_tasks) * 100.0
        };
        Self {
            total_tasks,
            completed_tasks,
            progress,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "$id", default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub start_date: String,
    /// Wire name is capitalized, unlike every other attribute. Kept as a
    /// rename; see DESIGN.md before changing the remote schema.
    #[serde(rename = "Budget", default)]
    pub budget: f64,
    #[serde(default)]
    pub status: String,
    /// Always zeroed on normalize; the aggregation step fills it in.
    #[serde(skip_deserializing, default)]
    pub stats: ProjectStats,
}

impl Project {
    pub fn from_document(document: &Document) -> Result<Self, CoreError> {
        Ok(serde_json::from_value(serde_json::to_value(document)?)?)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewProject {
    pub title: String,
    pub category: String,
    pub description: String,
    pub due_date: String,
    pub start_date: String,
    #[serde(rename = "Budget")]
    pub budget: f64,
    pub status: String,
}

impl NewProject {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: String::new(),
            description: String::new(),
            due_date: String::new(),
            start_date: String::new(),
            budget: 0.0,
            status: String::new(),
        }
    }

    pub fn fields(&self) -> Map<String, Value> {
        super::to_fields(self)
    }
}

/// Mutable fields accepted by a project update. `stats` is not expressible
/// here, so the derived record can never leak to the remote store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(rename = "Budget", skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ProjectPatch {
    pub fn fields(&self) -> Map<String, Value> {
        super::to_fields(self)
    }
}
