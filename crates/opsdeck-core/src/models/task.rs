use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::remote::Document;

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl std::str::FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_value(Value::String(raw.to_string()))?)
    }
}

impl std::str::FromStr for TaskPriority {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_value(Value::String(raw.to_string()))?)
    }
}

/// A task as mirrored locally. `parent_task_id` enables a one-level
/// parent/child relation; it is not validated against existing ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "$id", default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub parent_task_id: Option<String>,
    #[serde(default)]
    pub assigned_to: Vec<String>,
    #[serde(default)]
    pub completed: bool,
    /// Owning project id.
    #[serde(default)]
    pub project: String,
    /// Calendar date, `YYYY-MM-DD`.
    #[serde(default)]
    pub due_date: String,
}

impl Task {
    /// Normalize a raw remote document. Extra remote fields are dropped;
    /// absent fields stay unset.
    pub fn from_document(document: &Document) -> Result<Self, CoreError> {
        Ok(serde_json::from_value(serde_json::to_value(document)?)?)
    }

    /// Truncate the due date to calendar-date granularity.
    pub fn normalize_due_date(&mut self) {
        self.due_date = truncate_to_date(&self.due_date);
    }
}

/// `2024-05-01T10:30:00.000+00:00` -> `2024-05-01`. Values that do not start
/// with a parseable date pass through untouched.
pub(crate) fn truncate_to_date(raw: &str) -> String {
    let prefix = raw.get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Payload for task creation. Carries the full attribute set; the id is
/// always backend-assigned.
#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub parent_task_id: Option<String>,
    pub assigned_to: Vec<String>,
    pub completed: bool,
    pub project: String,
    pub due_date: String,
}

impl NewTask {
    pub fn new(title: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            parent_task_id: None,
            assigned_to: Vec::new(),
            completed: false,
            project: project.into(),
            due_date: String::new(),
        }
    }

    pub fn fields(&self) -> Map<String, Value> {
        super::to_fields(self)
    }
}

/// Mutable fields accepted by a task update. Fields outside this set
/// (notably `project` and anything derived) cannot be expressed, so they
/// never reach the remote store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    /// `Some(None)` clears the parent reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_task_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn fields(&self) -> Map<String, Value> {
        super::to_fields(self)
    }
}
