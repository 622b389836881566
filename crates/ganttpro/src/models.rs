//! Type definitions for import requests and GanttPro entities.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ImportError, RemoteError};

// =========================================================================
// Input
// =========================================================================

/// One entry of the work breakdown, either a section or a leaf task.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Task or section name.
    pub name: String,
    /// Effort estimate in hours. Absent means zero.
    #[serde(default)]
    pub hours: Option<f64>,
    /// Whether this entry groups other tasks.
    #[serde(default)]
    pub is_section: bool,
    /// Name of a section declared earlier in the list.
    #[serde(default)]
    pub parent_section: Option<String>,
}

impl Task {
    /// Leaf task with an hour estimate.
    pub fn leaf(name: impl Into<String>, hours: f64) -> Self {
        Self {
            name: name.into(),
            hours: Some(hours),
            ..Self::default()
        }
    }

    /// Grouping section.
    pub fn section(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_section: true,
            ..Self::default()
        }
    }

    /// Attach this task to a named section.
    #[must_use]
    pub fn under(mut self, section: impl Into<String>) -> Self {
        self.parent_section = Some(section.into());
        self
    }

    /// Effort estimate, treating an absent value as zero.
    #[must_use]
    pub fn hours(&self) -> f64 {
        self.hours.unwrap_or(0.0)
    }
}

/// A project name plus its ordered task list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub project_name: String,
    pub tasks: Vec<Task>,
}

impl ImportRequest {
    /// Reject requests the importer must never see.
    pub fn validate(&self) -> Result<(), ImportError> {
        if self.project_name.trim().is_empty() {
            return Err(ImportError::Validation(
                "projectName must not be empty".to_string(),
            ));
        }
        if self.tasks.is_empty() {
            return Err(ImportError::Validation(
                "tasks must not be empty".to_string(),
            ));
        }
        for (index, task) in self.tasks.iter().enumerate() {
            if task.name.trim().is_empty() {
                return Err(ImportError::Validation(format!(
                    "tasks[{index}].name must not be empty"
                )));
            }
            let hours = task.hours();
            if !hours.is_finite() || hours < 0.0 {
                return Err(ImportError::Validation(format!(
                    "tasks[{index}].hours must be a non-negative number"
                )));
            }
        }
        Ok(())
    }
}

// =========================================================================
// Remote entities
// =========================================================================

/// Identifier assigned by GanttPro. Keeps the JSON type it arrived with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemoteId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for RemoteId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<u64> for RemoteId {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

/// A project created for the duration of one import.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteProject {
    pub id: RemoteId,
    /// Payload the identifier was extracted from.
    pub raw: serde_json::Value,
}

/// Task kind marker understood by GanttPro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    /// Container type used for sections.
    #[serde(rename = "project")]
    Group,
}

/// Body of `POST /tasks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskSpec {
    pub project_id: RemoteId,
    pub name: String,
    /// Duration in minutes.
    pub duration: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<RemoteId>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TaskKind>,
}

// =========================================================================
// Outcomes
// =========================================================================

/// Why a task was never submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// Leaf task with a zero hour estimate.
    ZeroEffort,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroEffort => write!(f, "zero-effort"),
        }
    }
}

/// What happened to one task of the import.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum TaskOutcome {
    /// Accepted by GanttPro. The id is absent when none could be extracted.
    Created { id: Option<RemoteId> },
    Skipped { reason: SkipReason },
    Failed { error: RemoteError },
}

impl TaskOutcome {
    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Outcome paired with the task it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResult {
    pub name: String,
    #[serde(flatten)]
    pub outcome: TaskOutcome,
}
