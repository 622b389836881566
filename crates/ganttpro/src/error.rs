//! Error types for GanttPro imports.

use serde::Serialize;
use thiserror::Error;

/// A failed call against the GanttPro API.
///
/// Transport faults carry no status. Non-success responses carry the status
/// code and the response body. A payload without a recognizable identifier
/// carries the raw payload as its body.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct RemoteError {
    /// HTTP status returned by the remote service, if a response arrived.
    pub status: Option<u16>,
    /// Raw response body, if any.
    pub body: Option<String>,
    /// Human readable description.
    pub message: String,
}

impl RemoteError {
    /// Error for a request that never produced a response.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            body: None,
            message: message.into(),
        }
    }

    /// Error for a non-success HTTP response.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            body: Some(body.into()),
            message: format!("GanttPro API returned error status {status}"),
        }
    }

    /// Error for a successful response whose body could not be used.
    pub fn payload(status: u16, body: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            body: Some(body.into()),
            message: message.into(),
        }
    }

    /// Whether the remote service answered but no identifier could be found.
    #[must_use]
    pub fn is_missing_id(&self) -> bool {
        self.status.is_some_and(|s| (200..300).contains(&s))
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            status: err.status().map(|s| s.as_u16()),
            body: None,
            message: format!("HTTP request failed: {err}"),
        }
    }
}

/// Fatal import failures. Per-task failures never surface here.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The request was missing fields or carried malformed values.
    #[error("Invalid request data: {0}")]
    Validation(String),

    /// No credential is available, so no remote call can be made.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The project could not be created; no tasks were attempted.
    #[error("Failed to create project: {0}")]
    ProjectCreation(#[source] RemoteError),
}
