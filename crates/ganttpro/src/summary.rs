//! Import summary returned to callers.

use serde::Serialize;

use crate::models::{RemoteId, TaskOutcome};

/// Result document for a completed import.
///
/// `success` is true whenever the project was created, even if some tasks
/// failed. Callers detect partial imports by comparing `tasks_created` with
/// the number of tasks they sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub success: bool,
    pub project_id: RemoteId,
    pub tasks_created: usize,
    pub tasks_failed: usize,
    pub tasks_skipped: usize,
    pub message: String,
}

impl ImportSummary {
    pub fn from_outcomes<'a>(
        project_name: &str,
        project_id: RemoteId,
        outcomes: impl IntoIterator<Item = &'a TaskOutcome>,
    ) -> Self {
        let (mut created, mut failed, mut skipped) = (0, 0, 0);
        for outcome in outcomes {
            match outcome {
                TaskOutcome::Created { .. } => created += 1,
                TaskOutcome::Failed { .. } => failed += 1,
                TaskOutcome::Skipped { .. } => skipped += 1,
            }
        }

        Self {
            success: true,
            project_id,
            tasks_created: created,
            tasks_failed: failed,
            tasks_skipped: skipped,
            message: format!("Project \"{project_name}\" created with {created} tasks"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteError;
    use crate::models::SkipReason;
    use serde_json::json;

    #[test]
    fn test_counts_and_message() {
        let outcomes = [
            TaskOutcome::Created {
                id: Some(RemoteId::from(1)),
            },
            TaskOutcome::Created { id: None },
            TaskOutcome::Failed {
                error: RemoteError::status(500, "boom"),
            },
            TaskOutcome::Skipped {
                reason: SkipReason::ZeroEffort,
            },
        ];

        let summary = ImportSummary::from_outcomes("Site Launch", RemoteId::from(9), &outcomes);

        assert!(summary.success);
        assert_eq!(summary.tasks_created, 2);
        assert_eq!(summary.tasks_failed, 1);
        assert_eq!(summary.tasks_skipped, 1);
        assert_eq!(summary.message, "Project \"Site Launch\" created with 2 tasks");
    }

    #[test]
    fn test_all_failed_is_still_success() {
        let outcomes = [TaskOutcome::Failed {
            error: RemoteError::transport("timeout"),
        }];
        let summary = ImportSummary::from_outcomes("P", RemoteId::from("p"), &outcomes);
        assert!(summary.success);
        assert_eq!(summary.tasks_created, 0);
    }

    #[test]
    fn test_serialized_shape() {
        let summary = ImportSummary::from_outcomes("P", RemoteId::from("abc"), std::iter::empty());
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({
                "success": true,
                "projectId": "abc",
                "tasksCreated": 0,
                "tasksFailed": 0,
                "tasksSkipped": 0,
                "message": "Project \"P\" created with 0 tasks"
            })
        );
    }
}
