//! Hierarchy import into GanttPro.
//!
//! The importer creates the project, then walks the task list once, in
//! order, awaiting each task before the next. Section ids are recorded in a
//! [`SectionRegistry`] owned by the import, so a task can only be attached
//! to a section that appears earlier in the list. Per-task failures are
//! captured as [`TaskOutcome::Failed`] and never stop the pass.

use tracing::{debug, error, info, warn};

use crate::client::RemoteClient;
use crate::error::ImportError;
use crate::models::{
    CreateTaskSpec, ImportRequest, RemoteId, RemoteProject, SkipReason, Task, TaskKind,
    TaskOutcome, TaskResult,
};
use crate::normalize;
use crate::registry::SectionRegistry;
use crate::summary::ImportSummary;

/// Minimum duration in minutes for a submitted leaf task.
pub const MIN_LEAF_DURATION: u64 = 1;

/// Everything one import produced.
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub project: RemoteProject,
    /// One entry per input task, in input order.
    pub results: Vec<TaskResult>,
}

impl ImportReport {
    /// Fold the task outcomes into a summary.
    #[must_use]
    pub fn summary(&self, project_name: &str) -> ImportSummary {
        ImportSummary::from_outcomes(
            project_name,
            self.project.id.clone(),
            self.results.iter().map(|r| &r.outcome),
        )
    }
}

/// Drives a [`RemoteClient`] through one import.
pub struct HierarchyImporter<'a> {
    client: &'a dyn RemoteClient,
}

impl<'a> HierarchyImporter<'a> {
    #[must_use]
    pub fn new(client: &'a dyn RemoteClient) -> Self {
        Self { client }
    }

    /// Import a validated request.
    ///
    /// Fails only when the project cannot be created, in which case no task
    /// is attempted. Remote state created before a cancellation is left as is.
    pub async fn run(&self, request: &ImportRequest) -> Result<ImportReport, ImportError> {
        info!(
            project_name = %request.project_name,
            task_count = request.tasks.len(),
            "Starting import"
        );

        let project = self
            .client
            .create_project(&request.project_name)
            .await
            .map_err(|e| {
                error!(
                    project_name = %request.project_name,
                    status = ?e.status,
                    error = %e,
                    "Failed to create project"
                );
                ImportError::ProjectCreation(e)
            })?;

        info!(project_id = %project.id, "Project created");

        let mut registry = SectionRegistry::new();
        let mut results = Vec::with_capacity(request.tasks.len());

        for task in &request.tasks {
            let outcome = self.import_task(&project.id, task, &mut registry).await;
            results.push(TaskResult {
                name: task.name.clone(),
                outcome,
            });
        }

        info!(
            project_id = %project.id,
            sections = registry.len(),
            created = results.iter().filter(|r| r.outcome.is_created()).count(),
            failed = results.iter().filter(|r| r.outcome.is_failed()).count(),
            skipped = results.iter().filter(|r| r.outcome.is_skipped()).count(),
            "Import finished"
        );

        Ok(ImportReport { project, results })
    }

    async fn import_task(
        &self,
        project_id: &RemoteId,
        task: &Task,
        registry: &mut SectionRegistry,
    ) -> TaskOutcome {
        if !task.is_section && task.hours() <= 0.0 {
            debug!(task = %task.name, "Skipping zero-effort task");
            return TaskOutcome::Skipped {
                reason: SkipReason::ZeroEffort,
            };
        }

        let spec = build_task_spec(project_id, task, registry);

        let payload = match self.client.create_task(&spec).await {
            Ok(payload) => payload,
            Err(error) => {
                warn!(
                    task = %task.name,
                    status = ?error.status,
                    error = %error,
                    "Failed to create task"
                );
                return TaskOutcome::Failed { error };
            }
        };

        let id = normalize::task_id(&payload);

        if task.is_section {
            match &id {
                Some(id) => {
                    if !registry.register(&task.name, id.clone()) {
                        warn!(section = %task.name, "Duplicate section name, keeping first id");
                    }
                }
                None => {
                    warn!(
                        section = %task.name,
                        "No section ID returned, children will be created top-level"
                    );
                }
            }
        }

        debug!(task = %task.name, id = ?id, "Created task");
        TaskOutcome::Created { id }
    }
}

/// Build the outgoing spec for a task that will be submitted.
#[must_use]
pub fn build_task_spec(
    project_id: &RemoteId,
    task: &Task,
    registry: &SectionRegistry,
) -> CreateTaskSpec {
    let parent = task.parent_section.as_deref().and_then(|section| {
        let resolved = registry.resolve(section).cloned();
        if resolved.is_none() {
            debug!(
                task = %task.name,
                section = %section,
                "Parent section not registered, creating top-level"
            );
        }
        resolved
    });

    CreateTaskSpec {
        project_id: project_id.clone(),
        name: task.name.clone(),
        duration: duration_minutes(task),
        parent,
        kind: task.is_section.then_some(TaskKind::Group),
    }
}

/// Convert an hour estimate to whole minutes.
///
/// Sections are containers and always get zero. Leaf tasks are rounded and
/// floored to [`MIN_LEAF_DURATION`].
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn duration_minutes(task: &Task) -> u64 {
    if task.is_section {
        return 0;
    }
    let minutes = (task.hours() * 60.0).round().max(0.0) as u64;
    minutes.max(MIN_LEAF_DURATION)
}
