//! Status transition service: decide-then-commit for a single task.

use crate::task::domain::{
    ParseTaskStatusError, Task, TaskId, TaskStatus, TransitionOutcome, TransitionRejection, decide,
};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for a status update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatusRequest {
    task_id: TaskId,
    requested_status: Option<String>,
    is_privileged: bool,
}

impl UpdateStatusRequest {
    /// Creates a status update request.
    ///
    /// `requested_status` carries the raw wire value; absence and
    /// emptiness are decided by the guard, unknown values are rejected
    /// as malformed before the guard runs.
    #[must_use]
    pub const fn new(
        task_id: TaskId,
        requested_status: Option<String>,
        is_privileged: bool,
    ) -> Self {
        Self {
            task_id,
            requested_status,
            is_privileged,
        }
    }
}

/// Service-level errors for status transitions.
#[derive(Debug, Clone, Error)]
pub enum TaskTransitionError {
    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// The transition guard rejected the request.
    #[error(transparent)]
    Rejected(#[from] TransitionRejection),
    /// The requested status is not a recognized lifecycle status.
    #[error(transparent)]
    UnknownStatus(#[from] ParseTaskStatusError),
    /// `OVERDUE` was requested for a task that is not already overdue.
    #[error("OVERDUE cannot be requested directly; it is set by the overdue sweep")]
    OverdueNotRequestable,
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for transition service operations.
pub type TaskTransitionResult<T> = Result<T, TaskTransitionError>;

/// Orchestrates the transition guard over the repository port.
///
/// Each call reads current state fresh, runs the pure guard decision,
/// and commits conditionally on the status observed at decision time. A
/// concurrent change between decision and commit surfaces as
/// [`TaskRepositoryError::StatusConflict`]; the caller may retry the
/// whole sequence.
#[derive(Clone)]
pub struct TaskTransitionService<R>
where
    R: TaskRepository,
{
    repository: Arc<R>,
}

impl<R> TaskTransitionService<R>
where
    R: TaskRepository,
{
    /// Creates a new transition service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validates and commits a requested status change.
    ///
    /// Returns the updated task when the guard allows the transition.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTransitionError::NotFound`] for an unknown task,
    /// [`TaskTransitionError::UnknownStatus`] for an unrecognized status
    /// value, [`TaskTransitionError::Rejected`] when the guard refuses
    /// the transition, and [`TaskTransitionError::Repository`] for
    /// commit-time conflicts and store failures.
    pub async fn update_status(&self, request: UpdateStatusRequest) -> TaskTransitionResult<Task> {
        let task = self
            .repository
            .find_by_id(request.task_id)
            .await?
            .ok_or(TaskTransitionError::NotFound(request.task_id))?;

        let requested = parse_requested(request.requested_status.as_deref())?;
        // OVERDUE is only ever introduced by the sweep. The guard leaves
        // step-3 combinations unconstrained, so the request layer screens
        // direct promotion attempts; the OVERDUE -> OVERDUE no-op stays
        // with the guard.
        if requested == Some(TaskStatus::Overdue) && task.status() != TaskStatus::Overdue {
            return Err(TaskTransitionError::OverdueNotRequestable);
        }
        match decide(task.status(), requested, request.is_privileged) {
            TransitionOutcome::Rejected(reason) => Err(TaskTransitionError::Rejected(reason)),
            TransitionOutcome::Allowed(new_status) => {
                let updated = self
                    .repository
                    .update_status(task.id(), new_status, task.status())
                    .await?;
                info!(task_id = %task.id(), previous = %task.status(), new = %new_status, "task status updated");
                Ok(updated)
            }
        }
    }
}

/// Parses the raw wire status into a guard argument.
///
/// Absent or empty-after-trim values become `None` so the guard rejects
/// them as missing; any other unrecognized value is malformed input and
/// never reaches the guard.
fn parse_requested(raw: Option<&str>) -> Result<Option<TaskStatus>, ParseTaskStatusError> {
    match raw {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => TaskStatus::try_from(value).map(Some),
    }
}
