//! Repository port for task persistence, lookup, and status commits.

use crate::task::domain::{Task, TaskId, TaskStatus, UserId};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// The two status-writing operations carry their selection predicates
/// into the commit itself: [`update_status`](Self::update_status) is
/// conditional on the status observed at decision time, and
/// [`promote_overdue`](Self::promote_overdue) applies its eligibility
/// predicate atomically rather than via a read-modify-write loop. This
/// keeps a concurrent sweep promotion and a user transition from
/// silently overwriting each other.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Commits a status change conditional on the currently stored status.
    ///
    /// Returns the updated task on success.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist, or [`TaskRepositoryError::StatusConflict`] when the stored
    /// status no longer matches `expected_current` (the task changed
    /// between decision and commit; the caller must re-evaluate).
    async fn update_status(
        &self,
        id: TaskId,
        new_status: TaskStatus,
        expected_current: TaskStatus,
    ) -> TaskRepositoryResult<Task>;

    /// Atomically promotes every eligible task to `Overdue`.
    ///
    /// Eligible: due date strictly before `today` and status neither
    /// `Done` nor already `Overdue`. The predicate is enforced at commit
    /// time. Returns the number of tasks transitioned; running the same
    /// promotion twice transitions nothing the second time.
    async fn promote_overdue(&self, today: NaiveDate) -> TaskRepositoryResult<u64>;

    /// Returns all tasks currently in the given status.
    async fn list_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all tasks assigned to the given user.
    async fn list_by_assignee(&self, assignee: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the number of tasks per status.
    ///
    /// Statuses with no tasks are omitted.
    async fn status_counts(&self) -> TaskRepositoryResult<HashMap<TaskStatus, u64>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The stored status no longer matches the status observed at
    /// decision time.
    #[error("task {task_id} is no longer in status {expected}")]
    StatusConflict {
        /// The task whose commit was rejected.
        task_id: TaskId,
        /// The status the caller decided against.
        expected: TaskStatus,
    },

    /// The store could not be reached or failed mid-operation.
    #[error("store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a store failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
