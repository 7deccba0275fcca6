//! Task aggregate root.

use super::{Priority, ProjectId, TaskId, TaskStatus, TaskTitle, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// Status mutations go through [`Task::apply_status`]; whether a mutation
/// is permitted is decided beforehand by the transition guard or the
/// overdue sweep's selection predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    assignee_id: UserId,
    title: TaskTitle,
    description: Option<String>,
    status: TaskStatus,
    priority: Priority,
    due_date: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a new task record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Project the task belongs to.
    pub project_id: ProjectId,
    /// User the task is assigned to.
    pub assignee_id: UserId,
    /// Validated task title.
    pub title: TaskTitle,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Task priority.
    pub priority: Priority,
    /// Calendar date the task is due.
    pub due_date: NaiveDate,
}

/// Parameter object for reconstructing a persisted task record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted project reference.
    pub project_id: ProjectId,
    /// Persisted assignee reference.
    pub assignee_id: UserId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted due date.
    pub due_date: NaiveDate,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in the `Todo` status.
    #[must_use]
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            project_id: data.project_id,
            assignee_id: data.assignee_id,
            title: data.title,
            description: data.description,
            status: TaskStatus::Todo,
            priority: data.priority,
            due_date: data.due_date,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            assignee_id: data.assignee_id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the project reference.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the assignee reference.
    #[must_use]
    pub const fn assignee_id(&self) -> UserId {
        self.assignee_id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when the overdue sweep would select this task.
    ///
    /// Selection predicate: the due date is strictly before `today` and
    /// the status is neither `Done` nor already `Overdue`.
    #[must_use]
    pub fn is_sweep_eligible(&self, today: NaiveDate) -> bool {
        self.due_date < today && !self.status.is_sweep_exempt()
    }

    /// Sets the lifecycle status and refreshes the update timestamp.
    ///
    /// Performs no validation of its own: the caller must have decided
    /// the transition via the guard or the sweep predicate first.
    pub fn apply_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
