//! In-memory repository for task lifecycle tests and local runs.

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskId, TaskStatus, UserId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Both conditional writes run under a single write lock, so the
/// commit-time predicates hold exactly as they do for the SQL adapter.
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
    clock: Arc<C>,
}

impl InMemoryTaskRepository<DefaultClock> {
    /// Creates an empty repository stamping writes with the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryTaskRepository<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty repository stamping writes with the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }
}

fn lock_error(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::unavailable(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl<C> TaskRepository for InMemoryTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.get(&id).cloned())
    }

    async fn update_status(
        &self,
        id: TaskId,
        new_status: TaskStatus,
        expected_current: TaskStatus,
    ) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(lock_error)?;
        let task = state
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        if task.status() != expected_current {
            return Err(TaskRepositoryError::StatusConflict {
                task_id: id,
                expected: expected_current,
            });
        }
        task.apply_status(new_status, &*self.clock);
        Ok(task.clone())
    }

    async fn promote_overdue(&self, today: NaiveDate) -> TaskRepositoryResult<u64> {
        let mut state = self.state.write().map_err(lock_error)?;
        let mut count = 0u64;
        for task in state.values_mut() {
            if task.is_sweep_eligible(today) {
                task.apply_status(TaskStatus::Overdue, &*self.clock);
                count += 1;
            }
        }
        Ok(count)
    }

    async fn list_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .values()
            .filter(|task| task.status() == status)
            .cloned()
            .collect())
    }

    async fn list_by_assignee(&self, assignee: UserId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .values()
            .filter(|task| task.assignee_id() == assignee)
            .cloned()
            .collect())
    }

    async fn status_counts(&self) -> TaskRepositoryResult<HashMap<TaskStatus, u64>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut counts = HashMap::new();
        for task in state.values() {
            *counts.entry(task.status()).or_insert(0u64) += 1;
        }
        Ok(counts)
    }
}
