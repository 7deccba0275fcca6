//! Overdue sweep service.

use crate::task::ports::{TaskRepository, TaskRepositoryError};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors returned by the overdue sweep.
#[derive(Debug, Clone, Error)]
pub enum SweepError {
    /// The store rejected or failed the bulk promotion.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for sweep operations.
pub type SweepResult<T> = Result<T, SweepError>;

/// Stateless batch operation that promotes eligible tasks to `Overdue`.
///
/// Invoked on demand (typically by a scheduling trigger); holds no state
/// between invocations and performs no retries. A failed sweep promotes
/// nothing and reports the store failure for the whole call.
#[derive(Clone)]
pub struct OverdueSweeper<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> OverdueSweeper<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new sweeper.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Sweeps using the clock's current UTC calendar date.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError`] when the store is unreachable; no partial
    /// promotion occurs.
    pub async fn sweep(&self) -> SweepResult<u64> {
        let today = self.clock.utc().date_naive();
        self.sweep_as_of(today).await
    }

    /// Sweeps as of an explicit calendar date.
    ///
    /// Promotes every task whose due date is strictly before `today` and
    /// whose status is neither `Done` nor already `Overdue`, as a single
    /// atomic store operation. Idempotent for a fixed `today`.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError`] when the store is unreachable; no partial
    /// promotion occurs.
    pub async fn sweep_as_of(&self, today: NaiveDate) -> SweepResult<u64> {
        let count = self.repository.promote_overdue(today).await?;
        info!(count, %today, "overdue sweep completed");
        Ok(count)
    }
}
