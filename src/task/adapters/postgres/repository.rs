//! `PostgreSQL` repository implementation for task lifecycle storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{PersistedTaskData, Priority, ProjectId, Task, TaskId, TaskStatus, TaskTitle, UserId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::HashMap;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
///
/// Both status writes are single conditional `UPDATE` statements, so the
/// selection predicates are enforced by the database at commit time.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::unavailable)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::unavailable)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::unavailable(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::unavailable)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn update_status(
        &self,
        id: TaskId,
        new_status: TaskStatus,
        expected_current: TaskStatus,
    ) -> TaskRepositoryResult<Task> {
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .filter(tasks::status.eq(expected_current.as_str())),
            )
            .set((
                tasks::status.eq(new_status.as_str()),
                tasks::updated_at.eq(diesel::dsl::now),
            ))
            .returning(TaskRow::as_returning())
            .get_result::<TaskRow>(connection)
            .optional()
            .map_err(TaskRepositoryError::unavailable)?;

            match updated {
                Some(row) => row_to_task(row),
                // The conditional matched nothing: either the task is gone
                // or its status moved since the decision was made.
                None => {
                    let exists: i64 = tasks::table
                        .filter(tasks::id.eq(id.into_inner()))
                        .count()
                        .get_result(connection)
                        .map_err(TaskRepositoryError::unavailable)?;
                    if exists == 0 {
                        Err(TaskRepositoryError::NotFound(id))
                    } else {
                        Err(TaskRepositoryError::StatusConflict {
                            task_id: id,
                            expected: expected_current,
                        })
                    }
                }
            }
        })
        .await
    }

    async fn promote_overdue(&self, today: NaiveDate) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let count = diesel::update(
                tasks::table.filter(tasks::due_date.lt(today)).filter(
                    tasks::status
                        .ne_all(vec![TaskStatus::Done.as_str(), TaskStatus::Overdue.as_str()]),
                ),
            )
            .set((
                tasks::status.eq(TaskStatus::Overdue.as_str()),
                tasks::updated_at.eq(diesel::dsl::now),
            ))
            .execute(connection)
            .map_err(TaskRepositoryError::unavailable)?;

            u64::try_from(count).map_err(TaskRepositoryError::unavailable)
        })
        .await
    }

    async fn list_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::status.eq(status.as_str()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::unavailable)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_by_assignee(&self, assignee: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::assignee_id.eq(assignee.into_inner()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::unavailable)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn status_counts(&self) -> TaskRepositoryResult<HashMap<TaskStatus, u64>> {
        self.run_blocking(move |connection| {
            let rows: Vec<(String, i64)> = tasks::table
                .group_by(tasks::status)
                .select((tasks::status, diesel::dsl::count_star()))
                .load(connection)
                .map_err(TaskRepositoryError::unavailable)?;

            let mut counts = HashMap::new();
            for (persisted_status, persisted_count) in rows {
                let status = TaskStatus::try_from(persisted_status.as_str())
                    .map_err(TaskRepositoryError::unavailable)?;
                let count =
                    u64::try_from(persisted_count).map_err(TaskRepositoryError::unavailable)?;
                counts.insert(status, count);
            }
            Ok(counts)
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        project_id: task.project_id().into_inner(),
        assignee_id: task.assignee_id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        due_date: task.due_date(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        project_id,
        assignee_id,
        title: persisted_title,
        description,
        status: persisted_status,
        priority: persisted_priority,
        due_date,
        created_at,
        updated_at,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskRepositoryError::unavailable)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::unavailable)?;
    let priority = Priority::try_from(persisted_priority.as_str())
        .map_err(TaskRepositoryError::unavailable)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        project_id: ProjectId::from_uuid(project_id),
        assignee_id: UserId::from_uuid(assignee_id),
        title,
        description,
        status,
        priority,
        due_date,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
