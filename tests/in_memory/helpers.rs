//! Shared test helpers for in-memory repository integration tests.

use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use taskwarden::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{NewTaskData, Priority, ProjectId, Task, TaskStatus, TaskTitle, UserId},
    ports::TaskRepository,
};
use uuid::Uuid;

/// Repository type shared by the in-memory suites.
pub type TestRepo = InMemoryTaskRepository<DefaultClock>;

/// Provides a fresh in-memory repository for each test.
#[fixture]
pub fn repository() -> Arc<TestRepo> {
    Arc::new(InMemoryTaskRepository::new())
}

/// Builds a calendar date from literal parts.
///
/// # Panics
///
/// Panics when the parts do not name a real calendar date.
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Seeds a task with the given status, assignee, and due date.
pub async fn seed_task_for(
    repository: &TestRepo,
    assignee: UserId,
    status: TaskStatus,
    due_date: NaiveDate,
) -> Task {
    let clock = DefaultClock;
    let mut task = Task::new(
        NewTaskData {
            project_id: ProjectId::from_uuid(Uuid::new_v4()),
            assignee_id: assignee,
            title: TaskTitle::new("Integration fixture task").expect("valid title"),
            description: None,
            priority: Priority::Medium,
            due_date,
        },
        &clock,
    );
    if status != TaskStatus::Todo {
        task.apply_status(status, &clock);
    }
    repository.insert(&task).await.expect("seed insert");
    task
}

/// Seeds a task with the given status and due date.
pub async fn seed_task(repository: &TestRepo, status: TaskStatus, due_date: NaiveDate) -> Task {
    seed_task_for(
        repository,
        UserId::from_uuid(Uuid::new_v4()),
        status,
        due_date,
    )
    .await
}

/// Reads the stored status of a task.
pub async fn status_of(repository: &TestRepo, task: &Task) -> TaskStatus {
    repository
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist")
        .status()
}
