//! Given steps for overdue lifecycle BDD scenarios.

use super::world::{OverdueLifecycleWorld, run_async};
use chrono::Days;
use eyre::WrapErr;
use mockable::{Clock, DefaultClock};
use rstest_bdd_macros::given;
use taskwarden::task::{
    domain::{NewTaskData, Priority, ProjectId, Task, TaskStatus, TaskTitle, UserId},
    ports::TaskRepository,
};
use uuid::Uuid;

#[given(r#"a "{status}" task due {days_ago:u64} days ago"#)]
fn task_due_days_ago(
    world: &mut OverdueLifecycleWorld,
    status: String,
    days_ago: u64,
) -> Result<(), eyre::Report> {
    let clock = DefaultClock;
    let seeded_status = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let due_date = clock
        .utc()
        .date_naive()
        .checked_sub_days(Days::new(days_ago))
        .ok_or_else(|| eyre::eyre!("unrepresentable due date"))?;

    let mut task = Task::new(
        NewTaskData {
            project_id: ProjectId::from_uuid(Uuid::new_v4()),
            assignee_id: UserId::from_uuid(Uuid::new_v4()),
            title: TaskTitle::new("Scenario task").wrap_err("scenario task title")?,
            description: None,
            priority: Priority::Medium,
            due_date,
        },
        &clock,
    );
    if seeded_status != TaskStatus::Todo {
        task.apply_status(seeded_status, &clock);
    }

    run_async(world.repository.insert(&task)).wrap_err("seed task for scenario")?;
    world.task = Some(task);
    Ok(())
}

#[given("the overdue sweep has run")]
fn sweep_has_run(world: &mut OverdueLifecycleWorld) -> Result<(), eyre::Report> {
    let count = run_async(world.sweeper.sweep()).wrap_err("sweep in scenario setup")?;
    world.last_sweep_count = Some(count);
    Ok(())
}
