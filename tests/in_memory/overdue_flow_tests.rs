//! End-to-end lifecycle: sweep promotion followed by guarded transitions.

use std::sync::Arc;

use super::helpers::{TestRepo, date, repository, seed_task, status_of};
use mockable::DefaultClock;
use rstest::rstest;
use taskwarden::task::{
    domain::{TaskStatus, TransitionRejection},
    services::{OverdueSweeper, TaskTransitionError, TaskTransitionService, UpdateStatusRequest},
};

fn sweeper(repository: &Arc<TestRepo>) -> OverdueSweeper<TestRepo, DefaultClock> {
    OverdueSweeper::new(Arc::clone(repository), Arc::new(DefaultClock))
}

fn transitions(repository: &Arc<TestRepo>) -> TaskTransitionService<TestRepo> {
    TaskTransitionService::new(Arc::clone(repository))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overdue_task_is_swept_then_closed_by_a_privileged_caller(
    repository: Arc<TestRepo>,
) -> Result<(), eyre::Report> {
    let today = date(2026, 7, 2);
    let task = seed_task(&repository, TaskStatus::Wip, date(2026, 7, 1)).await;
    let sweep = sweeper(&repository);
    let service = transitions(&repository);

    // Sweep: the task due yesterday is promoted.
    let count = sweep.sweep_as_of(today).await?;
    eyre::ensure!(count == 1, "expected one promotion, got {count}");
    eyre::ensure!(status_of(&repository, &task).await == TaskStatus::Overdue);

    // Moving back to an open status is rejected.
    let reopen = service
        .update_status(UpdateStatusRequest::new(
            task.id(),
            Some("TODO".to_owned()),
            false,
        ))
        .await;
    eyre::ensure!(
        matches!(
            reopen,
            Err(TaskTransitionError::Rejected(
                TransitionRejection::InvalidBackwardFromOverdue
            ))
        ),
        "expected backward rejection, got {reopen:?}"
    );

    // An unprivileged close is rejected.
    let close_denied = service
        .update_status(UpdateStatusRequest::new(
            task.id(),
            Some("DONE".to_owned()),
            false,
        ))
        .await;
    eyre::ensure!(
        matches!(
            close_denied,
            Err(TaskTransitionError::Rejected(
                TransitionRejection::RequiresPrivilegeToClose
            ))
        ),
        "expected privilege rejection, got {close_denied:?}"
    );

    // A privileged close lands.
    let closed = service
        .update_status(UpdateStatusRequest::new(
            task.id(),
            Some("DONE".to_owned()),
            true,
        ))
        .await?;
    eyre::ensure!(closed.status() == TaskStatus::Done);
    eyre::ensure!(status_of(&repository, &task).await == TaskStatus::Done);

    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_sweeps_promote_nothing_new(repository: Arc<TestRepo>) -> Result<(), eyre::Report> {
    let today = date(2026, 7, 2);
    seed_task(&repository, TaskStatus::Todo, date(2026, 6, 30)).await;
    seed_task(&repository, TaskStatus::Wip, date(2026, 7, 1)).await;
    seed_task(&repository, TaskStatus::Done, date(2026, 6, 1)).await;
    let sweep = sweeper(&repository);

    let first = sweep.sweep_as_of(today).await?;
    let second = sweep.sweep_as_of(today).await?;

    eyre::ensure!(first == 2, "expected two promotions, got {first}");
    eyre::ensure!(second == 0, "expected idempotent re-run, got {second}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn swept_task_stays_closed_after_privileged_close(
    repository: Arc<TestRepo>,
) -> Result<(), eyre::Report> {
    let today = date(2026, 7, 2);
    let task = seed_task(&repository, TaskStatus::Todo, date(2026, 6, 28)).await;
    let sweep = sweeper(&repository);
    let service = transitions(&repository);

    sweep.sweep_as_of(today).await?;
    service
        .update_status(UpdateStatusRequest::new(
            task.id(),
            Some("DONE".to_owned()),
            true,
        ))
        .await?;

    // A later sweep with the same date leaves the closed task alone.
    let count = sweep.sweep_as_of(today).await?;
    eyre::ensure!(count == 0, "closed task must not be re-promoted");
    eyre::ensure!(status_of(&repository, &task).await == TaskStatus::Done);
    Ok(())
}
