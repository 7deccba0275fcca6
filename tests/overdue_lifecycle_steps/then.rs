//! Then steps for overdue lifecycle BDD scenarios.

use super::world::{OverdueLifecycleWorld, run_async};
use rstest_bdd_macros::then;
use taskwarden::task::{
    domain::{TaskStatus, TransitionRejection},
    ports::TaskRepository,
    services::TaskTransitionError,
};

#[then("the sweep reports {count:u64} promoted tasks")]
fn sweep_count_is(world: &OverdueLifecycleWorld, count: u64) -> Result<(), eyre::Report> {
    let reported = world
        .last_sweep_count
        .ok_or_else(|| eyre::eyre!("missing sweep count in scenario world"))?;

    if reported != count {
        return Err(eyre::eyre!("expected {count} promotions, found {reported}"));
    }
    Ok(())
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &OverdueLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected_status = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;

    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let stored = run_async(world.repository.find_by_id(task.id()))
        .map_err(|err| eyre::eyre!("lookup failed: {err}"))?
        .ok_or_else(|| eyre::eyre!("task missing from repository"))?;

    if stored.status() != expected_status {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected_status.as_str(),
            stored.status().as_str()
        ));
    }
    Ok(())
}

#[then("the transition is rejected for moving backward from overdue")]
fn transition_rejected_backward(world: &OverdueLifecycleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_transition_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing transition result"))?;

    if !matches!(
        result,
        Err(TaskTransitionError::Rejected(
            TransitionRejection::InvalidBackwardFromOverdue
        ))
    ) {
        return Err(eyre::eyre!(
            "expected InvalidBackwardFromOverdue rejection, got {result:?}"
        ));
    }
    Ok(())
}

#[then("the transition is rejected for missing privilege")]
fn transition_rejected_privilege(world: &OverdueLifecycleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_transition_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing transition result"))?;

    if !matches!(
        result,
        Err(TaskTransitionError::Rejected(
            TransitionRejection::RequiresPrivilegeToClose
        ))
    ) {
        return Err(eyre::eyre!(
            "expected RequiresPrivilegeToClose rejection, got {result:?}"
        ));
    }
    Ok(())
}
