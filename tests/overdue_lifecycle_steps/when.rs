//! When steps for overdue lifecycle BDD scenarios.

use super::world::{OverdueLifecycleWorld, run_async};
use rstest_bdd_macros::when;
use taskwarden::task::services::UpdateStatusRequest;

#[when("the overdue sweep runs")]
fn sweep_runs(world: &mut OverdueLifecycleWorld) -> Result<(), eyre::Report> {
    let count = run_async(world.sweeper.sweep())
        .map_err(|err| eyre::eyre!("sweep failed in scenario: {err}"))?;
    world.last_sweep_count = Some(count);
    Ok(())
}

fn request_transition(
    world: &mut OverdueLifecycleWorld,
    target_status: &str,
    is_privileged: bool,
) -> Result<(), eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;

    let result = run_async(world.transitions.update_status(UpdateStatusRequest::new(
        task.id(),
        Some(target_status.to_owned()),
        is_privileged,
    )));
    if let Ok(ref updated) = result {
        world.task = Some(updated.clone());
    }
    world.last_transition_result = Some(result);
    Ok(())
}

#[when(r#"an unprivileged caller requests the status "{target_status}""#)]
fn unprivileged_transition(
    world: &mut OverdueLifecycleWorld,
    target_status: String,
) -> Result<(), eyre::Report> {
    request_transition(world, &target_status, false)
}

#[when(r#"a privileged caller requests the status "{target_status}""#)]
fn privileged_transition(
    world: &mut OverdueLifecycleWorld,
    target_status: String,
) -> Result<(), eyre::Report> {
    request_transition(world, &target_status, true)
}
