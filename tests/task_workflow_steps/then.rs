//! Then steps for task workflow BDD scenarios.

use super::world::{TaskWorkflowWorld, run_async};
use eyre::{ensure, eyre};
use rstest_bdd_macros::then;
use taskflow::task::{
    domain::{Task, WorkflowRejection},
    services::TaskLifecycleError,
};

fn last_change(
    world: &TaskWorkflowWorld,
) -> Result<&Result<Task, TaskLifecycleError>, eyre::Report> {
    world
        .last_change
        .as_ref()
        .ok_or_else(|| eyre!("missing status change result"))
}

#[then("the change is accepted")]
fn change_is_accepted(world: &TaskWorkflowWorld) -> Result<(), eyre::Report> {
    if let Err(err) = last_change(world)? {
        return Err(eyre!("expected the change to be accepted, got {err}"));
    }
    Ok(())
}

#[then(r#"the task is at status {status:u32} assigned to "{email}""#)]
fn task_is_at_status(
    world: &TaskWorkflowWorld,
    status: u32,
    email: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let stored = run_async(world.lifecycle.task_detail(task_id))?.task;
    let assignee = world.user_id(&email)?;
    ensure!(
        stored.status().value() == status,
        "expected status {status}, found {}",
        stored.status()
    );
    ensure!(
        stored.assigned_user_id() == assignee,
        "expected task to be assigned to {email}"
    );
    Ok(())
}

#[then(r#"the change is rejected as missing field "{field}""#)]
fn rejected_missing_field(world: &TaskWorkflowWorld, field: String) -> Result<(), eyre::Report> {
    let result = last_change(world)?;
    ensure!(
        matches!(
            result,
            Err(TaskLifecycleError::Rejected(WorkflowRejection::MissingRequiredField {
                field: missing,
                ..
            })) if missing.as_str() == field
        ),
        "expected missing field {field}, got {result:?}"
    );
    Ok(())
}

#[then("the change is rejected as a skipped status")]
fn rejected_skipped_status(world: &TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let result = last_change(world)?;
    ensure!(
        matches!(
            result,
            Err(TaskLifecycleError::Rejected(WorkflowRejection::SkippedStatus { .. }))
        ),
        "expected skipped status rejection, got {result:?}"
    );
    Ok(())
}

#[then("the change is rejected because the task is closed")]
fn rejected_closed(world: &TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let result = last_change(world)?;
    ensure!(
        matches!(
            result,
            Err(TaskLifecycleError::Rejected(WorkflowRejection::ClosedTaskImmutable { .. }))
        ),
        "expected closed task rejection, got {result:?}"
    );
    Ok(())
}

#[then("closing is rejected because the task is not at its final status")]
fn closing_rejected(world: &TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_closure
        .as_ref()
        .ok_or_else(|| eyre!("missing closure result"))?;
    ensure!(
        matches!(
            result,
            Err(TaskLifecycleError::Rejected(WorkflowRejection::NotAtFinalStatus { .. }))
        ),
        "expected final status rejection, got {result:?}"
    );
    Ok(())
}

#[then("the task history has {count:usize} entries")]
fn history_has_entries(world: &TaskWorkflowWorld, count: usize) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let detail = run_async(world.lifecycle.task_detail(task_id))?;
    ensure!(
        detail.status_changes.len() == count,
        "expected {count} history entries, found {}",
        detail.status_changes.len()
    );
    Ok(())
}
