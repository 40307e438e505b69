//! When steps for task workflow BDD scenarios.

use super::world::{TaskWorkflowWorld, parse_fields, run_async};
use rstest_bdd_macros::when;
use taskflow::task::domain::TaskFields;
use taskflow::task::services::ChangeStatusRequest;

fn change_status(
    world: &mut TaskWorkflowWorld,
    status: u32,
    email: &str,
    fields: TaskFields,
) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let next_assignee = world.user_id(email)?;
    let request = ChangeStatusRequest::new(task_id, status, next_assignee).with_fields(fields);
    let result = run_async(world.lifecycle.change_status(request));
    if let Ok(ref updated) = result {
        world.current_task = Some(updated.clone());
    }
    world.last_change = Some(result);
    Ok(())
}

#[when(r#"the task moves to status {status:u32} for "{email}" with fields "{fields}""#)]
fn task_moves_with_fields(
    world: &mut TaskWorkflowWorld,
    status: u32,
    email: String,
    fields: String,
) -> Result<(), eyre::Report> {
    change_status(world, status, &email, parse_fields(&fields))
}

#[when(r#"the task moves back to status {status:u32} for "{email}""#)]
fn task_moves_back(
    world: &mut TaskWorkflowWorld,
    status: u32,
    email: String,
) -> Result<(), eyre::Report> {
    change_status(world, status, &email, TaskFields::new())
}

#[when("the task is closed")]
fn task_is_closed(world: &mut TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let result = run_async(world.lifecycle.close_task(task_id));
    if let Ok(ref closed) = result {
        world.current_task = Some(closed.clone());
    }
    world.last_closure = Some(result);
    Ok(())
}
