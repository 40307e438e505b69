//! Given steps for task workflow BDD scenarios.

use super::world::{TaskWorkflowWorld, parse_fields, run_async};
use eyre::{WrapErr, eyre};
use rstest_bdd_macros::given;
use taskflow::bootstrap::{SeedPlan, apply_seed_plan};
use taskflow::task::services::{ChangeStatusRequest, CreateTaskRequest};

#[given("the stock task types and users are seeded")]
fn stock_seeded(world: &mut TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let plan = SeedPlan::stock()?;
    run_async(apply_seed_plan(
        &plan,
        &world.registry,
        world.backends.users.as_ref(),
    ))
    .wrap_err("seed stock plan")?;
    Ok(())
}

#[given(r#"a "{task_type}" task assigned to "{email}""#)]
fn task_assigned_to(
    world: &mut TaskWorkflowWorld,
    task_type: String,
    email: String,
) -> Result<(), eyre::Report> {
    let resolved = run_async(world.registry.find_by_name(&task_type))?
        .ok_or_else(|| eyre!("unknown scenario task type {task_type}"))?;
    let assignee = world.user_id(&email)?;
    let task = run_async(
        world
            .lifecycle
            .create_task(CreateTaskRequest::new(resolved.id(), assignee)),
    )
    .wrap_err("create scenario task")?;
    world.current_task = Some(task);
    Ok(())
}

#[given(r#"the task has moved to status {status:u32} with fields "{fields}""#)]
fn task_has_moved(
    world: &mut TaskWorkflowWorld,
    status: u32,
    fields: String,
) -> Result<(), eyre::Report> {
    let task = world.task()?;
    let request = ChangeStatusRequest::new(task.id(), status, task.assigned_user_id())
        .with_fields(parse_fields(&fields));
    let moved = run_async(world.lifecycle.change_status(request))
        .wrap_err("move scenario task")?;
    world.current_task = Some(moved);
    Ok(())
}

#[given("the task has been closed")]
fn task_has_been_closed(world: &mut TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let closed = run_async(world.lifecycle.close_task(task_id)).wrap_err("close scenario task")?;
    world.current_task = Some(closed);
    Ok(())
}
