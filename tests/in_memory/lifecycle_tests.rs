//! End-to-end lifecycle runs over seeded in-memory storage.

use super::helpers::SeededWorkflow;
use eyre::ensure;
use serde_json::json;
use taskflow::task::{
    domain::{TaskFields, WorkflowRejection},
    services::{ChangeStatusRequest, CreateTaskRequest, ErrorKind, TaskLifecycleError},
};
use taskflow::task_type::domain::StatusNumber;

fn status(value: u32) -> StatusNumber {
    StatusNumber::new(value).expect("positive status")
}

#[tokio::test(flavor = "multi_thread")]
async fn procurement_task_runs_to_closure() -> eyre::Result<()> {
    let workflow = SeededWorkflow::stock().await?;
    let procurement = workflow.task_type("procurement").await?;
    let alice = workflow.user("alice@example.com").await?;
    let bob = workflow.user("bob@example.com").await?;

    let task = workflow
        .lifecycle
        .create_task(CreateTaskRequest::new(procurement.id(), alice.id()))
        .await?;
    ensure!(task.status() == StatusNumber::START);

    let quotes = TaskFields::new()
        .with("priceQuote1", 1200)
        .with("priceQuote2", 1150);
    workflow
        .lifecycle
        .change_status(ChangeStatusRequest::new(task.id(), 2, bob.id()).with_fields(quotes))
        .await?;

    let early_close = workflow.lifecycle.close_task(task.id()).await;
    ensure!(matches!(
        early_close,
        Err(TaskLifecycleError::Rejected(WorkflowRejection::NotAtFinalStatus { .. }))
    ));

    let receipt = TaskFields::new().with("receipt", "receipt-2026-001.pdf");
    workflow
        .lifecycle
        .change_status(ChangeStatusRequest::new(task.id(), 3, alice.id()).with_fields(receipt))
        .await?;
    let closed = workflow.lifecycle.close_task(task.id()).await?;

    ensure!(closed.is_closed());
    ensure!(closed.status() == status(3));
    ensure!(closed.assigned_user_id() == alice.id());
    ensure!(closed.fields().get("priceQuote1") == Some(&json!(1200)));
    ensure!(closed.fields().get("receipt") == Some(&json!("receipt-2026-001.pdf")));

    let detail = workflow.lifecycle.task_detail(task.id()).await?;
    let path: Vec<(u32, u32)> = detail
        .status_changes
        .iter()
        .map(|entry| (entry.from_status().value(), entry.to_status().value()))
        .collect();
    ensure!(path == [(1, 2), (2, 3)]);
    ensure!(detail.task_type.as_ref().map(|task_type| task_type.id()) == Some(procurement.id()));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn development_task_cannot_skip_and_may_return() -> eyre::Result<()> {
    let workflow = SeededWorkflow::stock().await?;
    let development = workflow.task_type("development").await?;
    let charlie = workflow.user("charlie@example.com").await?;

    let task = workflow
        .lifecycle
        .create_task(CreateTaskRequest::new(development.id(), charlie.id()))
        .await?;

    let skip = workflow
        .lifecycle
        .change_status(
            ChangeStatusRequest::new(task.id(), 3, charlie.id())
                .with_fields(TaskFields::new().with("branchName", "feature/login")),
        )
        .await;
    let rejection = skip.expect_err("skipping a status is rejected");
    ensure!(rejection.kind() == ErrorKind::Invalid);

    workflow
        .lifecycle
        .change_status(
            ChangeStatusRequest::new(task.id(), 2, charlie.id())
                .with_fields(TaskFields::new().with("specification", "Login flow")),
        )
        .await?;
    let returned = workflow
        .lifecycle
        .change_status(ChangeStatusRequest::new(task.id(), 1, charlie.id()))
        .await?;

    ensure!(returned.status() == StatusNumber::START);
    ensure!(returned.fields().get("specification") == Some(&json!("Login flow")));
    let history = workflow.lifecycle.task_detail(task.id()).await?.status_changes;
    ensure!(history.len() == 2);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn tasks_are_listed_per_assignee() -> eyre::Result<()> {
    let workflow = SeededWorkflow::stock().await?;
    let procurement = workflow.task_type("procurement").await?;
    let alice = workflow.user("alice@example.com").await?;
    let diana = workflow.user("diana@example.com").await?;

    let for_alice = workflow
        .lifecycle
        .create_task(CreateTaskRequest::new(procurement.id(), alice.id()))
        .await?;
    let for_diana = workflow
        .lifecycle
        .create_task(CreateTaskRequest::new(procurement.id(), diana.id()))
        .await?;

    let alice_tasks = workflow.lifecycle.list_tasks_for_user(alice.id()).await?;
    let all_tasks = workflow.lifecycle.list_tasks().await?;

    ensure!(alice_tasks.iter().map(|task| task.id()).eq([for_alice.id()]));
    ensure!(all_tasks.len() == 2);
    ensure!(all_tasks.iter().any(|task| task.id() == for_diana.id()));
    Ok(())
}
