//! Service orchestration tests for the task lifecycle.

use std::sync::Arc;

use super::support::{StepClock, development, procurement};
use crate::task::{
    adapters::memory::{InMemoryStatusChangeLog, InMemoryTaskRepository},
    domain::{Task, TaskDomainError, TaskFields, TaskId, WorkflowRejection},
    ports::{StatusChangeLog, TaskRepository},
    services::{
        ChangeStatusRequest, CreateTaskRequest, ErrorKind, TaskLifecycleError,
        TaskLifecycleService,
    },
};
use crate::task_type::{
    adapters::memory::InMemoryTaskTypeRepository,
    domain::{StatusNumber, TaskType, TaskTypeId, TaskTypeName, WorkflowConfig},
    ports::{TaskTypeRepository, TaskTypeRepositoryError, TaskTypeRepositoryResult},
};
use crate::user::{
    adapters::memory::InMemoryUserDirectory,
    domain::{EmailAddress, User, UserId},
    ports::{UserDirectory, UserDirectoryResult},
};
use async_trait::async_trait;
use eyre::ensure;
use mockall::mock;
use rstest::rstest;
use serde_json::{Value, json};

mock! {
    pub Users {}

    #[async_trait]
    impl UserDirectory for Users {
        async fn store(&self, user: &User) -> UserDirectoryResult<()>;
        async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<User>>;
        async fn find_by_email(&self, email: &EmailAddress) -> UserDirectoryResult<Option<User>>;
        async fn list_all(&self) -> UserDirectoryResult<Vec<User>>;
    }
}

mock! {
    pub TaskTypes {}

    #[async_trait]
    impl TaskTypeRepository for TaskTypes {
        async fn register(&self, task_type: &TaskType) -> TaskTypeRepositoryResult<()>;
        async fn find_by_id(&self, id: TaskTypeId) -> TaskTypeRepositoryResult<Option<TaskType>>;
        async fn find_by_name(
            &self,
            name: &TaskTypeName,
        ) -> TaskTypeRepositoryResult<Option<TaskType>>;
        async fn list_all(&self) -> TaskTypeRepositoryResult<Vec<TaskType>>;
    }
}

type Service<U> = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryStatusChangeLog,
    InMemoryTaskTypeRepository,
    U,
    StepClock,
>;

struct Harness<U: UserDirectory> {
    service: Service<U>,
    tasks: Arc<InMemoryTaskRepository>,
    status_log: Arc<InMemoryStatusChangeLog>,
    procurement: TaskType,
    development: TaskType,
}

async fn harness_with<U: UserDirectory>(users: U) -> eyre::Result<Harness<U>> {
    let clock = Arc::new(StepClock::default());
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let status_log = Arc::new(InMemoryStatusChangeLog::new());
    let task_types = Arc::new(InMemoryTaskTypeRepository::new());

    let procurement = procurement(&*clock);
    let development = development(&*clock);
    task_types.register(&procurement).await?;
    task_types.register(&development).await?;

    let service = TaskLifecycleService::new(
        Arc::clone(&tasks),
        Arc::clone(&status_log),
        task_types,
        Arc::new(users),
        clock,
    );
    Ok(Harness {
        service,
        tasks,
        status_log,
        procurement,
        development,
    })
}

async fn user(directory: &InMemoryUserDirectory, name: &str, email: &str) -> eyre::Result<UserId> {
    let user = User::new(name, EmailAddress::new(email)?)?;
    directory.store(&user).await?;
    Ok(user.id())
}

fn quotes() -> TaskFields {
    TaskFields::new()
        .with("priceQuote1", "1200")
        .with("priceQuote2", "1150")
}

fn status(value: u32) -> StatusNumber {
    StatusNumber::new(value).expect("positive status")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_tasks_start_open_at_status_one() -> eyre::Result<()> {
    let directory = InMemoryUserDirectory::new();
    let alice = user(&directory, "Alice Johnson", "alice@example.com").await?;
    let harness = harness_with(directory).await?;

    let task = harness
        .service
        .create_task(CreateTaskRequest::new(harness.procurement.id(), alice))
        .await?;

    ensure!(task.status() == StatusNumber::START);
    ensure!(!task.is_closed());
    ensure!(task.fields().is_empty());
    ensure!(task.assigned_user_id() == alice);
    ensure!(harness.tasks.find_by_id(task.id()).await? == Some(task));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_task_checks_references() -> eyre::Result<()> {
    let directory = InMemoryUserDirectory::new();
    let alice = user(&directory, "Alice Johnson", "alice@example.com").await?;
    let harness = harness_with(directory).await?;

    let unknown_type = TaskTypeId::new();
    let missing_type = harness
        .service
        .create_task(CreateTaskRequest::new(unknown_type, alice))
        .await;
    ensure!(matches!(
        missing_type,
        Err(TaskLifecycleError::TaskTypeNotFound(id)) if id == unknown_type
    ));

    let unknown_user = UserId::new();
    let missing_user = harness
        .service
        .create_task(CreateTaskRequest::new(harness.procurement.id(), unknown_user))
        .await;
    let Err(err) = missing_user else {
        eyre::bail!("unknown assignee should be rejected");
    };
    ensure!(err.kind() == ErrorKind::NotFound);
    ensure!(harness.tasks.list_all().await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn procurement_task_runs_to_closure() -> eyre::Result<()> {
    let directory = InMemoryUserDirectory::new();
    let alice = user(&directory, "Alice Johnson", "alice@example.com").await?;
    let bob = user(&directory, "Bob Smith", "bob@example.com").await?;
    let harness = harness_with(directory).await?;
    let service = &harness.service;

    let task = service
        .create_task(CreateTaskRequest::new(harness.procurement.id(), alice))
        .await?;

    let rejected = service
        .change_status(ChangeStatusRequest::new(task.id(), 2, bob))
        .await;
    ensure!(matches!(
        rejected,
        Err(TaskLifecycleError::Rejected(WorkflowRejection::MissingRequiredField { ref field, .. }))
            if field.as_str() == "priceQuote1"
    ));

    let quoted = service
        .change_status(ChangeStatusRequest::new(task.id(), 2, bob).with_fields(quotes()))
        .await?;
    ensure!(quoted.status() == status(2));
    ensure!(quoted.assigned_user_id() == bob);

    let early_close = service.close_task(task.id()).await;
    ensure!(matches!(
        early_close,
        Err(TaskLifecycleError::Rejected(WorkflowRejection::NotAtFinalStatus { .. }))
    ));

    let receipt = TaskFields::new().with("receipt", "R-42");
    service
        .change_status(ChangeStatusRequest::new(task.id(), 3, alice).with_fields(receipt))
        .await?;
    let closed = service.close_task(task.id()).await?;
    ensure!(closed.is_closed());
    ensure!(closed.fields().is_supplied("priceQuote2"));
    ensure!(closed.fields().is_supplied("receipt"));

    let after_close = service
        .change_status(ChangeStatusRequest::new(task.id(), 1, alice))
        .await;
    let Err(err) = after_close else {
        eyre::bail!("closed task should reject status changes");
    };
    ensure!(err.kind() == ErrorKind::Forbidden);

    let history = harness.status_log.list_for_task(task.id()).await?;
    let transitions: Vec<(u32, u32)> = history
        .iter()
        .map(|entry| (entry.from_status().value(), entry.to_status().value()))
        .collect();
    ensure!(transitions == vec![(1, 2), (2, 3)]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn development_task_rejects_skips_and_allows_returning() -> eyre::Result<()> {
    let directory = InMemoryUserDirectory::new();
    let alice = user(&directory, "Alice Johnson", "alice@example.com").await?;
    let harness = harness_with(directory).await?;
    let service = &harness.service;

    let task = service
        .create_task(CreateTaskRequest::new(harness.development.id(), alice))
        .await?;
    let skip = service
        .change_status(
            ChangeStatusRequest::new(task.id(), 3, alice)
                .with_fields(TaskFields::new().with("branchName", "feature/x")),
        )
        .await;
    ensure!(matches!(
        skip,
        Err(TaskLifecycleError::Rejected(WorkflowRejection::SkippedStatus { current, attempted }))
            if current == status(1) && attempted == status(3)
    ));

    service
        .change_status(
            ChangeStatusRequest::new(task.id(), 2, alice)
                .with_fields(TaskFields::new().with("specification", "spec.pdf")),
        )
        .await?;
    let returned = service
        .change_status(ChangeStatusRequest::new(task.id(), 1, alice))
        .await?;

    ensure!(returned.status() == StatusNumber::START);
    ensure!(returned.fields().is_supplied("specification"));
    ensure!(harness.status_log.list_for_task(task.id()).await?.len() == 2);
    Ok(())
}

#[rstest]
#[case(0)]
#[tokio::test(flavor = "multi_thread")]
async fn zero_status_is_invalid(#[case] requested: u32) -> eyre::Result<()> {
    let directory = InMemoryUserDirectory::new();
    let alice = user(&directory, "Alice Johnson", "alice@example.com").await?;
    let harness = harness_with(directory).await?;
    let task = harness
        .service
        .create_task(CreateTaskRequest::new(harness.procurement.id(), alice))
        .await?;

    let result = harness
        .service
        .change_status(ChangeStatusRequest::new(task.id(), requested, alice))
        .await;

    ensure!(matches!(result, Err(TaskLifecycleError::InvalidStatus(0))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_tasks_are_not_found() -> eyre::Result<()> {
    let harness = harness_with(InMemoryUserDirectory::new()).await?;
    let missing = TaskId::new();

    let change = harness
        .service
        .change_status(ChangeStatusRequest::new(missing, 2, UserId::new()))
        .await;
    let close = harness.service.close_task(missing).await;
    let detail = harness.service.task_detail(missing).await;

    ensure!(matches!(change, Err(TaskLifecycleError::TaskNotFound(id)) if id == missing));
    ensure!(matches!(close, Err(TaskLifecycleError::TaskNotFound(_))));
    ensure!(matches!(detail, Err(TaskLifecycleError::TaskNotFound(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_next_assignee_leaves_task_and_history_untouched() -> eyre::Result<()> {
    let known = UserId::new();
    let mut users = MockUsers::new();
    users.expect_find_by_id().returning(move |id| {
        Ok((id == known).then(|| {
            let email = EmailAddress::new("alice@example.com").expect("valid email");
            User::from_parts(id, "Alice Johnson", email).expect("valid user")
        }))
    });
    let harness = harness_with(users).await?;

    let task = harness
        .service
        .create_task(CreateTaskRequest::new(harness.procurement.id(), known))
        .await?;
    let result = harness
        .service
        .change_status(ChangeStatusRequest::new(task.id(), 2, UserId::new()).with_fields(quotes()))
        .await;

    ensure!(matches!(result, Err(TaskLifecycleError::UserNotFound(_))));
    ensure!(harness.status_log.list_for_task(task.id()).await?.is_empty());
    ensure!(harness.tasks.find_by_id(task.id()).await? == Some(task));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listings_are_most_recently_updated_first() -> eyre::Result<()> {
    let directory = InMemoryUserDirectory::new();
    let alice = user(&directory, "Alice Johnson", "alice@example.com").await?;
    let bob = user(&directory, "Bob Smith", "bob@example.com").await?;
    let harness = harness_with(directory).await?;
    let service = &harness.service;

    let older = service
        .create_task(CreateTaskRequest::new(harness.procurement.id(), alice))
        .await?;
    let newer = service
        .create_task(CreateTaskRequest::new(harness.development.id(), alice))
        .await?;
    let for_bob = service
        .create_task(CreateTaskRequest::new(harness.development.id(), bob))
        .await?;
    service
        .change_status(ChangeStatusRequest::new(older.id(), 2, alice).with_fields(quotes()))
        .await?;

    let all: Vec<TaskId> = service.list_tasks().await?.iter().map(|task| task.id()).collect();
    ensure!(all == vec![older.id(), for_bob.id(), newer.id()]);

    let alices: Vec<TaskId> = service
        .list_tasks_for_user(alice)
        .await?
        .iter()
        .map(|task| task.id())
        .collect();
    ensure!(alices == vec![older.id(), newer.id()]);
    ensure!(service.list_tasks_for_user(UserId::new()).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_detail_includes_type_and_ordered_history() -> eyre::Result<()> {
    let directory = InMemoryUserDirectory::new();
    let alice = user(&directory, "Alice Johnson", "alice@example.com").await?;
    let harness = harness_with(directory).await?;
    let service = &harness.service;

    let task = service
        .create_task(CreateTaskRequest::new(harness.procurement.id(), alice))
        .await?;
    service
        .change_status(ChangeStatusRequest::new(task.id(), 2, alice).with_fields(quotes()))
        .await?;
    service
        .change_status(ChangeStatusRequest::new(task.id(), 1, alice))
        .await?;

    let detail = service.task_detail(task.id()).await?;

    ensure!(detail.task.status() == StatusNumber::START);
    ensure!(detail.task_type.as_ref() == Some(&harness.procurement));
    ensure!(detail.status_changes.len() == 2);
    ensure!(detail.status_changes[0].changed_at() < detail.status_changes[1].changed_at());
    ensure!(detail.status_changes[1].to_status() == StatusNumber::START);
    Ok(())
}

async fn closed_procurement_task(
    harness: &Harness<InMemoryUserDirectory>,
    alice: UserId,
) -> eyre::Result<Task> {
    let service = &harness.service;
    let task = service
        .create_task(CreateTaskRequest::new(harness.procurement.id(), alice))
        .await?;
    service
        .change_status(ChangeStatusRequest::new(task.id(), 2, alice).with_fields(quotes()))
        .await?;
    service
        .change_status(
            ChangeStatusRequest::new(task.id(), 3, alice)
                .with_fields(TaskFields::new().with("receipt", "R-42")),
        )
        .await?;
    Ok(service.close_task(task.id()).await?)
}

#[rstest]
#[case::zero_status(0, Value::Null)]
#[case::string_fields(2, json!("receipt"))]
#[case::array_fields(3, json!(["receipt"]))]
#[case::zero_status_and_bad_fields(0, json!(42))]
#[tokio::test(flavor = "multi_thread")]
async fn closed_tasks_refuse_changes_before_request_parsing(
    #[case] requested: u32,
    #[case] raw_fields: Value,
) -> eyre::Result<()> {
    let directory = InMemoryUserDirectory::new();
    let alice = user(&directory, "Alice Johnson", "alice@example.com").await?;
    let harness = harness_with(directory).await?;
    let closed = closed_procurement_task(&harness, alice).await?;

    let result = harness
        .service
        .change_status(
            ChangeStatusRequest::new(closed.id(), requested, alice).with_raw_fields(raw_fields),
        )
        .await;

    let Err(err) = result else {
        eyre::bail!("closed task should reject status changes");
    };
    ensure!(matches!(
        err,
        TaskLifecycleError::Rejected(WorkflowRejection::ClosedTaskImmutable { task_id })
            if task_id == closed.id()
    ));
    ensure!(err.kind() == ErrorKind::Forbidden);
    ensure!(harness.status_log.list_for_task(closed.id()).await?.len() == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn open_tasks_reject_non_object_fields() -> eyre::Result<()> {
    let directory = InMemoryUserDirectory::new();
    let alice = user(&directory, "Alice Johnson", "alice@example.com").await?;
    let harness = harness_with(directory).await?;
    let task = harness
        .service
        .create_task(CreateTaskRequest::new(harness.procurement.id(), alice))
        .await?;

    let result = harness
        .service
        .change_status(
            ChangeStatusRequest::new(task.id(), 2, alice).with_raw_fields(json!([1, 2])),
        )
        .await;

    let Err(err) = result else {
        eyre::bail!("array fields should be rejected");
    };
    ensure!(matches!(
        err,
        TaskLifecycleError::Domain(TaskDomainError::FieldsNotAnObject(_))
    ));
    ensure!(err.kind() == ErrorKind::Invalid);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn corrupt_task_type_configuration_is_an_integrity_failure() -> eyre::Result<()> {
    let clock = Arc::new(StepClock::default());
    let directory = InMemoryUserDirectory::new();
    let alice = user(&directory, "Alice Johnson", "alice@example.com").await?;
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let status_log = Arc::new(InMemoryStatusChangeLog::new());

    let mut task_types = MockTaskTypes::new();
    task_types.expect_find_by_id().returning(|_| {
        let parse_error = serde_json::from_str::<WorkflowConfig>(r#"{"finalStatus":0}"#)
            .expect_err("zero final status is malformed");
        Err(TaskTypeRepositoryError::invalid_persisted_data(parse_error))
    });

    let task = Task::new(TaskTypeId::new(), alice, &*clock);
    tasks.store(&task).await?;
    let service = TaskLifecycleService::new(
        Arc::clone(&tasks),
        Arc::clone(&status_log),
        Arc::new(task_types),
        Arc::new(directory),
        clock,
    );

    let change = service
        .change_status(ChangeStatusRequest::new(task.id(), 2, alice).with_fields(quotes()))
        .await;
    let close = service.close_task(task.id()).await;

    for outcome in [change, close] {
        let Err(err) = outcome else {
            eyre::bail!("corrupt configuration should fail the operation");
        };
        ensure!(err.kind() == ErrorKind::Integrity, "unexpected kind for {err}");
    }
    ensure!(status_log.list_for_task(task.id()).await?.is_empty());
    ensure!(tasks.find_by_id(task.id()).await? == Some(task));
    Ok(())
}
