//! Service layer for creating, advancing, closing and querying tasks.

use crate::task::{
    domain::{
        RejectionKind, StatusChangeEntry, Task, TaskDomainError, TaskFields, TaskId,
        WorkflowEngine, WorkflowRejection,
    },
    ports::{StatusChangeLog, StatusChangeLogError, TaskRepository, TaskRepositoryError},
};
use crate::task_type::{
    domain::{StatusNumber, TaskType, TaskTypeId},
    ports::{TaskTypeRepository, TaskTypeRepositoryError},
};
use crate::user::{
    domain::UserId,
    ports::{UserDirectory, UserDirectoryError},
};
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for creating a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateTaskRequest {
    task_type_id: TaskTypeId,
    assignee_id: UserId,
}

impl CreateTaskRequest {
    /// Creates a request binding a new task to a type and an initial
    /// assignee.
    #[must_use]
    pub const fn new(task_type_id: TaskTypeId, assignee_id: UserId) -> Self {
        Self {
            task_type_id,
            assignee_id,
        }
    }
}

/// Request payload for moving a task to another status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeStatusRequest {
    task_id: TaskId,
    new_status: u32,
    next_assignee_id: UserId,
    fields: Value,
}

impl ChangeStatusRequest {
    /// Creates a status change request with no fields.
    #[must_use]
    pub fn new(task_id: TaskId, new_status: u32, next_assignee_id: UserId) -> Self {
        Self {
            task_id,
            new_status,
            next_assignee_id,
            fields: Value::Null,
        }
    }

    /// Sets the fields supplied with the change.
    #[must_use]
    pub fn with_fields(mut self, fields: TaskFields) -> Self {
        self.fields = fields.to_json();
        self
    }

    /// Sets the fields from an unchecked JSON document.
    ///
    /// The document is validated only once the task is known to be open, so
    /// a closed task reports its closure before a malformed payload.
    #[must_use]
    pub fn with_raw_fields(mut self, fields: Value) -> Self {
        self.fields = fields;
        self
    }
}

/// A task together with its type and status history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetail {
    /// The task.
    pub task: Task,
    /// The task's type, when it still resolves.
    pub task_type: Option<TaskType>,
    /// Accepted transitions, oldest first.
    pub status_changes: Vec<StatusChangeEntry>,
}

/// Coarse classification of lifecycle failures for transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced task, task type or user does not exist.
    NotFound,
    /// The task no longer accepts the operation.
    Forbidden,
    /// The request breaks a workflow rule or is malformed.
    Invalid,
    /// Stored data is corrupt.
    Integrity,
    /// Infrastructure failure.
    Internal,
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The task type does not exist.
    #[error("task type not found: {0}")]
    TaskTypeNotFound(TaskTypeId),
    /// The user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    /// The requested status is not a valid status number.
    #[error("invalid status {0}, expected a positive integer")]
    InvalidStatus(u32),
    /// The workflow engine refused the request.
    #[error(transparent)]
    Rejected(#[from] WorkflowRejection),
    /// Domain invariant failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Status change log operation failed.
    #[error(transparent)]
    StatusLog(#[from] StatusChangeLogError),
    /// Task type lookup failed.
    #[error(transparent)]
    TaskTypes(#[from] TaskTypeRepositoryError),
    /// User lookup failed.
    #[error(transparent)]
    Users(#[from] UserDirectoryError),
}

impl TaskLifecycleError {
    /// Returns the failure classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TaskNotFound(_)
            | Self::TaskTypeNotFound(_)
            | Self::UserNotFound(_)
            | Self::Repository(TaskRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::InvalidStatus(_) | Self::Domain(TaskDomainError::FieldsNotAnObject(_)) => {
                ErrorKind::Invalid
            }
            Self::Rejected(rejection) => match rejection.kind() {
                RejectionKind::Forbidden => ErrorKind::Forbidden,
                RejectionKind::Invalid => ErrorKind::Invalid,
            },
            Self::TaskTypes(err) if err.is_integrity_failure() => ErrorKind::Integrity,
            Self::Domain(TaskDomainError::StaleApproval(_))
            | Self::Repository(_)
            | Self::StatusLog(_)
            | Self::TaskTypes(_)
            | Self::Users(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Loads tasks and their types, asks the [`WorkflowEngine`] for a decision
/// and, on approval, appends the history entry before persisting the task.
pub struct TaskLifecycleService<R, L, T, U, C>
where
    R: TaskRepository + ?Sized,
    L: StatusChangeLog + ?Sized,
    T: TaskTypeRepository + ?Sized,
    U: UserDirectory + ?Sized,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    status_log: Arc<L>,
    task_types: Arc<T>,
    users: Arc<U>,
    clock: Arc<C>,
    engine: WorkflowEngine,
}

impl<R, L, T, U, C> Clone for TaskLifecycleService<R, L, T, U, C>
where
    R: TaskRepository + ?Sized,
    L: StatusChangeLog + ?Sized,
    T: TaskTypeRepository + ?Sized,
    U: UserDirectory + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            status_log: Arc::clone(&self.status_log),
            task_types: Arc::clone(&self.task_types),
            users: Arc::clone(&self.users),
            clock: Arc::clone(&self.clock),
            engine: self.engine,
        }
    }
}

impl<R, L, T, U, C> TaskLifecycleService<R, L, T, U, C>
where
    R: TaskRepository + ?Sized,
    L: StatusChangeLog + ?Sized,
    T: TaskTypeRepository + ?Sized,
    U: UserDirectory + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(
        tasks: Arc<R>,
        status_log: Arc<L>,
        task_types: Arc<T>,
        users: Arc<U>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            status_log,
            task_types,
            users,
            clock,
            engine: WorkflowEngine::new(),
        }
    }

    /// Creates an open task at the start status with no fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskTypeNotFound`] or
    /// [`TaskLifecycleError::UserNotFound`] for unknown references, or a
    /// persistence error.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let CreateTaskRequest {
            task_type_id,
            assignee_id,
        } = request;

        if self.task_types.find_by_id(task_type_id).await?.is_none() {
            return Err(TaskLifecycleError::TaskTypeNotFound(task_type_id));
        }
        self.require_user(assignee_id).await?;

        let task = Task::new(task_type_id, assignee_id, &*self.clock);
        self.tasks.store(&task).await?;
        info!(
            task_id = %task.id(),
            task_type_id = %task_type_id,
            assignee_id = %assignee_id,
            "created task"
        );
        Ok(task)
    }

    /// Moves a task to another status, reassigns it and merges the supplied
    /// fields.
    ///
    /// The history entry is appended before the task is updated. Closed
    /// tasks are refused before the status number or the fields are looked
    /// at.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`],
    /// [`TaskLifecycleError::InvalidStatus`],
    /// [`TaskDomainError::FieldsNotAnObject`], a
    /// [`TaskLifecycleError::Rejected`] workflow decision,
    /// [`TaskLifecycleError::UserNotFound`] for an unknown next assignee, or
    /// a persistence error.
    pub async fn change_status(&self, request: ChangeStatusRequest) -> TaskLifecycleResult<Task> {
        let ChangeStatusRequest {
            task_id,
            new_status,
            next_assignee_id,
            fields: raw_fields,
        } = request;

        let mut task = self.load_task(task_id).await?;
        self.engine.ensure_open(&task).inspect_err(|rejection| {
            debug!(task_id = %task_id, %rejection, "status change rejected");
        })?;
        let target = StatusNumber::new(new_status)
            .map_err(|_| TaskLifecycleError::InvalidStatus(new_status))?;
        let fields = TaskFields::from_json(raw_fields)?;
        let task_type = self.task_types.find_by_id(task.task_type_id()).await?;

        let approval = self
            .engine
            .validate_status_change(&task, task_type.as_ref(), target, &fields)
            .inspect_err(|rejection| {
                debug!(task_id = %task_id, %rejection, "status change rejected");
            })?;
        self.require_user(next_assignee_id).await?;

        let entry = task.apply_status_change(approval, next_assignee_id, &*self.clock)?;
        self.status_log.append(&entry).await?;
        self.tasks.update(&task).await?;
        info!(
            task_id = %task_id,
            from_status = %entry.from_status(),
            to_status = %entry.to_status(),
            assignee_id = %next_assignee_id,
            "changed task status"
        );
        Ok(task)
    }

    /// Closes a task that sits at its type's final status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`], a
    /// [`TaskLifecycleError::Rejected`] workflow decision, or a persistence
    /// error.
    pub async fn close_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        let mut task = self.load_task(task_id).await?;
        let task_type = self.task_types.find_by_id(task.task_type_id()).await?;

        let approval = self
            .engine
            .validate_task_closure(&task, task_type.as_ref())
            .inspect_err(|rejection| {
                debug!(task_id = %task_id, %rejection, "closure rejected");
            })?;

        task.close(approval, &*self.clock)?;
        self.tasks.update(&task).await?;
        info!(task_id = %task_id, status = %task.status(), "closed task");
        Ok(task)
    }

    /// Returns all tasks, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn list_tasks(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.tasks.list_all().await?)
    }

    /// Returns the tasks assigned to `user_id`, most recently updated first.
    ///
    /// Unknown users simply have no tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn list_tasks_for_user(&self, user_id: UserId) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.tasks.find_by_assignee(user_id).await?)
    }

    /// Returns a task with its type and status history.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] or a persistence error.
    pub async fn task_detail(&self, task_id: TaskId) -> TaskLifecycleResult<TaskDetail> {
        let task = self.load_task(task_id).await?;
        let task_type = self.task_types.find_by_id(task.task_type_id()).await?;
        let status_changes = self.status_log.list_for_task(task_id).await?;
        Ok(TaskDetail {
            task,
            task_type,
            status_changes,
        })
    }

    async fn load_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(task_id))
    }

    async fn require_user(&self, user_id: UserId) -> TaskLifecycleResult<()> {
        if self.users.exists(user_id).await? {
            Ok(())
        } else {
            Err(TaskLifecycleError::UserNotFound(user_id))
        }
    }
}
