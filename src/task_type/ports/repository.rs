//! Repository port for task type persistence and lookup.

use crate::task_type::domain::{TaskType, TaskTypeId, TaskTypeName};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task type repository operations.
pub type TaskTypeRepositoryResult<T> = Result<T, TaskTypeRepositoryError>;

/// Task type persistence contract.
///
/// Task types are immutable once registered, so the contract has no update
/// operation.
#[async_trait]
pub trait TaskTypeRepository: Send + Sync {
    /// Stores a new task type.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTypeRepositoryError::DuplicateTaskType`] when the ID
    /// already exists or [`TaskTypeRepositoryError::DuplicateTaskTypeName`]
    /// when the name is already registered.
    async fn register(&self, task_type: &TaskType) -> TaskTypeRepositoryResult<()>;

    /// Finds a task type by identifier.
    ///
    /// Returns `None` when the task type does not exist.
    async fn find_by_id(&self, id: TaskTypeId) -> TaskTypeRepositoryResult<Option<TaskType>>;

    /// Finds a task type by unique name.
    ///
    /// Returns `None` when no task type has the given name.
    async fn find_by_name(&self, name: &TaskTypeName)
    -> TaskTypeRepositoryResult<Option<TaskType>>;

    /// Returns all registered task types ordered by name.
    async fn list_all(&self) -> TaskTypeRepositoryResult<Vec<TaskType>>;
}

/// Errors returned by task type repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskTypeRepositoryError {
    /// A task type with the same identifier already exists.
    #[error("duplicate task type identifier: {0}")]
    DuplicateTaskType(TaskTypeId),

    /// A task type with the same name already exists.
    #[error("duplicate task type name: {0}")]
    DuplicateTaskTypeName(TaskTypeName),

    /// A stored workflow configuration could not be parsed back into domain
    /// types. This indicates corrupted setup data.
    #[error("invalid persisted task type data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskTypeRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns `true` when the error reports corrupted stored configuration.
    #[must_use]
    pub const fn is_integrity_failure(&self) -> bool {
        matches!(self, Self::InvalidPersistedData(_))
    }
}
