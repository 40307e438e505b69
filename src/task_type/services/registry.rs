//! Service layer for task type registration and discovery.

use crate::task_type::{
    domain::{TaskType, TaskTypeDomainError, TaskTypeId, TaskTypeName, WorkflowConfig},
    ports::{TaskTypeRepository, TaskTypeRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for registering a task type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterTaskTypeRequest {
    name: String,
    workflow: WorkflowConfig,
}

impl RegisterTaskTypeRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(name: impl Into<String>, workflow: WorkflowConfig) -> Self {
        Self {
            name: name.into(),
            workflow,
        }
    }
}

/// Service-level errors for task type registry operations.
#[derive(Debug, Error)]
pub enum TaskTypeRegistryServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskTypeDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskTypeRepositoryError),
}

/// Result type for task type registry service operations.
pub type TaskTypeRegistryServiceResult<T> = Result<T, TaskTypeRegistryServiceError>;

/// Task type registration and discovery service.
pub struct TaskTypeRegistryService<R, C>
where
    R: TaskTypeRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for TaskTypeRegistryService<R, C>
where
    R: TaskTypeRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskTypeRegistryService<R, C>
where
    R: TaskTypeRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new task type registry service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new task type.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTypeRegistryServiceError::Domain`] when the name is
    /// invalid, or [`TaskTypeRegistryServiceError::Repository`] when the name
    /// is already taken or persistence fails.
    pub async fn register(
        &self,
        request: RegisterTaskTypeRequest,
    ) -> TaskTypeRegistryServiceResult<TaskType> {
        let RegisterTaskTypeRequest { name, workflow } = request;
        let task_type_name = TaskTypeName::new(name)?;
        let task_type = TaskType::new(task_type_name, workflow, &*self.clock);
        self.repository.register(&task_type).await?;
        info!(
            task_type_id = %task_type.id(),
            task_type_name = %task_type.name(),
            final_status = %task_type.workflow().final_status(),
            "registered task type"
        );
        Ok(task_type)
    }

    /// Finds a task type by identifier.
    ///
    /// Returns `Ok(None)` when no task type has the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTypeRegistryServiceError::Repository`] when persistence
    /// lookup fails or the stored configuration is malformed.
    pub async fn find_by_id(
        &self,
        id: TaskTypeId,
    ) -> TaskTypeRegistryServiceResult<Option<TaskType>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Finds a task type by unique name.
    ///
    /// Returns `Ok(None)` when no task type has the given name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTypeRegistryServiceError::Domain`] when the name string
    /// fails validation, or [`TaskTypeRegistryServiceError::Repository`] when
    /// persistence lookup fails.
    pub async fn find_by_name(
        &self,
        name: &str,
    ) -> TaskTypeRegistryServiceResult<Option<TaskType>> {
        let task_type_name = TaskTypeName::new(name)?;
        Ok(self.repository.find_by_name(&task_type_name).await?)
    }

    /// Returns all registered task types ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTypeRegistryServiceError::Repository`] when persistence
    /// lookup fails.
    pub async fn list_all(&self) -> TaskTypeRegistryServiceResult<Vec<TaskType>> {
        Ok(self.repository.list_all().await?)
    }
}
