//! In-memory task type repository for tests and database-less runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task_type::{
    domain::{TaskType, TaskTypeId, TaskTypeName},
    ports::{TaskTypeRepository, TaskTypeRepositoryError, TaskTypeRepositoryResult},
};

/// Thread-safe in-memory task type repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskTypeRepository {
    state: Arc<RwLock<InMemoryTaskTypeState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskTypeState {
    task_types: HashMap<TaskTypeId, TaskType>,
    name_index: HashMap<TaskTypeName, TaskTypeId>,
}

impl InMemoryTaskTypeRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> TaskTypeRepositoryError {
    TaskTypeRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskTypeRepository for InMemoryTaskTypeRepository {
    async fn register(&self, task_type: &TaskType) -> TaskTypeRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;

        if state.task_types.contains_key(&task_type.id()) {
            return Err(TaskTypeRepositoryError::DuplicateTaskType(task_type.id()));
        }

        if state.name_index.contains_key(task_type.name()) {
            return Err(TaskTypeRepositoryError::DuplicateTaskTypeName(
                task_type.name().clone(),
            ));
        }

        state
            .name_index
            .insert(task_type.name().clone(), task_type.id());
        state.task_types.insert(task_type.id(), task_type.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskTypeId) -> TaskTypeRepositoryResult<Option<TaskType>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.task_types.get(&id).cloned())
    }

    async fn find_by_name(
        &self,
        name: &TaskTypeName,
    ) -> TaskTypeRepositoryResult<Option<TaskType>> {
        let state = self.state.read().map_err(lock_error)?;
        let task_type = state
            .name_index
            .get(name)
            .and_then(|id| state.task_types.get(id))
            .cloned();
        Ok(task_type)
    }

    async fn list_all(&self) -> TaskTypeRepositoryResult<Vec<TaskType>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut task_types: Vec<TaskType> = state.task_types.values().cloned().collect();
        task_types.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(task_types)
    }
}
