//! Read-through cache for parsed task types.
//!
//! Workflow configuration is parsed when a row is loaded. Wrapping a
//! repository in [`CachingTaskTypeRepository`] keeps the parsed value so each
//! status-change request does not reload and re-parse it.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

use crate::task_type::{
    domain::{TaskType, TaskTypeId, TaskTypeName},
    ports::{TaskTypeRepository, TaskTypeRepositoryError, TaskTypeRepositoryResult},
};

/// Task type repository decorator caching parsed task types by id and name.
pub struct CachingTaskTypeRepository<R: ?Sized> {
    inner: Arc<R>,
    cache: RwLock<CacheState>,
}

#[derive(Debug, Default)]
struct CacheState {
    by_id: HashMap<TaskTypeId, TaskType>,
    name_index: HashMap<TaskTypeName, TaskTypeId>,
}

impl CacheState {
    fn insert(&mut self, task_type: &TaskType) {
        self.name_index
            .insert(task_type.name().clone(), task_type.id());
        self.by_id.insert(task_type.id(), task_type.clone());
    }

    fn remove(&mut self, id: TaskTypeId) {
        if let Some(task_type) = self.by_id.remove(&id) {
            self.name_index.remove(task_type.name());
        }
    }
}

impl<R> CachingTaskTypeRepository<R>
where
    R: TaskTypeRepository + ?Sized,
{
    /// Wraps `inner` with an empty cache.
    #[must_use]
    pub fn new(inner: Arc<R>) -> Self {
        Self {
            inner,
            cache: RwLock::new(CacheState::default()),
        }
    }

    /// Drops the cached entry for `id`, forcing the next lookup to reload
    /// the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTypeRepositoryError::Persistence`] when the cache lock
    /// is poisoned.
    pub fn invalidate(&self, id: TaskTypeId) -> TaskTypeRepositoryResult<()> {
        self.cache.write().map_err(lock_error)?.remove(id);
        Ok(())
    }

    fn cached_by_id(&self, id: TaskTypeId) -> TaskTypeRepositoryResult<Option<TaskType>> {
        let cache = self.cache.read().map_err(lock_error)?;
        Ok(cache.by_id.get(&id).cloned())
    }

    fn cached_by_name(&self, name: &TaskTypeName) -> TaskTypeRepositoryResult<Option<TaskType>> {
        let cache = self.cache.read().map_err(lock_error)?;
        Ok(cache
            .name_index
            .get(name)
            .and_then(|id| cache.by_id.get(id))
            .cloned())
    }

    fn remember(&self, task_type: &TaskType) -> TaskTypeRepositoryResult<()> {
        self.cache.write().map_err(lock_error)?.insert(task_type);
        Ok(())
    }
}

fn lock_error(err: impl ToString) -> TaskTypeRepositoryError {
    TaskTypeRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl<R> TaskTypeRepository for CachingTaskTypeRepository<R>
where
    R: TaskTypeRepository + ?Sized,
{
    async fn register(&self, task_type: &TaskType) -> TaskTypeRepositoryResult<()> {
        self.inner.register(task_type).await?;
        self.remember(task_type)
    }

    async fn find_by_id(&self, id: TaskTypeId) -> TaskTypeRepositoryResult<Option<TaskType>> {
        if let Some(task_type) = self.cached_by_id(id)? {
            return Ok(Some(task_type));
        }
        debug!(task_type_id = %id, "task type cache miss");
        let loaded = self.inner.find_by_id(id).await?;
        if let Some(ref task_type) = loaded {
            self.remember(task_type)?;
        }
        Ok(loaded)
    }

    async fn find_by_name(
        &self,
        name: &TaskTypeName,
    ) -> TaskTypeRepositoryResult<Option<TaskType>> {
        if let Some(task_type) = self.cached_by_name(name)? {
            return Ok(Some(task_type));
        }
        debug!(task_type_name = %name, "task type cache miss");
        let loaded = self.inner.find_by_name(name).await?;
        if let Some(ref task_type) = loaded {
            self.remember(task_type)?;
        }
        Ok(loaded)
    }

    async fn list_all(&self) -> TaskTypeRepositoryResult<Vec<TaskType>> {
        let task_types = self.inner.list_all().await?;
        for task_type in &task_types {
            self.remember(task_type)?;
        }
        Ok(task_types)
    }
}
