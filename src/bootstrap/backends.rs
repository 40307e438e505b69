//! Storage backend selection.

use crate::http::{AppState, SharedTaskLifecycleService, SharedTaskTypeRegistryService};
use crate::task::{
    adapters::{
        memory::{InMemoryStatusChangeLog, InMemoryTaskRepository},
        postgres::{PostgresStatusChangeLog, PostgresTaskRepository},
    },
    ports::{StatusChangeLog, TaskRepository},
};
use crate::task_type::{
    adapters::{
        CachingTaskTypeRepository, memory::InMemoryTaskTypeRepository,
        postgres::PostgresTaskTypeRepository,
    },
    ports::TaskTypeRepository,
};
use crate::user::{
    adapters::{memory::InMemoryUserDirectory, postgres::PostgresUserDirectory},
    ports::UserDirectory,
};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use std::sync::Arc;

/// Type-erased adapters for every port.
#[derive(Clone)]
pub struct Backends {
    /// Task store.
    pub tasks: Arc<dyn TaskRepository>,
    /// Status change history.
    pub status_log: Arc<dyn StatusChangeLog>,
    /// Task type registry.
    pub task_types: Arc<dyn TaskTypeRepository>,
    /// User directory.
    pub users: Arc<dyn UserDirectory>,
}

impl Backends {
    /// Volatile in-process storage.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            tasks: Arc::new(InMemoryTaskRepository::new()),
            status_log: Arc::new(InMemoryStatusChangeLog::new()),
            task_types: Arc::new(InMemoryTaskTypeRepository::new()),
            users: Arc::new(InMemoryUserDirectory::new()),
        }
    }

    /// `PostgreSQL` storage sharing one pool. Task types are read through a
    /// cache so stored configurations are parsed once.
    #[must_use]
    pub fn postgres(pool: &Pool<ConnectionManager<PgConnection>>) -> Self {
        let task_types = Arc::new(PostgresTaskTypeRepository::new(pool.clone()));
        Self {
            tasks: Arc::new(PostgresTaskRepository::new(pool.clone())),
            status_log: Arc::new(PostgresStatusChangeLog::new(pool.clone())),
            task_types: Arc::new(CachingTaskTypeRepository::new(task_types)),
            users: Arc::new(PostgresUserDirectory::new(pool.clone())),
        }
    }

    /// Builds the task type registry service.
    #[must_use]
    pub fn registry(&self, clock: &Arc<DefaultClock>) -> SharedTaskTypeRegistryService {
        SharedTaskTypeRegistryService::new(Arc::clone(&self.task_types), Arc::clone(clock))
    }

    /// Builds the task lifecycle service.
    #[must_use]
    pub fn lifecycle(&self, clock: &Arc<DefaultClock>) -> SharedTaskLifecycleService {
        SharedTaskLifecycleService::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.status_log),
            Arc::clone(&self.task_types),
            Arc::clone(&self.users),
            Arc::clone(clock),
        )
    }

    /// Builds the HTTP handler state.
    #[must_use]
    pub fn app_state(&self, clock: &Arc<DefaultClock>) -> AppState {
        AppState::new(self.lifecycle(clock), self.registry(clock))
    }
}
