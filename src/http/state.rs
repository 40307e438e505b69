//! Shared handler state.

use crate::task::{
    ports::{StatusChangeLog, TaskRepository},
    services::TaskLifecycleService,
};
use crate::task_type::{ports::TaskTypeRepository, services::TaskTypeRegistryService};
use crate::user::ports::UserDirectory;
use mockable::DefaultClock;

/// Lifecycle service over type-erased adapters.
pub type SharedTaskLifecycleService = TaskLifecycleService<
    dyn TaskRepository,
    dyn StatusChangeLog,
    dyn TaskTypeRepository,
    dyn UserDirectory,
    DefaultClock,
>;

/// Registry service over a type-erased repository.
pub type SharedTaskTypeRegistryService = TaskTypeRegistryService<dyn TaskTypeRepository, DefaultClock>;

/// Services available to every handler.
#[derive(Clone)]
pub struct AppState {
    lifecycle: SharedTaskLifecycleService,
    registry: SharedTaskTypeRegistryService,
}

impl AppState {
    /// Bundles the services handlers dispatch to.
    #[must_use]
    pub const fn new(
        lifecycle: SharedTaskLifecycleService,
        registry: SharedTaskTypeRegistryService,
    ) -> Self {
        Self {
            lifecycle,
            registry,
        }
    }

    /// Returns the task lifecycle service.
    #[must_use]
    pub const fn lifecycle(&self) -> &SharedTaskLifecycleService {
        &self.lifecycle
    }

    /// Returns the task type registry service.
    #[must_use]
    pub const fn registry(&self) -> &SharedTaskTypeRegistryService {
        &self.registry
    }
}
