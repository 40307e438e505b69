//! Shared helpers for in-memory workflow integration tests.

use std::sync::Arc;

use eyre::WrapErr;
use mockable::DefaultClock;
use taskflow::bootstrap::{Backends, SeedPlan, apply_seed_plan};
use taskflow::http::{SharedTaskLifecycleService, SharedTaskTypeRegistryService};
use taskflow::task_type::domain::TaskType;
use taskflow::user::domain::{EmailAddress, User};
use taskflow::user::ports::UserDirectory;

/// Services wired to freshly seeded in-memory storage.
pub struct SeededWorkflow {
    /// Storage backends shared by both services.
    pub backends: Backends,
    /// Task lifecycle service.
    pub lifecycle: SharedTaskLifecycleService,
    /// Task type registry service.
    pub registry: SharedTaskTypeRegistryService,
}

impl SeededWorkflow {
    /// Seeds the stock plan into in-memory storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the stock plan cannot be parsed or applied.
    pub async fn stock() -> eyre::Result<Self> {
        let clock = Arc::new(DefaultClock);
        let backends = Backends::in_memory();
        let registry = backends.registry(&clock);
        apply_seed_plan(&SeedPlan::stock()?, &registry, backends.users.as_ref())
            .await
            .wrap_err("seed stock plan")?;
        let lifecycle = backends.lifecycle(&clock);
        Ok(Self {
            backends,
            lifecycle,
            registry,
        })
    }

    /// Looks up a seeded task type by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the task type is not registered.
    pub async fn task_type(&self, name: &str) -> eyre::Result<TaskType> {
        self.registry
            .find_by_name(name)
            .await?
            .ok_or_else(|| eyre::eyre!("seeded task type {name} is missing"))
    }

    /// Looks up a seeded user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist.
    pub async fn user(&self, email: &str) -> eyre::Result<User> {
        self.backends
            .users
            .find_by_email(&EmailAddress::new(email)?)
            .await?
            .ok_or_else(|| eyre::eyre!("seeded user {email} is missing"))
    }
}
