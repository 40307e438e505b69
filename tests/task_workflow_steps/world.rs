//! Shared world state for task workflow BDD scenarios.

use std::sync::Arc;

use eyre::eyre;
use mockable::DefaultClock;
use rstest::fixture;
use serde_json::Value;
use taskflow::bootstrap::Backends;
use taskflow::http::{SharedTaskLifecycleService, SharedTaskTypeRegistryService};
use taskflow::task::{
    domain::{Task, TaskFields},
    services::TaskLifecycleError,
};
use taskflow::user::{
    domain::{EmailAddress, UserId},
    ports::UserDirectory,
};

/// Scenario world for task workflow behaviour tests.
pub struct TaskWorkflowWorld {
    pub backends: Backends,
    pub lifecycle: SharedTaskLifecycleService,
    pub registry: SharedTaskTypeRegistryService,
    pub current_task: Option<Task>,
    pub last_change: Option<Result<Task, TaskLifecycleError>>,
    pub last_closure: Option<Result<Task, TaskLifecycleError>>,
}

impl TaskWorkflowWorld {
    /// Creates a world over empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let backends = Backends::in_memory();
        let lifecycle = backends.lifecycle(&clock);
        let registry = backends.registry(&clock);
        Self {
            backends,
            lifecycle,
            registry,
            current_task: None,
            last_change: None,
            last_closure: None,
        }
    }

    /// Returns the task created by the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.current_task
            .as_ref()
            .ok_or_else(|| eyre!("missing task in scenario world"))
    }

    /// Resolves a seeded user by email.
    ///
    /// # Errors
    ///
    /// Returns an error when the email is malformed or unknown.
    pub fn user_id(&self, email: &str) -> Result<UserId, eyre::Report> {
        let address = EmailAddress::new(email)?;
        let user = run_async(self.backends.users.find_by_email(&address))?
            .ok_or_else(|| eyre!("unknown scenario user {email}"))?;
        Ok(user.id())
    }
}

impl Default for TaskWorkflowWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskWorkflowWorld {
    TaskWorkflowWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses `name=value` pairs separated by commas. Values that parse as JSON
/// keep their JSON type; everything else is a string.
pub fn parse_fields(pairs: &str) -> TaskFields {
    pairs
        .split(',')
        .filter_map(|pair| pair.split_once('='))
        .map(|(name, raw)| {
            let value = serde_json::from_str(raw.trim())
                .unwrap_or_else(|_| Value::String(raw.trim().to_owned()));
            (name.trim().to_owned(), value)
        })
        .collect()
}
