//! Seed plans for stock task types and demo users.

use super::BootstrapError;
use crate::task_type::{
    domain::WorkflowConfig,
    ports::TaskTypeRepository,
    services::{RegisterTaskTypeRequest, TaskTypeRegistryService},
};
use crate::user::{
    domain::{EmailAddress, User},
    ports::UserDirectory,
};
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Seed document registering the `procurement` and `development` task types
/// and four demo users.
pub const DEFAULT_SEED_YAML: &str = include_str!("../../seed/default.yaml");

/// A user to create when no user has the same email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedUser {
    /// Display name.
    pub name: String,
    /// Email address, unique per user.
    pub email: String,
}

/// A task type to register when the name is free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedTaskType {
    /// Task type name.
    pub name: String,
    /// Workflow configuration.
    pub workflow: WorkflowConfig,
}

/// Users and task types to create at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPlan {
    /// Users to create.
    #[serde(default)]
    pub users: Vec<SeedUser>,
    /// Task types to register.
    #[serde(default)]
    pub task_types: Vec<SeedTaskType>,
}

impl SeedPlan {
    /// Parses a YAML seed document.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::ParseSeed`] for malformed documents,
    /// including workflow configurations that break their invariants.
    pub fn from_yaml(document: &str) -> Result<Self, BootstrapError> {
        Ok(serde_yaml::from_str(document)?)
    }

    /// Returns the stock plan.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::ParseSeed`] if the bundled document is
    /// malformed.
    pub fn stock() -> Result<Self, BootstrapError> {
        Self::from_yaml(DEFAULT_SEED_YAML)
    }
}

/// Outcome of applying a [`SeedPlan`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Users created.
    pub users_created: usize,
    /// Users skipped because their email already existed.
    pub users_skipped: usize,
    /// Task types registered.
    pub task_types_created: usize,
    /// Task types skipped because their name already existed.
    pub task_types_skipped: usize,
}

/// Reads a seed plan from a YAML file.
///
/// # Errors
///
/// Returns [`BootstrapError::InvalidSeedPath`] when `path` has no file name,
/// [`BootstrapError::ReadSeed`] when the file cannot be read and
/// [`BootstrapError::ParseSeed`] when its content is malformed.
pub fn load_seed_plan(path: &Utf8Path) -> Result<SeedPlan, BootstrapError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| BootstrapError::InvalidSeedPath(path.to_owned()))?;
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));

    let read_error = |source| BootstrapError::ReadSeed {
        path: path.to_owned(),
        source,
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let document = dir.read_to_string(file_name).map_err(read_error)?;
    SeedPlan::from_yaml(&document)
}

/// Creates the users and task types of `plan` that do not exist yet.
///
/// Users are matched by email and task types by name, so applying the same
/// plan twice creates nothing the second time.
///
/// # Errors
///
/// Returns the first validation or storage failure.
pub async fn apply_seed_plan<R, C, U>(
    plan: &SeedPlan,
    registry: &TaskTypeRegistryService<R, C>,
    users: &U,
) -> Result<SeedReport, BootstrapError>
where
    R: TaskTypeRepository + ?Sized,
    C: Clock + Send + Sync,
    U: UserDirectory + ?Sized,
{
    let mut report = SeedReport::default();

    for seed_user in &plan.users {
        let email = EmailAddress::new(seed_user.email.as_str())?;
        if users.find_by_email(&email).await?.is_some() {
            debug!(%email, "user already exists; skipping");
            report.users_skipped += 1;
            continue;
        }
        let user = User::new(seed_user.name.as_str(), email)?;
        users.store(&user).await?;
        report.users_created += 1;
    }

    for seed_type in &plan.task_types {
        if registry.find_by_name(&seed_type.name).await?.is_some() {
            debug!(task_type_name = %seed_type.name, "task type already exists; skipping");
            report.task_types_skipped += 1;
            continue;
        }
        let request =
            RegisterTaskTypeRequest::new(seed_type.name.as_str(), seed_type.workflow.clone());
        registry.register(request).await?;
        report.task_types_created += 1;
    }

    info!(
        users_created = report.users_created,
        users_skipped = report.users_skipped,
        task_types_created = report.task_types_created,
        task_types_skipped = report.task_types_skipped,
        "applied seed plan"
    );
    Ok(report)
}
