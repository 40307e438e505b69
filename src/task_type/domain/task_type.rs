//! Task type aggregate root.

use super::{TaskTypeId, TaskTypeName, WorkflowConfig};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Registered task type: a unique name bound to a workflow configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskType {
    id: TaskTypeId,
    name: TaskTypeName,
    workflow: WorkflowConfig,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskTypeData {
    /// Persisted task type identifier.
    pub id: TaskTypeId,
    /// Persisted unique name.
    pub name: TaskTypeName,
    /// Parsed workflow configuration.
    pub workflow: WorkflowConfig,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TaskType {
    /// Creates a new task type.
    #[must_use]
    pub fn new(name: TaskTypeName, workflow: WorkflowConfig, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskTypeId::new(),
            name,
            workflow,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task type from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskTypeData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            workflow: data.workflow,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task type identifier.
    #[must_use]
    pub const fn id(&self) -> TaskTypeId {
        self.id
    }

    /// Returns the unique task type name.
    #[must_use]
    pub const fn name(&self) -> &TaskTypeName {
        &self.name
    }

    /// Returns the workflow configuration.
    #[must_use]
    pub const fn workflow(&self) -> &WorkflowConfig {
        &self.workflow
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
