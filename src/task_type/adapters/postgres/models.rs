//! Diesel row models for task type persistence.

use super::schema::task_types;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task type records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_types)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskTypeRow {
    /// Internal task type identifier.
    pub id: uuid::Uuid,
    /// Unique task type name.
    pub name: String,
    /// Workflow configuration JSON payload.
    pub status_config: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task type records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_types)]
pub struct NewTaskTypeRow {
    /// Internal task type identifier.
    pub id: uuid::Uuid,
    /// Unique task type name.
    pub name: String,
    /// Workflow configuration JSON payload.
    pub status_config: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
