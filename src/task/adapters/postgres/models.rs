//! Diesel row models for task persistence.

use super::schema::{task_status_changes, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result and insert row for task records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Task type identifier.
    pub task_type_id: uuid::Uuid,
    /// Current assignee.
    pub assigned_user_id: uuid::Uuid,
    /// Current status.
    pub status: i32,
    /// Closed flag.
    pub is_closed: bool,
    /// Fields JSON object.
    pub fields: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result and insert row for status change entries.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_status_changes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StatusChangeRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Task identifier.
    pub task_id: uuid::Uuid,
    /// Status before the transition.
    pub from_status: i32,
    /// Status after the transition.
    pub to_status: i32,
    /// Assignee after the transition.
    pub assigned_user_id: uuid::Uuid,
    /// Time the transition was accepted.
    pub changed_at: DateTime<Utc>,
}
