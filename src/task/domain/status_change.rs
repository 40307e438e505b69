//! Append-only status change history entries.

use super::{StatusChangeId, TaskId};
use crate::task_type::domain::StatusNumber;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One accepted status transition of a task.
///
/// Entries are only produced by [`super::Task::apply_status_change`]; closing
/// a task never writes one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChangeEntry {
    id: StatusChangeId,
    task_id: TaskId,
    from_status: StatusNumber,
    to_status: StatusNumber,
    assigned_user_id: UserId,
    changed_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted status change entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedStatusChangeData {
    /// Persisted entry identifier.
    pub id: StatusChangeId,
    /// Task the transition belongs to.
    pub task_id: TaskId,
    /// Status before the transition.
    pub from_status: StatusNumber,
    /// Status after the transition.
    pub to_status: StatusNumber,
    /// Assignee after the transition.
    pub assigned_user_id: UserId,
    /// Time the transition was accepted.
    pub changed_at: DateTime<Utc>,
}

impl StatusChangeEntry {
    pub(super) fn record(
        task_id: TaskId,
        from_status: StatusNumber,
        to_status: StatusNumber,
        assigned_user_id: UserId,
        changed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: StatusChangeId::new(),
            task_id,
            from_status,
            to_status,
            assigned_user_id,
            changed_at,
        }
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedStatusChangeData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            from_status: data.from_status,
            to_status: data.to_status,
            assigned_user_id: data.assigned_user_id,
            changed_at: data.changed_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> StatusChangeId {
        self.id
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the status before the transition.
    #[must_use]
    pub const fn from_status(&self) -> StatusNumber {
        self.from_status
    }

    /// Returns the status after the transition.
    #[must_use]
    pub const fn to_status(&self) -> StatusNumber {
        self.to_status
    }

    /// Returns the assignee after the transition.
    #[must_use]
    pub const fn assigned_user_id(&self) -> UserId {
        self.assigned_user_id
    }

    /// Returns the time the transition was accepted.
    #[must_use]
    pub const fn changed_at(&self) -> DateTime<Utc> {
        self.changed_at
    }
}
