//! Task aggregate root.

use super::{
    ApprovedClosure, ApprovedStatusChange, StatusChangeEntry, TaskDomainError, TaskFields, TaskId,
};
use crate::task_type::domain::{StatusNumber, TaskTypeId};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
///
/// A task starts open at [`StatusNumber::START`] with no fields. Status,
/// assignee, fields and the closed flag only change through approvals
/// issued by [`super::WorkflowEngine`]; once closed the task is frozen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    task_type_id: TaskTypeId,
    assigned_user_id: UserId,
    status: StatusNumber,
    is_closed: bool,
    fields: TaskFields,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Task type the task follows.
    pub task_type_id: TaskTypeId,
    /// Current assignee.
    pub assigned_user_id: UserId,
    /// Current status.
    pub status: StatusNumber,
    /// Whether the task has been closed.
    pub is_closed: bool,
    /// Accumulated fields.
    pub fields: TaskFields,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates an open task at the start status.
    #[must_use]
    pub fn new(task_type_id: TaskTypeId, assigned_user_id: UserId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            task_type_id,
            assigned_user_id,
            status: StatusNumber::START,
            is_closed: false,
            fields: TaskFields::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            task_type_id: data.task_type_id,
            assigned_user_id: data.assigned_user_id,
            status: data.status,
            is_closed: data.is_closed,
            fields: data.fields,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task type identifier.
    #[must_use]
    pub const fn task_type_id(&self) -> TaskTypeId {
        self.task_type_id
    }

    /// Returns the current assignee.
    #[must_use]
    pub const fn assigned_user_id(&self) -> UserId {
        self.assigned_user_id
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> StatusNumber {
        self.status
    }

    /// Returns `true` once the task has been closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.is_closed
    }

    /// Returns the accumulated fields.
    #[must_use]
    pub const fn fields(&self) -> &TaskFields {
        &self.fields
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

    /// Applies an approved status change and returns the history entry to
    /// append.
    ///
    /// The approved fields are merged into the existing ones; nothing is
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::StaleApproval`] when the approval was
    /// issued for another task, or the task has moved or closed since.
    pub fn apply_status_change(
        &mut self,
        approval: ApprovedStatusChange,
        next_assignee: UserId,
        clock: &impl Clock,
    ) -> Result<StatusChangeEntry, TaskDomainError> {
        if approval.task_id() != self.id
            || approval.from_status() != self.status
            || self.is_closed
        {
            return Err(TaskDomainError::StaleApproval(self.id));
        }

        let from_status = self.status;
        let to_status = approval.to_status();
        self.touch(clock);
        self.status = to_status;
        self.assigned_user_id = next_assignee;
        self.fields.merge(approval.into_fields());

        Ok(StatusChangeEntry::record(
            self.id,
            from_status,
            to_status,
            next_assignee,
            self.updated_at,
        ))
    }

    /// Closes the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::StaleApproval`] when the approval was
    /// issued for another task, or the task has moved or closed since.
    pub fn close(
        &mut self,
        approval: ApprovedClosure,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if approval.task_id() != self.id || approval.status() != self.status || self.is_closed {
            return Err(TaskDomainError::StaleApproval(self.id));
        }
        self.is_closed = true;
        self.touch(clock);
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
