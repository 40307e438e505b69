//! Transition and closure rules for task workflows.
//!
//! Evaluation is stateless: legality is recomputed from the task and its
//! type's [`WorkflowConfig`](crate::task_type::domain::WorkflowConfig) on
//! every call. Accepted evaluations yield approval tokens that only this
//! module can construct.

use super::{Task, TaskFields, TaskId};
use crate::task_type::domain::{FieldName, StatusNumber, TaskType, TaskTypeId};
use thiserror::Error;

/// Category of a workflow rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionKind {
    /// The task no longer accepts the requested operation.
    Forbidden,
    /// The request does not satisfy the workflow rules.
    Invalid,
}

/// Reason a status change or closure was refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowRejection {
    /// Closed tasks accept no further status changes.
    #[error("task {task_id} is closed and cannot change status")]
    ClosedTaskImmutable {
        /// Task the change was requested for.
        task_id: TaskId,
    },

    /// The task has already been closed.
    #[error("task {task_id} is already closed")]
    AlreadyClosed {
        /// Task the closure was requested for.
        task_id: TaskId,
    },

    /// The task's type could not be resolved.
    #[error("task type {task_type_id} not found")]
    TaskTypeNotFound {
        /// Task type the task refers to.
        task_type_id: TaskTypeId,
    },

    /// Forward moves must advance exactly one status.
    #[error("cannot move from status {current} to {attempted}: statuses advance one at a time")]
    SkippedStatus {
        /// Status the task is at.
        current: StatusNumber,
        /// Status that was requested.
        attempted: StatusNumber,
    },

    /// A field required by the target status was absent or empty.
    #[error("missing required field {field} for status {status}")]
    MissingRequiredField {
        /// First required field without a present value.
        field: FieldName,
        /// Status that requires the field.
        status: StatusNumber,
    },

    /// Only tasks at their type's final status can be closed.
    #[error("task is at status {current}; it must reach final status {final_status} to close")]
    NotAtFinalStatus {
        /// Status the task is at.
        current: StatusNumber,
        /// Final status of the task's type.
        final_status: StatusNumber,
    },
}

impl WorkflowRejection {
    /// Returns the rejection category.
    #[must_use]
    pub const fn kind(&self) -> RejectionKind {
        match self {
            Self::ClosedTaskImmutable { .. } | Self::AlreadyClosed { .. } => {
                RejectionKind::Forbidden
            }
            Self::TaskTypeNotFound { .. }
            | Self::SkippedStatus { .. }
            | Self::MissingRequiredField { .. }
            | Self::NotAtFinalStatus { .. } => RejectionKind::Invalid,
        }
    }
}

/// Proof that a status change was accepted by [`WorkflowEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovedStatusChange {
    task_id: TaskId,
    from_status: StatusNumber,
    to_status: StatusNumber,
    fields: TaskFields,
}

impl ApprovedStatusChange {
    /// Returns the task the approval was issued for.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the status the task was at when evaluated.
    #[must_use]
    pub const fn from_status(&self) -> StatusNumber {
        self.from_status
    }

    /// Returns the approved target status.
    #[must_use]
    pub const fn to_status(&self) -> StatusNumber {
        self.to_status
    }

    /// Returns the fields that satisfied the target status.
    #[must_use]
    pub const fn fields(&self) -> &TaskFields {
        &self.fields
    }

    pub(super) fn into_fields(self) -> TaskFields {
        self.fields
    }
}

/// Proof that a closure was accepted by [`WorkflowEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApprovedClosure {
    task_id: TaskId,
    status: StatusNumber,
}

impl ApprovedClosure {
    /// Returns the task the approval was issued for.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the final status the task was at when evaluated.
    #[must_use]
    pub const fn status(&self) -> StatusNumber {
        self.status
    }
}

/// Pure decision logic for status changes and closures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkflowEngine;

impl WorkflowEngine {
    /// Creates the engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Refuses any status change on a closed task.
    ///
    /// This is the first check of [`Self::validate_status_change`], exposed
    /// so callers can run it before parsing the rest of a request.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowRejection::ClosedTaskImmutable`] when `task` is
    /// closed.
    pub const fn ensure_open(self, task: &Task) -> Result<(), WorkflowRejection> {
        if task.is_closed() {
            return Err(WorkflowRejection::ClosedTaskImmutable { task_id: task.id() });
        }
        Ok(())
    }

    /// Decides whether `task` may move to `new_status` with `fields`.
    ///
    /// Checks run in order and the first failure wins: closed tasks are
    /// refused, the task type must resolve, forward moves may only advance
    /// by one, and every field the target status requires must be present
    /// in `fields`. Moving backwards or staying put passes sequencing but
    /// still has to satisfy the target status's fields.
    ///
    /// A `task_type` whose identifier differs from the task's is treated as
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns the first [`WorkflowRejection`] that applies.
    pub fn validate_status_change(
        self,
        task: &Task,
        task_type: Option<&TaskType>,
        new_status: StatusNumber,
        fields: &TaskFields,
    ) -> Result<ApprovedStatusChange, WorkflowRejection> {
        self.ensure_open(task)?;
        let resolved = resolve(task, task_type)?;

        let current = task.status();
        if new_status > current && Some(new_status) != current.next() {
            return Err(WorkflowRejection::SkippedStatus {
                current,
                attempted: new_status,
            });
        }

        let missing = resolved
            .workflow()
            .required_fields(new_status)
            .iter()
            .find(|field| !fields.is_supplied(field.as_str()));
        if let Some(field) = missing {
            return Err(WorkflowRejection::MissingRequiredField {
                field: field.clone(),
                status: new_status,
            });
        }

        Ok(ApprovedStatusChange {
            task_id: task.id(),
            from_status: current,
            to_status: new_status,
            fields: fields.clone(),
        })
    }

    /// Decides whether `task` may be closed.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowRejection::AlreadyClosed`],
    /// [`WorkflowRejection::TaskTypeNotFound`] or
    /// [`WorkflowRejection::NotAtFinalStatus`], checked in that order.
    pub fn validate_task_closure(
        self,
        task: &Task,
        task_type: Option<&TaskType>,
    ) -> Result<ApprovedClosure, WorkflowRejection> {
        if task.is_closed() {
            return Err(WorkflowRejection::AlreadyClosed { task_id: task.id() });
        }
        let final_status = resolve(task, task_type)?.workflow().final_status();
        if task.status() != final_status {
            return Err(WorkflowRejection::NotAtFinalStatus {
                current: task.status(),
                final_status,
            });
        }

        Ok(ApprovedClosure {
            task_id: task.id(),
            status: final_status,
        })
    }
}

fn resolve<'a>(
    task: &Task,
    task_type: Option<&'a TaskType>,
) -> Result<&'a TaskType, WorkflowRejection> {
    task_type
        .filter(|candidate| candidate.id() == task.task_type_id())
        .ok_or_else(|| WorkflowRejection::TaskTypeNotFound {
            task_type_id: task.task_type_id(),
        })
}
