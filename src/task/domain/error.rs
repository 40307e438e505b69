//! Error types for task domain validation.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// Task fields must be supplied as a JSON object.
    #[error("task fields must be a JSON object, found {0}")]
    FieldsNotAnObject(&'static str),

    /// An approval was applied to a task other than the one it was issued
    /// for, or the task changed after the approval was issued.
    #[error("approval does not match the current state of task {0}")]
    StaleApproval(TaskId),
}
