//! Error types for task type validation and parsing.

use thiserror::Error;

/// Errors returned while constructing task type domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskTypeDomainError {
    /// The task type name is empty after trimming.
    #[error("task type name must not be empty")]
    EmptyTaskTypeName,

    /// The task type name contains characters outside `[a-z0-9_-]`.
    #[error(
        "task type name '{0}' contains invalid characters (only lowercase alphanumeric, '-' and '_' allowed)"
    )]
    InvalidTaskTypeName(String),

    /// The task type name exceeds the 100-character storage limit.
    #[error("task type name exceeds 100 character limit: {0}")]
    TaskTypeNameTooLong(String),

    /// A status number in the configuration is not positive.
    #[error(transparent)]
    Status(#[from] InvalidStatusNumber),

    /// A configured status lies beyond the final status.
    #[error("status {status} is beyond the final status {final_status}")]
    StatusOutOfRange {
        /// Offending status number.
        status: u32,
        /// Final status of the configuration.
        final_status: u32,
    },

    /// The universal start status was configured with required fields.
    #[error("status 1 is the start status and cannot require fields")]
    StartStatusRequiresFields,

    /// A required field name is empty after trimming.
    #[error("required field names for status {status} must not be empty")]
    EmptyFieldName {
        /// Status the field was declared for.
        status: u32,
    },

    /// The same field name was declared twice for one status.
    #[error("field '{field}' is declared more than once for status {status}")]
    DuplicateFieldName {
        /// Status the field was declared for.
        status: u32,
        /// Repeated field name.
        field: String,
    },
}

/// Error returned when a status number is zero.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid status number {0}, expected a positive integer")]
pub struct InvalidStatusNumber(pub u32);
