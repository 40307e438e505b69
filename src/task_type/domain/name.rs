//! Validated task type name.

use super::TaskTypeDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a task type name, matching the `VARCHAR(100)` column.
const MAX_NAME_LENGTH: usize = 100;

/// Unique, lowercase task type name such as `procurement` or `development`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTypeName(String);

impl TaskTypeName {
    /// Creates a validated task type name.
    ///
    /// The input is trimmed and lowercased. Only characters in `[a-z0-9_-]`
    /// are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskTypeDomainError::EmptyTaskTypeName`] when the value is
    /// empty after trimming, [`TaskTypeDomainError::InvalidTaskTypeName`]
    /// when it contains other characters, or
    /// [`TaskTypeDomainError::TaskTypeNameTooLong`] when it exceeds 100
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskTypeDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(TaskTypeDomainError::EmptyTaskTypeName);
        }

        if normalized.len() > MAX_NAME_LENGTH {
            return Err(TaskTypeDomainError::TaskTypeNameTooLong(raw));
        }

        let is_valid = normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');

        if !is_valid {
            return Err(TaskTypeDomainError::InvalidTaskTypeName(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the task type name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskTypeName {
    type Error = TaskTypeDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskTypeName> for String {
    fn from(name: TaskTypeName) -> Self {
        name.0
    }
}

impl AsRef<str> for TaskTypeName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
