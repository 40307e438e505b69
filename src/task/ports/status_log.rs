//! Append-only log port for accepted status transitions.

use crate::task::domain::{StatusChangeEntry, StatusChangeId, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for status change log operations.
pub type StatusChangeLogResult<T> = Result<T, StatusChangeLogError>;

/// Status change history contract. Entries are never updated or removed.
#[async_trait]
pub trait StatusChangeLog: Send + Sync {
    /// Appends one entry.
    ///
    /// # Errors
    ///
    /// Returns [`StatusChangeLogError::DuplicateEntry`] when an entry with
    /// the same ID was already appended.
    async fn append(&self, entry: &StatusChangeEntry) -> StatusChangeLogResult<()>;

    /// Returns the history of one task ordered by change time, oldest first.
    async fn list_for_task(&self, task_id: TaskId) -> StatusChangeLogResult<Vec<StatusChangeEntry>>;
}

/// Errors returned by status change log implementations.
#[derive(Debug, Clone, Error)]
pub enum StatusChangeLogError {
    /// An entry with the same identifier already exists.
    #[error("duplicate status change entry: {0}")]
    DuplicateEntry(StatusChangeId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StatusChangeLogError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
