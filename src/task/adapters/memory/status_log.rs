//! In-memory status change log.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{StatusChangeEntry, StatusChangeId, TaskId},
    ports::{StatusChangeLog, StatusChangeLogError, StatusChangeLogResult},
};

/// Thread-safe in-memory append-only log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStatusChangeLog {
    state: Arc<RwLock<LogState>>,
}

#[derive(Debug, Default)]
struct LogState {
    ids: HashSet<StatusChangeId>,
    by_task: HashMap<TaskId, Vec<StatusChangeEntry>>,
}

impl InMemoryStatusChangeLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StatusChangeLog for InMemoryStatusChangeLog {
    async fn append(&self, entry: &StatusChangeEntry) -> StatusChangeLogResult<()> {
        let mut state = self.state.write().map_err(|err| {
            StatusChangeLogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.ids.insert(entry.id()) {
            return Err(StatusChangeLogError::DuplicateEntry(entry.id()));
        }
        state
            .by_task
            .entry(entry.task_id())
            .or_default()
            .push(entry.clone());
        Ok(())
    }

    async fn list_for_task(&self, task_id: TaskId) -> StatusChangeLogResult<Vec<StatusChangeEntry>> {
        let state = self.state.read().map_err(|err| {
            StatusChangeLogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut entries = state.by_task.get(&task_id).cloned().unwrap_or_default();
        entries.sort_by_key(StatusChangeEntry::changed_at);
        Ok(entries)
    }
}
