//! In-memory adapters for task persistence.

mod status_log;
mod task;

pub use status_log::InMemoryStatusChangeLog;
pub use task::InMemoryTaskRepository;
