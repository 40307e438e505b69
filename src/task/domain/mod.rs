//! Domain model for task workflow management.
//!
//! Tasks move through the numbered statuses of their task type. The
//! [`WorkflowEngine`] decides whether a requested change is legal and hands
//! out approval tokens; the [`Task`] aggregate only mutates when given one.

mod error;
mod fields;
mod ids;
mod status_change;
mod task;
mod workflow;

pub use error::TaskDomainError;
pub use fields::{TaskFields, is_present_value};
pub use ids::{StatusChangeId, TaskId};
pub use status_change::{PersistedStatusChangeData, StatusChangeEntry};
pub use task::{PersistedTaskData, Task};
pub use workflow::{
    ApprovedClosure, ApprovedStatusChange, RejectionKind, WorkflowEngine, WorkflowRejection,
};
