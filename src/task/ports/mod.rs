//! Port contracts for task workflow management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod repository;
pub mod status_log;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use status_log::{StatusChangeLog, StatusChangeLogError, StatusChangeLogResult};
