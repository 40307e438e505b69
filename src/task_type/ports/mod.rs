//! Port contracts for the task type registry.
//!
//! Ports define infrastructure-agnostic interfaces used by registry services
//! and by the task lifecycle service when it resolves workflow configuration.

pub mod repository;

pub use repository::{TaskTypeRepository, TaskTypeRepositoryError, TaskTypeRepositoryResult};
