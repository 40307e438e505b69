//! Route handlers.

pub mod health;
pub mod task_types;
pub mod tasks;
