//! `PostgreSQL` adapters for task persistence and status history.

mod models;
mod repository;
mod schema;
mod status_log;

pub use repository::{PostgresTaskRepository, TaskPgPool};
pub use status_log::PostgresStatusChangeLog;
