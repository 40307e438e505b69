//! `PostgreSQL` adapters for task type registry persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresTaskTypeRepository, TaskTypePgPool};
