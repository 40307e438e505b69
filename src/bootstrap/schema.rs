//! `PostgreSQL` connection and idempotent schema setup.

use super::BootstrapError;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use tracing::info;

/// Schema for users, task types, tasks and status history. Every statement
/// is guarded with `IF NOT EXISTS`, so applying it repeatedly is safe.
pub const SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_workflow_tables/up.sql");

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`BootstrapError::Pool`] when no connection can be established.
pub fn connect(database_url: &str) -> Result<Pool<ConnectionManager<PgConnection>>, BootstrapError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Ok(Pool::builder().build(manager)?)
}

/// Applies [`SCHEMA_SQL`] on a pooled connection.
///
/// # Errors
///
/// Returns [`BootstrapError::Pool`] when no connection is available and
/// [`BootstrapError::Schema`] when a statement fails.
pub async fn apply_schema(pool: &Pool<ConnectionManager<PgConnection>>) -> Result<(), BootstrapError> {
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || -> Result<(), BootstrapError> {
        let mut connection = pool.get()?;
        connection.batch_execute(SCHEMA_SQL)?;
        Ok(())
    })
    .await??;
    info!("database schema is up to date");
    Ok(())
}
