//! `PostgreSQL` status change log implementation.

use super::{models::StatusChangeRow, repository::TaskPgPool, schema::task_status_changes};
use crate::task::{
    domain::{PersistedStatusChangeData, StatusChangeEntry, StatusChangeId, TaskId},
    ports::{StatusChangeLog, StatusChangeLogError, StatusChangeLogResult},
};
use crate::task_type::domain::StatusNumber;
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed append-only status change log.
#[derive(Debug, Clone)]
pub struct PostgresStatusChangeLog {
    pool: TaskPgPool,
}

impl PostgresStatusChangeLog {
    /// Creates a new log from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> StatusChangeLogResult<T>
    where
        F: FnOnce(&mut PgConnection) -> StatusChangeLogResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(StatusChangeLogError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(StatusChangeLogError::persistence)?
    }
}

#[async_trait]
impl StatusChangeLog for PostgresStatusChangeLog {
    async fn append(&self, entry: &StatusChangeEntry) -> StatusChangeLogResult<()> {
        let entry_id = entry.id();
        let row = StatusChangeRow {
            id: entry.id().into_inner(),
            task_id: entry.task_id().into_inner(),
            from_status: status_column(entry.from_status())?,
            to_status: status_column(entry.to_status())?,
            assigned_user_id: entry.assigned_user_id().into_inner(),
            changed_at: entry.changed_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(task_status_changes::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        StatusChangeLogError::DuplicateEntry(entry_id)
                    }
                    _ => StatusChangeLogError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn list_for_task(&self, task_id: TaskId) -> StatusChangeLogResult<Vec<StatusChangeEntry>> {
        self.run_blocking(move |connection| {
            let rows = task_status_changes::table
                .filter(task_status_changes::task_id.eq(task_id.into_inner()))
                .order(task_status_changes::changed_at.asc())
                .select(StatusChangeRow::as_select())
                .load::<StatusChangeRow>(connection)
                .map_err(StatusChangeLogError::persistence)?;
            rows.into_iter().map(row_to_entry).collect()
        })
        .await
    }
}

fn status_column(status: StatusNumber) -> StatusChangeLogResult<i32> {
    i32::try_from(status.value()).map_err(StatusChangeLogError::persistence)
}

fn parse_status(value: i32) -> StatusChangeLogResult<StatusNumber> {
    let raw = u32::try_from(value).map_err(StatusChangeLogError::persistence)?;
    StatusNumber::new(raw).map_err(StatusChangeLogError::persistence)
}

fn row_to_entry(row: StatusChangeRow) -> StatusChangeLogResult<StatusChangeEntry> {
    Ok(StatusChangeEntry::from_persisted(PersistedStatusChangeData {
        id: StatusChangeId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        from_status: parse_status(row.from_status)?,
        to_status: parse_status(row.to_status)?,
        assigned_user_id: UserId::from_uuid(row.assigned_user_id),
        changed_at: row.changed_at,
    }))
}
