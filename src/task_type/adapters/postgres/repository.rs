//! `PostgreSQL` repository implementation for task type storage.

use super::{
    models::{NewTaskTypeRow, TaskTypeRow},
    schema::task_types,
};
use crate::task_type::{
    domain::{PersistedTaskTypeData, TaskType, TaskTypeId, TaskTypeName, WorkflowConfig},
    ports::{TaskTypeRepository, TaskTypeRepositoryError, TaskTypeRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use tracing::error;

/// `PostgreSQL` connection pool type used by task type adapters.
pub type TaskTypePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task type repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskTypeRepository {
    pool: TaskTypePgPool,
}

impl PostgresTaskTypeRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskTypePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskTypeRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskTypeRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskTypeRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskTypeRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskTypeRepository for PostgresTaskTypeRepository {
    async fn register(&self, task_type: &TaskType) -> TaskTypeRepositoryResult<()> {
        let task_type_id = task_type.id();
        let task_type_name = task_type.name().clone();
        let new_row = to_new_row(task_type)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(task_types::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_name_unique_violation(info.as_ref()) =>
                    {
                        TaskTypeRepositoryError::DuplicateTaskTypeName(task_type_name.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskTypeRepositoryError::DuplicateTaskType(task_type_id)
                    }
                    _ => TaskTypeRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskTypeId) -> TaskTypeRepositoryResult<Option<TaskType>> {
        self.run_blocking(move |connection| {
            let row = task_types::table
                .filter(task_types::id.eq(id.into_inner()))
                .select(TaskTypeRow::as_select())
                .first::<TaskTypeRow>(connection)
                .optional()
                .map_err(TaskTypeRepositoryError::persistence)?;
            row.map(row_to_task_type).transpose()
        })
        .await
    }

    async fn find_by_name(
        &self,
        name: &TaskTypeName,
    ) -> TaskTypeRepositoryResult<Option<TaskType>> {
        let name_str = name.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = task_types::table
                .filter(task_types::name.eq(&name_str))
                .select(TaskTypeRow::as_select())
                .first::<TaskTypeRow>(connection)
                .optional()
                .map_err(TaskTypeRepositoryError::persistence)?;
            row.map(row_to_task_type).transpose()
        })
        .await
    }

    async fn list_all(&self) -> TaskTypeRepositoryResult<Vec<TaskType>> {
        self.run_blocking(move |connection| {
            let rows = task_types::table
                .order(task_types::name.asc())
                .select(TaskTypeRow::as_select())
                .load::<TaskTypeRow>(connection)
                .map_err(TaskTypeRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task_type).collect()
        })
        .await
    }
}

fn to_new_row(task_type: &TaskType) -> TaskTypeRepositoryResult<NewTaskTypeRow> {
    let status_config =
        serde_json::to_value(task_type.workflow()).map_err(TaskTypeRepositoryError::persistence)?;

    Ok(NewTaskTypeRow {
        id: task_type.id().into_inner(),
        name: task_type.name().as_str().to_owned(),
        status_config,
        created_at: task_type.created_at(),
        updated_at: task_type.updated_at(),
    })
}

fn row_to_task_type(row: TaskTypeRow) -> TaskTypeRepositoryResult<TaskType> {
    let TaskTypeRow {
        id,
        name,
        status_config,
        created_at,
        updated_at,
    } = row;

    let parsed_name =
        TaskTypeName::new(&name).map_err(TaskTypeRepositoryError::invalid_persisted_data)?;
    let workflow = serde_json::from_value::<WorkflowConfig>(status_config).map_err(|err| {
        error!(task_type_id = %id, task_type_name = %name, error = %err,
            "stored workflow configuration is malformed");
        TaskTypeRepositoryError::invalid_persisted_data(err)
    })?;

    let data = PersistedTaskTypeData {
        id: TaskTypeId::from_uuid(id),
        name: parsed_name,
        workflow,
        created_at,
        updated_at,
    };
    Ok(TaskType::from_persisted(data))
}

fn is_name_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_task_types_name_unique")
}
