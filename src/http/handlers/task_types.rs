//! Task type lookup handlers.

use crate::http::{ApiError, AppState, TaskTypeResponse};
use crate::task_type::domain::TaskTypeId;
use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use uuid::Uuid;

/// `GET /task-types`
///
/// # Errors
///
/// Returns `500` when the registry cannot be read.
pub async fn list_task_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<TaskTypeResponse>>, ApiError> {
    let task_types = state.registry().list_all().await?;
    Ok(Json(task_types.iter().map(TaskTypeResponse::from).collect()))
}

/// `GET /task-types/{task_type_id}`
///
/// # Errors
///
/// Returns `404` for unknown identifiers and `400` for malformed ones.
pub async fn get_task_type(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<TaskTypeResponse>, ApiError> {
    let Path(raw_id) = path?;
    let id = TaskTypeId::from_uuid(raw_id);
    let task_type = state
        .registry()
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("task type not found: {id}")))?;
    Ok(Json(TaskTypeResponse::from(&task_type)))
}
