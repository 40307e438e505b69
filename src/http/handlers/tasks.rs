//! Task lifecycle handlers.

use crate::http::{
    ApiError, AppState, ChangeStatusBody, CreateTaskBody, TaskDetailResponse, TaskResponse,
};
use crate::task::{
    domain::TaskId,
    services::{ChangeStatusRequest, CreateTaskRequest},
};
use crate::task_type::domain::TaskTypeId;
use crate::user::domain::UserId;
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use uuid::Uuid;

/// `POST /tasks`
///
/// # Errors
///
/// Returns `404` when the task type or assignee does not exist.
pub async fn create_task(
    State(state): State<AppState>,
    body: Result<Json<CreateTaskBody>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    let Json(payload) = body?;
    let request = CreateTaskRequest::new(
        TaskTypeId::from_uuid(payload.task_type_id),
        UserId::from_uuid(payload.assigned_user_id),
    );
    let task = state.lifecycle().create_task(request).await?;
    Ok((StatusCode::CREATED, Json(TaskResponse::from(&task))))
}

/// `GET /tasks`
///
/// # Errors
///
/// Returns `500` when the store cannot be read.
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let tasks = state.lifecycle().list_tasks().await?;
    Ok(Json(tasks.iter().map(TaskResponse::from).collect()))
}

/// `GET /tasks/user/{user_id}`
///
/// # Errors
///
/// Returns `400` for a malformed identifier.
pub async fn list_tasks_for_user(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let Path(user_id) = path?;
    let tasks = state
        .lifecycle()
        .list_tasks_for_user(UserId::from_uuid(user_id))
        .await?;
    Ok(Json(tasks.iter().map(TaskResponse::from).collect()))
}

/// `GET /tasks/{task_id}`
///
/// # Errors
///
/// Returns `404` for unknown tasks.
pub async fn get_task(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<TaskDetailResponse>, ApiError> {
    let Path(task_id) = path?;
    let detail = state
        .lifecycle()
        .task_detail(TaskId::from_uuid(task_id))
        .await?;
    Ok(Json(TaskDetailResponse::from(&detail)))
}

/// `PATCH /tasks/{task_id}/status`
///
/// # Errors
///
/// Returns `404` for unknown tasks or assignees, `403` for closed tasks and
/// `400` when the workflow rejects the change.
pub async fn change_status(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<ChangeStatusBody>, JsonRejection>,
) -> Result<Json<TaskResponse>, ApiError> {
    let Path(task_id) = path?;
    let Json(payload) = body?;
    let request = ChangeStatusRequest::new(
        TaskId::from_uuid(task_id),
        payload.new_status,
        UserId::from_uuid(payload.next_assigned_user_id),
    )
    .with_raw_fields(payload.custom_fields);
    let task = state.lifecycle().change_status(request).await?;
    Ok(Json(TaskResponse::from(&task)))
}

/// `PATCH /tasks/{task_id}/close`
///
/// # Errors
///
/// Returns `404` for unknown tasks, `403` when already closed and `400` when
/// the task is not at its final status.
pub async fn close_task(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<TaskResponse>, ApiError> {
    let Path(task_id) = path?;
    let task = state
        .lifecycle()
        .close_task(TaskId::from_uuid(task_id))
        .await?;
    Ok(Json(TaskResponse::from(&task)))
}
