//! Request and response bodies.

use crate::task::{
    domain::{StatusChangeEntry, Task},
    services::TaskDetail,
};
use crate::task_type::domain::{TaskType, WorkflowConfig};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Body of `POST /tasks`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskBody {
    /// Task type the new task follows.
    pub task_type_id: Uuid,
    /// Initial assignee.
    pub assigned_user_id: Uuid,
}

/// Body of `PATCH /tasks/{task_id}/status`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeStatusBody {
    /// Requested status.
    pub new_status: u32,
    /// Assignee after the change.
    pub next_assigned_user_id: Uuid,
    /// Fields supplied with the change; must be a JSON object when present.
    #[serde(default)]
    pub custom_fields: Value,
}

/// Task as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// Task identifier.
    pub id: Uuid,
    /// Task type identifier.
    pub task_type_id: Uuid,
    /// Current assignee.
    pub assigned_user_id: Uuid,
    /// Current status.
    pub status: u32,
    /// Whether the task has been closed.
    pub is_closed: bool,
    /// Accumulated fields.
    pub custom_fields: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().into_inner(),
            task_type_id: task.task_type_id().into_inner(),
            assigned_user_id: task.assigned_user_id().into_inner(),
            status: task.status().value(),
            is_closed: task.is_closed(),
            custom_fields: task.fields().to_json(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// One history entry as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeResponse {
    /// Entry identifier.
    pub id: Uuid,
    /// Task identifier.
    pub task_id: Uuid,
    /// Status before the change.
    pub from_status: u32,
    /// Status after the change.
    pub to_status: u32,
    /// Assignee after the change.
    pub assigned_user_id: Uuid,
    /// Time of the change.
    pub changed_at: DateTime<Utc>,
}

impl From<&StatusChangeEntry> for StatusChangeResponse {
    fn from(entry: &StatusChangeEntry) -> Self {
        Self {
            id: entry.id().into_inner(),
            task_id: entry.task_id().into_inner(),
            from_status: entry.from_status().value(),
            to_status: entry.to_status().value(),
            assigned_user_id: entry.assigned_user_id().into_inner(),
            changed_at: entry.changed_at(),
        }
    }
}

/// Task type as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskTypeResponse {
    /// Task type identifier.
    pub id: Uuid,
    /// Unique name.
    pub name: String,
    /// Workflow configuration in its shared external format.
    pub status_config: WorkflowConfig,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&TaskType> for TaskTypeResponse {
    fn from(task_type: &TaskType) -> Self {
        Self {
            id: task_type.id().into_inner(),
            name: task_type.name().as_str().to_owned(),
            status_config: task_type.workflow().clone(),
            created_at: task_type.created_at(),
            updated_at: task_type.updated_at(),
        }
    }
}

/// Task with its type and history, as returned by `GET /tasks/{task_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetailResponse {
    /// The task.
    #[serde(flatten)]
    pub task: TaskResponse,
    /// The task's type, when it still resolves.
    pub task_type: Option<TaskTypeResponse>,
    /// Accepted transitions, oldest first.
    pub status_changes: Vec<StatusChangeResponse>,
}

impl From<&TaskDetail> for TaskDetailResponse {
    fn from(detail: &TaskDetail) -> Self {
        Self {
            task: TaskResponse::from(&detail.task),
            task_type: detail.task_type.as_ref().map(TaskTypeResponse::from),
            status_changes: detail
                .status_changes
                .iter()
                .map(StatusChangeResponse::from)
                .collect(),
        }
    }
}
