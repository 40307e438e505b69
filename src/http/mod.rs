//! JSON-over-HTTP transport for the task lifecycle.
//!
//! Handlers translate camelCase request bodies into service requests and map
//! service failures onto status codes: missing references become `404`,
//! operations on closed tasks `403`, rule violations `400`, and integrity or
//! infrastructure failures `500`. Every error body has the shape
//! `{ "error": kind, "message": text }`.

mod dto;
mod error;
mod handlers;
mod router;
mod state;

pub use dto::{
    ChangeStatusBody, CreateTaskBody, StatusChangeResponse, TaskDetailResponse, TaskResponse,
    TaskTypeResponse,
};
pub use error::ApiError;
pub use router::{build_router, serve};
pub use state::{AppState, SharedTaskLifecycleService, SharedTaskTypeRegistryService};
