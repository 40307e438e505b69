//! Application services for task lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    ChangeStatusRequest, CreateTaskRequest, ErrorKind, TaskDetail, TaskLifecycleError,
    TaskLifecycleResult, TaskLifecycleService,
};
