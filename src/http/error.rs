//! Mapping of service failures onto HTTP responses.

use crate::task::services::{ErrorKind, TaskLifecycleError};
use crate::task_type::services::TaskTypeRegistryServiceError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Error returned by every handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: &'a str,
}

impl ApiError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let (status, label) = match kind {
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            ErrorKind::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
            ErrorKind::Invalid => (StatusCode::BAD_REQUEST, "invalid"),
            ErrorKind::Integrity => (StatusCode::INTERNAL_SERVER_ERROR, "integrity"),
            ErrorKind::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };
        Self {
            status,
            kind: label,
            message: message.into(),
        }
    }

    /// Builds a `404` for a resource that does not exist.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the error label written to the body.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<TaskLifecycleError> for ApiError {
    fn from(err: TaskLifecycleError) -> Self {
        let kind = err.kind();
        if matches!(kind, ErrorKind::Integrity | ErrorKind::Internal) {
            error!(error = %err, "task lifecycle operation failed");
        }
        Self::new(kind, err.to_string())
    }
}

impl From<TaskTypeRegistryServiceError> for ApiError {
    fn from(err: TaskTypeRegistryServiceError) -> Self {
        let kind = match &err {
            TaskTypeRegistryServiceError::Domain(_) => ErrorKind::Invalid,
            TaskTypeRegistryServiceError::Repository(repository_err)
                if repository_err.is_integrity_failure() =>
            {
                ErrorKind::Integrity
            }
            TaskTypeRegistryServiceError::Repository(_) => ErrorKind::Internal,
        };
        if kind != ErrorKind::Invalid {
            error!(error = %err, "task type lookup failed");
        }
        Self::new(kind, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(ErrorKind::Invalid, rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(ErrorKind::Invalid, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.kind,
            message: &self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
