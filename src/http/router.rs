//! Router assembly and server loop.

use super::{
    AppState,
    handlers::{health, task_types, tasks},
};
use axum::{
    Router,
    routing::{get, patch},
};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Builds the application router with request tracing.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route("/tasks/user/{user_id}", get(tasks::list_tasks_for_user))
        .route("/tasks/{task_id}", get(tasks::get_task))
        .route("/tasks/{task_id}/status", patch(tasks::change_status))
        .route("/tasks/{task_id}/close", patch(tasks::close_task))
        .route("/task-types", get(task_types::list_task_types))
        .route("/task-types/{task_type_id}", get(task_types::get_task_type))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves `state` on `addr` until `shutdown` resolves.
///
/// # Errors
///
/// Returns an I/O error when binding fails or the server terminates
/// abnormally.
pub async fn serve(
    addr: SocketAddr,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening for HTTP requests");
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
