//! Taskflow: configurable linear task workflows.
//!
//! Tasks belong to a task type whose workflow configuration declares a final
//! status and the fields each status requires. Tasks move forward one status
//! at a time (or back to any earlier status), supply the fields the target
//! status requires, and may be closed once they reach the final status.
//!
//! # Architecture
//!
//! Taskflow follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage
//! - **Adapters**: In-memory and `PostgreSQL` implementations of ports
//!
//! # Modules
//!
//! - [`task_type`]: Task type registry and workflow configuration
//! - [`user`]: Users referenced as task assignees
//! - [`task`]: Task records, status history and the workflow engine
//! - [`http`]: JSON API over the lifecycle and registry services
//! - [`bootstrap`]: Backend wiring, schema setup and seeding
//! - [`config`]: Command-line configuration
//! - [`telemetry`]: Log subscriber installation

pub mod bootstrap;
pub mod config;
pub mod http;
pub mod task;
pub mod task_type;
pub mod telemetry;
pub mod user;
