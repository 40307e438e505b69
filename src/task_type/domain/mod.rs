//! Domain model for task type registration.
//!
//! The workflow configuration is a typed value object: it is validated when
//! built or parsed and then passed by reference into the workflow engine, so
//! no call site re-reads the serialized form.

mod error;
mod field;
mod ids;
mod name;
mod status;
mod task_type;
mod workflow;

pub use error::{InvalidStatusNumber, TaskTypeDomainError};
pub use field::FieldName;
pub use ids::TaskTypeId;
pub use name::TaskTypeName;
pub use status::StatusNumber;
pub use task_type::{PersistedTaskTypeData, TaskType};
pub use workflow::WorkflowConfig;
