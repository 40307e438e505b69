//! Application services for task type registration and lookup.

mod registry;

pub use registry::{
    RegisterTaskTypeRequest, TaskTypeRegistryService, TaskTypeRegistryServiceError,
    TaskTypeRegistryServiceResult,
};
