//! In-memory adapters for the task type registry.

mod registry;

pub use registry::InMemoryTaskTypeRepository;
