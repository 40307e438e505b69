//! Adapter implementations for the task type registry port.

pub mod memory;
pub mod postgres;

mod cache;

pub use cache::CachingTaskTypeRepository;
