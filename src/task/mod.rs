//! Task lifecycle management.
//!
//! Tasks are created at status 1 for a registered task type, advance one
//! status at a time while supplying the fields each status requires, and
//! can be closed once they reach their type's final status. Every accepted
//! status change is appended to a history log. The module follows hexagonal
//! architecture:
//!
//! - Domain types and the workflow engine in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
