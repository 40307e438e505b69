//! Task type registry for Taskflow.
//!
//! A task type is a named workflow template: how many sequential statuses a
//! task of that type walks through, which status is final, and which data
//! fields must be supplied when entering each status. Types are registered
//! once at setup time and are read-only afterwards. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
