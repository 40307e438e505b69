//! User directory collaborator.
//!
//! Users are owned outside the workflow core; the task lifecycle only needs
//! to confirm an assignee exists. Storage and listing exist for seeding and
//! for transport clients that display assignees.

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
