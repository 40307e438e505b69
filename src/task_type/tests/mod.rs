//! Unit tests for the task type registry.
