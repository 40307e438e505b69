//! Unit tests for the task workflow domain and lifecycle service.

mod service_tests;
mod support;
