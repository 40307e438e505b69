//! Unit tests for seed plans.
