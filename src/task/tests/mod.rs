//! Unit tests for the task context.

mod ordering_tests;
