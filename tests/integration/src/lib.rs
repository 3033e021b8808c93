//! Integration test utilities for the presence registry
//!
//! Provides helpers for wiring the service to an in-memory store and
//! fixtures for generating unique test data.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
