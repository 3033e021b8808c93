//! # presence-common
//!
//! Shared utilities: configuration loading and telemetry setup.

pub mod config;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{AppSettings, ConfigError, Environment, PresenceConfig, StoreSettings};
pub use telemetry::{try_init_tracing, TracingConfig};
