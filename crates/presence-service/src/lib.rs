//! # presence-service
//!
//! Application layer for the presence registry: the service facade consumed
//! in-process by login/logout and teleport workflows.

pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use services::{PresenceService, ServiceError, ServiceResult};
