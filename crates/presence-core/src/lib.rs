//! # presence-core
//!
//! Domain layer containing value objects, entities, domain errors, and the
//! presence store trait. This crate has zero dependencies on infrastructure.

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{PresenceInfo, PresenceRecord};
pub use error::DomainError;
pub use traits::{PresenceStore, RepoResult};
pub use value_objects::{IdParseError, RegionId, SessionId, UserId, Vector3, Vector3ParseError};
