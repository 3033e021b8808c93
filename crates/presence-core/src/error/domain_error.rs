//! Domain errors - error types for the presence domain layer

use thiserror::Error;

use crate::value_objects::{IdParseError, SessionId, Vector3ParseError};

/// Domain layer errors.
///
/// Absent sessions and users are not errors: lookups surface them as `None`
/// or an empty result. These variants cover genuinely broken state (a record
/// missing a field it should carry, a value that fails to parse) and failures
/// reported by the store itself.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A stored record lacks a field the projection requires. Indicates
    /// store corruption or a partially-written record; never masked.
    #[error("Malformed presence record {session_id}: missing {field}")]
    MalformedRecord {
        session_id: SessionId,
        field: &'static str,
    },

    #[error("Invalid vector value: {0}")]
    InvalidVector(#[from] Vector3ParseError),

    #[error("Invalid identifier value: {0}")]
    InvalidId(#[from] IdParseError),

    /// Failure reported by the persistence collaborator, passed through
    /// unmodified. No retry or fallback at this layer.
    #[error("Store error: {0}")]
    Store(String),
}
