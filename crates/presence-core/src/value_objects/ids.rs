//! Identifier newtypes - session, region, and user identifiers
//!
//! Session and region identifiers are 128-bit UUIDs; the all-zero UUID is a
//! sentinel meaning "no region assigned yet". User identifiers are opaque
//! strings handed to us by the account service.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Error when parsing an identifier from a string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("invalid UUID: {0}")]
    InvalidUuid(String),
}

/// Unique identifier for one login session (128-bit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Wrap an existing UUID
    #[inline]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a random session identifier
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// The all-zero session identifier
    #[inline]
    pub const fn zero() -> Self {
        Self(Uuid::nil())
    }

    /// Check whether this is the zero sentinel
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_nil()
    }

    /// Get the inner UUID
    #[inline]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for SessionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for SessionId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| IdParseError::InvalidUuid(s.to_string()))
    }
}

/// Identifier of a grid region (128-bit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(Uuid);

impl RegionId {
    /// Wrap an existing UUID
    #[inline]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a random region identifier
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// The zero region, meaning "not yet assigned to a region"
    #[inline]
    pub const fn zero() -> Self {
        Self(Uuid::nil())
    }

    /// Check whether this is the zero sentinel
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_nil()
    }

    /// Get the inner UUID
    #[inline]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for RegionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for RegionId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| IdParseError::InvalidUuid(s.to_string()))
    }
}

/// Opaque user identifier owned by the account service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap an identifier string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the inner string
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
