//! Vector3 - 3D position/direction with the grid's canonical text form
//!
//! The wire and storage representation is `<x, y, z>`. Display and FromStr
//! round-trip exactly, which the presence registry relies on when position
//! reports are persisted as text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 3D vector (position or look-direction) in region coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    /// Create a new vector
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The zero vector
    #[inline]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Check whether all components are zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }
}

/// Error when parsing a Vector3 from its text form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Vector3ParseError {
    #[error("invalid vector format: {0}")]
    InvalidFormat(String),
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}, {}>", self.x, self.y, self.z)
    }
}

impl FromStr for Vector3 {
    type Err = Vector3ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Brackets are all-or-nothing: `<x, y, z>` or bare `x, y, z`.
        let trimmed = s.trim();
        let inner = match trimmed.strip_prefix('<') {
            Some(rest) => rest
                .strip_suffix('>')
                .ok_or_else(|| Vector3ParseError::InvalidFormat(s.to_string()))?,
            None if trimmed.ends_with('>') => {
                return Err(Vector3ParseError::InvalidFormat(s.to_string()));
            }
            None => trimmed,
        };

        let mut parts = inner.split(',').map(str::trim);

        let mut component = || {
            parts
                .next()
                .and_then(|p| p.parse::<f32>().ok())
                .ok_or_else(|| Vector3ParseError::InvalidFormat(s.to_string()))
        };

        let x = component()?;
        let y = component()?;
        let z = component()?;

        if parts.next().is_some() {
            return Err(Vector3ParseError::InvalidFormat(s.to_string()));
        }

        Ok(Self { x, y, z })
    }
}
