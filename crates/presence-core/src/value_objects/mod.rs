//! Value objects for the presence domain

mod ids;
mod vector3;

pub use ids::{IdParseError, RegionId, SessionId, UserId};
pub use vector3::{Vector3, Vector3ParseError};
