//! Domain entities

mod presence;

pub use presence::{PresenceInfo, PresenceRecord};
