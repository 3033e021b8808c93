//! Store traits (ports) - define the interface for presence persistence
//!
//! The domain layer defines what it needs; a storage crate provides the
//! implementation.

mod store;

pub use store::{PresenceStore, RepoResult};
