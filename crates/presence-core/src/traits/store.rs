//! Presence store trait - the persistence collaborator consumed by the
//! registry service.
//!
//! The service performs no locking or retrying of its own; implementations
//! own atomicity and isolation. In particular [`PresenceStore::report_session`]
//! must be an atomic read-modify-write against a single record so that
//! concurrent position reports never race a login/logout that replaces the
//! record.

use async_trait::async_trait;

use crate::entities::PresenceRecord;
use crate::error::DomainError;
use crate::value_objects::{RegionId, SessionId, UserId, Vector3};

/// Result type for store operations
pub type RepoResult<T> = Result<T, DomainError>;

#[async_trait]
pub trait PresenceStore: Send + Sync {
    /// Remove stale records for a user. The retention policy is owned by
    /// the implementation; it must leave enough history behind for home
    /// fields to survive into the user's next login.
    async fn prune(&self, user_id: &UserId) -> RepoResult<()>;

    /// Find the record for a session, if any
    async fn get_session(&self, session_id: SessionId) -> RepoResult<Option<PresenceRecord>>;

    /// All records for a user, most recent login first
    async fn get_user_sessions(&self, user_id: &UserId) -> RepoResult<Vec<PresenceRecord>>;

    /// Insert or update a record, keyed by `session_id`. On first insert the
    /// implementation fills defaults for fields the caller left unset
    /// (offline, zero logout, zero vectors, zero home region).
    async fn store(&self, record: &PresenceRecord) -> RepoResult<()>;

    /// Delete the record for one session; `false` if it did not exist
    async fn delete_session(&self, session_id: SessionId) -> RepoResult<bool>;

    /// Mark every session currently in `region_id` as logged out
    async fn logout_region_sessions(&self, region_id: RegionId) -> RepoResult<()>;

    /// Atomically update region, position, and look-at for one session.
    /// Position and look-at arrive in their canonical `<x, y, z>` text form.
    /// Returns `false` when the session is unknown.
    async fn report_session(
        &self,
        session_id: SessionId,
        region_id: RegionId,
        position: &str,
        look_at: &str,
    ) -> RepoResult<bool>;

    /// Rewrite the home location on every record of a user.
    /// Returns `false` when the user has no records.
    async fn set_home_location(
        &self,
        user_id: &UserId,
        region_id: RegionId,
        position: Vector3,
        look_at: Vector3,
    ) -> RepoResult<bool>;
}
