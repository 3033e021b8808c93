//! Presence entities - the stored record and its typed read model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::{RegionId, SessionId, UserId, Vector3};

/// The stored state for one session of a user.
///
/// `user_id`, `session_id`, and `region_id` are always present; everything
/// else is written incrementally over the record's lifetime. Position,
/// look-at, and the home fields keep their canonical textual representation
/// (`<x, y, z>` for vectors, UUID string for the home region) and are parsed
/// only when projecting into [`PresenceInfo`]. The store is expected to fill
/// defaults for absent fields on first insert, so a record read back after a
/// plain login always projects cleanly.
#[derive(Debug, Clone, PartialEq)]
pub struct PresenceRecord {
    pub user_id: UserId,
    pub session_id: SessionId,
    pub region_id: RegionId,
    pub secure_session_id: Option<Uuid>,
    pub online: Option<bool>,
    /// Unix seconds at login
    pub login: Option<i64>,
    /// Unix seconds at logout; 0 while the session is still live
    pub logout: Option<i64>,
    pub position: Option<String>,
    pub look_at: Option<String>,
    pub home_region_id: Option<String>,
    pub home_position: Option<String>,
    pub home_look_at: Option<String>,
}

impl PresenceRecord {
    /// Create a fresh record for a new login, not yet assigned to a region
    pub fn new(user_id: UserId, session_id: SessionId) -> Self {
        Self {
            user_id,
            session_id,
            region_id: RegionId::zero(),
            secure_session_id: None,
            online: None,
            login: None,
            logout: None,
            position: None,
            look_at: None,
            home_region_id: None,
            home_position: None,
            home_look_at: None,
        }
    }

    /// Copy the three home-location fields from a prior record of the same user
    pub fn copy_home_from(&mut self, prior: &PresenceRecord) {
        self.home_region_id.clone_from(&prior.home_region_id);
        self.home_position.clone_from(&prior.home_position);
        self.home_look_at.clone_from(&prior.home_look_at);
    }

    /// Whether this record is marked online
    #[inline]
    pub fn is_online(&self) -> bool {
        self.online.unwrap_or(false)
    }
}

/// Fully-typed projection of a [`PresenceRecord`] handed to callers.
///
/// Built by the service layer; projection fails if the underlying record is
/// missing an expected field or holds an unparsable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenceInfo {
    pub user_id: UserId,
    pub region_id: RegionId,
    pub online: bool,
    pub login: DateTime<Utc>,
    pub logout: DateTime<Utc>,
    pub position: Vector3,
    pub look_at: Vector3,
    pub home_region_id: RegionId,
    pub home_position: Vector3,
    pub home_look_at: Vector3,
}
