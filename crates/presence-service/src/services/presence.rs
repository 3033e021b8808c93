//! Presence registry service
//!
//! Tracks which sessions are logged into which region and remembers each
//! user's home location. The service is a stateless facade: every operation
//! is a thin orchestration over the injected store, which owns atomicity,
//! isolation, and the pruning policy.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use presence_core::traits::PresenceStore;
use presence_core::{PresenceInfo, PresenceRecord, RegionId, SessionId, UserId, Vector3};

use crate::dto::to_presence_info;

use super::error::ServiceResult;

/// Presence registry service
#[derive(Clone)]
pub struct PresenceService {
    store: Arc<dyn PresenceStore>,
}

impl PresenceService {
    /// Create a new service over a presence store
    pub fn new(store: Arc<dyn PresenceStore>) -> Self {
        Self { store }
    }

    /// Register a new login session for a user.
    ///
    /// Prunes stale records for the user first, then creates a fresh record
    /// with no region assigned. Home-location fields are carried over from
    /// the user's most recent prior record when one exists; a first-time
    /// user gets store defaults and callers must tolerate a zero home.
    ///
    /// Always returns `true`: the boolean does not reflect the store
    /// outcome (store failures surface as `Err` instead). Kept for
    /// compatibility with existing login workflows.
    #[instrument(skip(self, secure_session_id))]
    pub async fn login_agent(
        &self,
        user_id: &UserId,
        session_id: SessionId,
        secure_session_id: Uuid,
    ) -> ServiceResult<bool> {
        self.store.prune(user_id).await?;

        let prior = self.store.get_user_sessions(user_id).await?;

        let mut record = PresenceRecord::new(user_id.clone(), session_id);
        record.secure_session_id = Some(secure_session_id);
        record.login = Some(Utc::now().timestamp());

        if let Some(first) = prior.first() {
            record.copy_home_from(first);
        }

        self.store.store(&record).await?;

        info!(user_id = %user_id, session_id = %session_id, "Agent logged in");

        Ok(true)
    }

    /// End one session.
    ///
    /// Unknown sessions return `false` (nothing to do, not a fault). When
    /// the user still has another live session, this session's record is
    /// deleted outright rather than marked offline; otherwise the record is
    /// retained as an offline snapshot with a logout timestamp.
    #[instrument(skip(self))]
    pub async fn logout_agent(&self, session_id: SessionId) -> ServiceResult<bool> {
        let Some(mut record) = self.store.get_session(session_id).await? else {
            debug!(session_id = %session_id, "Logout for unknown session");
            return Ok(false);
        };

        let siblings = self.store.get_user_sessions(&record.user_id).await?;

        if siblings.len() > 1 {
            // User remains present via another session; the redundant
            // record carries no information worth keeping.
            self.store.delete_session(session_id).await?;
            info!(
                user_id = %record.user_id,
                session_id = %session_id,
                "Agent logged out (concurrent session remains)"
            );
            return Ok(true);
        }

        record.online = Some(false);
        record.logout = Some(Utc::now().timestamp());
        self.store.store(&record).await?;

        info!(user_id = %record.user_id, session_id = %session_id, "Agent logged out");

        Ok(true)
    }

    /// Log out every session currently in a region.
    ///
    /// Always returns `true`; there is no partial-failure signal at this
    /// layer.
    #[instrument(skip(self))]
    pub async fn logout_region_agents(&self, region_id: RegionId) -> ServiceResult<bool> {
        self.store.logout_region_sessions(region_id).await?;

        info!(region_id = %region_id, "Region agents logged out");

        Ok(true)
    }

    /// Report a session's current region, position, and look-direction.
    ///
    /// Returns the store's result directly: `false` when the session does
    /// not exist.
    #[instrument(skip(self))]
    pub async fn report_agent(
        &self,
        session_id: SessionId,
        region_id: RegionId,
        position: Vector3,
        look_at: Vector3,
    ) -> ServiceResult<bool> {
        debug!(session_id = %session_id, region_id = %region_id, "Agent position report");

        let ok = self
            .store
            .report_session(
                session_id,
                region_id,
                &position.to_string(),
                &look_at.to_string(),
            )
            .await?;

        Ok(ok)
    }

    /// Look up one session's presence.
    ///
    /// `None` when the session is unknown. A record that exists but is
    /// missing expected fields is corrupt; the projection error propagates.
    #[instrument(skip(self))]
    pub async fn get_agent(&self, session_id: SessionId) -> ServiceResult<Option<PresenceInfo>> {
        let Some(record) = self.store.get_session(session_id).await? else {
            return Ok(None);
        };

        Ok(Some(to_presence_info(&record)?))
    }

    /// Look up presence for a list of users.
    ///
    /// Results are concatenated in input order, preserving the store's
    /// per-user ordering. Duplicate user IDs yield duplicate entries; no
    /// deduplication happens here.
    #[instrument(skip(self, user_ids))]
    pub async fn get_agents(&self, user_ids: &[UserId]) -> ServiceResult<Vec<PresenceInfo>> {
        let mut info = Vec::new();

        for user_id in user_ids {
            for record in self.store.get_user_sessions(user_id).await? {
                info.push(to_presence_info(&record)?);
            }
        }

        Ok(info)
    }

    /// Set a user's home location on every record they hold.
    ///
    /// Returns the store's result directly: `false` when the user has no
    /// presence records.
    #[instrument(skip(self))]
    pub async fn set_home_location(
        &self,
        user_id: &UserId,
        region_id: RegionId,
        position: Vector3,
        look_at: Vector3,
    ) -> ServiceResult<bool> {
        let ok = self
            .store
            .set_home_location(user_id, region_id, position, look_at)
            .await?;

        if ok {
            info!(user_id = %user_id, region_id = %region_id, "Home location set");
        }

        Ok(ok)
    }
}

impl std::fmt::Debug for PresenceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceService")
            .field("store", &"Arc<dyn PresenceStore>")
            .finish()
    }
}
