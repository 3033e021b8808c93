//! In-memory presence store
//!
//! Keeps all presence records in a `DashMap` keyed by session ID, with a
//! secondary user index for per-user lookups. Per-record atomicity comes
//! from dashmap's sharded locking: `report_session` mutates a record inside
//! a single `get_mut` critical section.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;

use presence_common::StoreSettings;
use presence_core::traits::{PresenceStore, RepoResult};
use presence_core::{PresenceRecord, RegionId, SessionId, UserId, Vector3};

/// In-memory implementation of [`PresenceStore`]
pub struct MemoryPresenceStore {
    /// All records by session ID
    records: DashMap<SessionId, PresenceRecord>,

    /// User ID to session IDs mapping
    user_sessions: DashMap<UserId, HashSet<SessionId>>,

    settings: StoreSettings,
}

impl MemoryPresenceStore {
    /// Create a store with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(StoreSettings::default())
    }

    /// Create a store with explicit tuning
    #[must_use]
    pub fn with_settings(settings: StoreSettings) -> Self {
        Self {
            records: DashMap::new(),
            user_sessions: DashMap::new(),
            settings,
        }
    }

    /// Number of records currently held (live and retained-offline)
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Session IDs known for a user, unordered
    fn sessions_of(&self, user_id: &UserId) -> Vec<SessionId> {
        self.user_sessions
            .get(user_id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    fn unindex_session(&self, user_id: &UserId, session_id: SessionId) {
        self.user_sessions.alter(user_id, |_, mut sessions| {
            sessions.remove(&session_id);
            sessions
        });
        self.user_sessions.retain(|_, sessions| !sessions.is_empty());
    }

    /// Fill column-style defaults for fields the caller left unset, so a
    /// freshly inserted record always projects into a read model.
    fn fill_defaults(record: &mut PresenceRecord) {
        let zero_vector = Vector3::zero().to_string();

        record.online.get_or_insert(false);
        record.login.get_or_insert(0);
        record.logout.get_or_insert(0);
        record.position.get_or_insert_with(|| zero_vector.clone());
        record.look_at.get_or_insert_with(|| zero_vector.clone());
        record
            .home_region_id
            .get_or_insert_with(|| RegionId::zero().to_string());
        record
            .home_position
            .get_or_insert_with(|| zero_vector.clone());
        record.home_look_at.get_or_insert(zero_vector);
    }
}

impl Default for MemoryPresenceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PresenceStore for MemoryPresenceStore {
    async fn prune(&self, user_id: &UserId) -> RepoResult<()> {
        let mut offline: Vec<(i64, SessionId)> = self
            .sessions_of(user_id)
            .into_iter()
            .filter_map(|sid| {
                self.records.get(&sid).and_then(|r| {
                    if r.is_online() {
                        None
                    } else {
                        Some((r.logout.unwrap_or(0), sid))
                    }
                })
            })
            .collect();

        // Most recent logout first; everything past the retention count goes.
        offline.sort_by(|a, b| b.0.cmp(&a.0));

        for (_, sid) in offline.into_iter().skip(self.settings.prune_retain_offline) {
            self.records.remove(&sid);
            self.unindex_session(user_id, sid);
            debug!(user_id = %user_id, session_id = %sid, "Pruned stale presence record");
        }

        Ok(())
    }

    async fn get_session(&self, session_id: SessionId) -> RepoResult<Option<PresenceRecord>> {
        Ok(self.records.get(&session_id).map(|r| r.clone()))
    }

    async fn get_user_sessions(&self, user_id: &UserId) -> RepoResult<Vec<PresenceRecord>> {
        let mut records: Vec<PresenceRecord> = self
            .sessions_of(user_id)
            .into_iter()
            .filter_map(|sid| self.records.get(&sid).map(|r| r.clone()))
            .collect();

        // Most recent login first, session ID as a stable tie-breaker
        records.sort_by(|a, b| {
            b.login
                .unwrap_or(0)
                .cmp(&a.login.unwrap_or(0))
                .then_with(|| a.session_id.into_inner().cmp(&b.session_id.into_inner()))
        });

        Ok(records)
    }

    async fn store(&self, record: &PresenceRecord) -> RepoResult<()> {
        let mut record = record.clone();
        Self::fill_defaults(&mut record);

        // Upsert keyed by session; keep the user index in step if the
        // session was previously owned by a different user.
        if let Some(previous) = self.records.insert(record.session_id, record.clone()) {
            if previous.user_id != record.user_id {
                self.unindex_session(&previous.user_id, previous.session_id);
            }
        }

        self.user_sessions
            .entry(record.user_id.clone())
            .or_default()
            .insert(record.session_id);

        Ok(())
    }

    async fn delete_session(&self, session_id: SessionId) -> RepoResult<bool> {
        match self.records.remove(&session_id) {
            Some((_, record)) => {
                self.unindex_session(&record.user_id, session_id);
                debug!(session_id = %session_id, "Presence record deleted");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn logout_region_sessions(&self, region_id: RegionId) -> RepoResult<()> {
        let now = Utc::now().timestamp();
        let mut count = 0_usize;

        for mut entry in self.records.iter_mut() {
            if entry.region_id == region_id && entry.is_online() {
                entry.online = Some(false);
                entry.logout = Some(now);
                count += 1;
            }
        }

        debug!(region_id = %region_id, count, "Logged out region sessions");
        Ok(())
    }

    async fn report_session(
        &self,
        session_id: SessionId,
        region_id: RegionId,
        position: &str,
        look_at: &str,
    ) -> RepoResult<bool> {
        match self.records.get_mut(&session_id) {
            Some(mut record) => {
                record.region_id = region_id;
                record.position = Some(position.to_string());
                record.look_at = Some(look_at.to_string());
                record.online = Some(true);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_home_location(
        &self,
        user_id: &UserId,
        region_id: RegionId,
        position: Vector3,
        look_at: Vector3,
    ) -> RepoResult<bool> {
        let sessions = self.sessions_of(user_id);
        if sessions.is_empty() {
            return Ok(false);
        }

        for sid in sessions {
            if let Some(mut record) = self.records.get_mut(&sid) {
                record.home_region_id = Some(region_id.to_string());
                record.home_position = Some(position.to_string());
                record.home_look_at = Some(look_at.to_string());
            }
        }

        debug!(user_id = %user_id, region_id = %region_id, "Home location updated");
        Ok(true)
    }
}
