//! Record to read-model mapping
//!
//! Projects a stored [`PresenceRecord`] into the typed [`PresenceInfo`]
//! handed to callers. The projection is strict: a record missing an expected
//! field, or holding an unparsable value, is corrupt state and the error
//! propagates to the caller unmasked.

use chrono::DateTime;

use presence_core::{DomainError, PresenceInfo, PresenceRecord, RegionId, Vector3};

fn missing(record: &PresenceRecord, field: &'static str) -> DomainError {
    DomainError::MalformedRecord {
        session_id: record.session_id,
        field,
    }
}

/// Project a stored record into its read model
pub fn to_presence_info(record: &PresenceRecord) -> Result<PresenceInfo, DomainError> {
    let online = record.online.ok_or_else(|| missing(record, "Online"))?;
    let login = record.login.ok_or_else(|| missing(record, "Login"))?;
    let logout = record.logout.ok_or_else(|| missing(record, "Logout"))?;

    let position: Vector3 = record
        .position
        .as_deref()
        .ok_or_else(|| missing(record, "Position"))?
        .parse()?;
    let look_at: Vector3 = record
        .look_at
        .as_deref()
        .ok_or_else(|| missing(record, "LookAt"))?
        .parse()?;

    let home_region_id: RegionId = record
        .home_region_id
        .as_deref()
        .ok_or_else(|| missing(record, "HomeRegionID"))?
        .parse()?;
    let home_position: Vector3 = record
        .home_position
        .as_deref()
        .ok_or_else(|| missing(record, "HomePosition"))?
        .parse()?;
    let home_look_at: Vector3 = record
        .home_look_at
        .as_deref()
        .ok_or_else(|| missing(record, "HomeLookAt"))?
        .parse()?;

    Ok(PresenceInfo {
        user_id: record.user_id.clone(),
        region_id: record.region_id,
        online,
        login: DateTime::from_timestamp(login, 0).unwrap_or_default(),
        logout: DateTime::from_timestamp(logout, 0).unwrap_or_default(),
        position,
        look_at,
        home_region_id,
        home_position,
        home_look_at,
    })
}
