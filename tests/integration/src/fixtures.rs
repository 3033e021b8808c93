//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use presence_core::{RegionId, SessionId, UserId, Vector3};
use uuid::Uuid;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A unique user ID for a test
pub fn unique_user() -> UserId {
    UserId::new(format!("test-user-{}", unique_suffix()))
}

/// A fresh random session ID
pub fn new_session() -> SessionId {
    SessionId::random()
}

/// A fresh random region ID
pub fn new_region() -> RegionId {
    RegionId::random()
}

/// A fresh secure session identifier
pub fn new_secure_session() -> Uuid {
    Uuid::new_v4()
}

/// A position somewhere inside a region
pub fn sample_position() -> Vector3 {
    Vector3::new(128.0, 96.5, 23.25)
}

/// A normalized-ish look direction
pub fn sample_look_at() -> Vector3 {
    Vector3::new(0.0, 1.0, 0.0)
}
