//! Test helpers for integration tests
//!
//! Wires the presence service to a fresh in-memory store per test.

use std::sync::Arc;

use presence_common::{try_init_tracing, StoreSettings, TracingConfig};
use presence_service::PresenceService;
use presence_store::MemoryPresenceStore;

/// A service instance with its backing store kept reachable for assertions
pub struct TestRegistry {
    pub service: PresenceService,
    pub store: Arc<MemoryPresenceStore>,
}

impl TestRegistry {
    /// Fresh registry over an empty in-memory store
    pub fn new() -> Self {
        Self::with_settings(StoreSettings::default())
    }

    /// Fresh registry with explicit store tuning
    pub fn with_settings(settings: StoreSettings) -> Self {
        // Safe to call from every test; only the first call wins.
        let _ = try_init_tracing(TracingConfig::default());

        let store = Arc::new(MemoryPresenceStore::with_settings(settings));
        let service = PresenceService::new(store.clone());
        Self { service, store }
    }
}

impl Default for TestRegistry {
    fn default() -> Self {
        Self::new()
    }
}
