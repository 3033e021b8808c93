//! End-to-end tests for the presence registry
//!
//! Exercises the service facade against the in-memory store.
//!
//! Run with: cargo test -p integration-tests --test presence_tests

use integration_tests::{
    new_region, new_secure_session, new_session, sample_look_at, sample_position, unique_user,
    TestRegistry,
};
use presence_common::{PresenceConfig, StoreSettings};
use presence_core::traits::PresenceStore;
use presence_core::{PresenceRecord, Vector3};

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_first_login_has_unset_home() {
    let registry = TestRegistry::new();
    let user = unique_user();
    let session = new_session();

    let ok = registry
        .service
        .login_agent(&user, session, new_secure_session())
        .await
        .unwrap();
    assert!(ok);

    let info = registry.service.get_agent(session).await.unwrap().unwrap();
    assert_eq!(info.user_id, user);
    assert!(!info.online);
    assert!(info.login.timestamp() > 0);
    assert!(info.region_id.is_zero());
    // No prior record: home falls back to store defaults
    assert!(info.home_region_id.is_zero());
    assert!(info.home_position.is_zero());
}

#[tokio::test]
async fn test_login_carries_home_from_prior_record() {
    let registry = TestRegistry::new();
    let user = unique_user();
    let first_session = new_session();

    registry
        .service
        .login_agent(&user, first_session, new_secure_session())
        .await
        .unwrap();

    let home_region = new_region();
    let home_pos = Vector3::new(12.0, 34.0, 56.0);
    let home_look = Vector3::new(1.0, 0.0, 0.0);
    assert!(registry
        .service
        .set_home_location(&user, home_region, home_pos, home_look)
        .await
        .unwrap());

    registry.service.logout_agent(first_session).await.unwrap();

    // New login on a new session: home fields must carry over exactly
    let second_session = new_session();
    registry
        .service
        .login_agent(&user, second_session, new_secure_session())
        .await
        .unwrap();

    let info = registry
        .service
        .get_agent(second_session)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(info.home_region_id, home_region);
    assert_eq!(info.home_position, home_pos);
    assert_eq!(info.home_look_at, home_look);
}

#[tokio::test]
async fn test_login_always_reports_success() {
    let registry = TestRegistry::new();
    let user = unique_user();

    for _ in 0..3 {
        let ok = registry
            .service
            .login_agent(&user, new_session(), new_secure_session())
            .await
            .unwrap();
        assert!(ok);
    }
}

// ============================================================================
// Logout
// ============================================================================

#[tokio::test]
async fn test_logout_unknown_session_is_false_and_mutates_nothing() {
    let registry = TestRegistry::new();

    let ok = registry.service.logout_agent(new_session()).await.unwrap();
    assert!(!ok);
    assert!(registry.store.is_empty());
}

#[tokio::test]
async fn test_logout_with_sibling_session_deletes_record() {
    let registry = TestRegistry::new();
    let user = unique_user();
    let kept = new_session();
    let dropped = new_session();

    registry
        .service
        .login_agent(&user, kept, new_secure_session())
        .await
        .unwrap();
    registry
        .service
        .login_agent(&user, dropped, new_secure_session())
        .await
        .unwrap();

    assert!(registry.service.logout_agent(dropped).await.unwrap());

    // The logged-out session is gone entirely, the other untouched
    assert!(registry.service.get_agent(dropped).await.unwrap().is_none());
    assert!(registry.service.get_agent(kept).await.unwrap().is_some());

    let agents = registry
        .service
        .get_agents(std::slice::from_ref(&user))
        .await
        .unwrap();
    assert_eq!(agents.len(), 1);
}

#[tokio::test]
async fn test_logout_last_session_retains_offline_record() {
    let registry = TestRegistry::new();
    let user = unique_user();
    let session = new_session();

    registry
        .service
        .login_agent(&user, session, new_secure_session())
        .await
        .unwrap();

    assert!(registry.service.logout_agent(session).await.unwrap());

    let info = registry.service.get_agent(session).await.unwrap().unwrap();
    assert!(!info.online);
    assert!(info.logout.timestamp() > 0);
}

// ============================================================================
// Region-wide logout
// ============================================================================

#[tokio::test]
async fn test_logout_region_agents() {
    let registry = TestRegistry::new();
    let region = new_region();

    let inside_user = unique_user();
    let inside = new_session();
    registry
        .service
        .login_agent(&inside_user, inside, new_secure_session())
        .await
        .unwrap();
    registry
        .service
        .report_agent(inside, region, sample_position(), sample_look_at())
        .await
        .unwrap();

    let outside_user = unique_user();
    let outside = new_session();
    registry
        .service
        .login_agent(&outside_user, outside, new_secure_session())
        .await
        .unwrap();
    registry
        .service
        .report_agent(outside, new_region(), sample_position(), sample_look_at())
        .await
        .unwrap();

    assert!(registry.service.logout_region_agents(region).await.unwrap());

    let inside_info = registry.service.get_agent(inside).await.unwrap().unwrap();
    assert!(!inside_info.online);
    assert!(inside_info.logout.timestamp() > 0);

    let outside_info = registry.service.get_agent(outside).await.unwrap().unwrap();
    assert!(outside_info.online);
}

// ============================================================================
// Position reports
// ============================================================================

#[tokio::test]
async fn test_report_agent_roundtrips_through_get_agent() {
    let registry = TestRegistry::new();
    let user = unique_user();
    let session = new_session();
    let region = new_region();
    let position = Vector3::new(101.5, 77.25, 22.0);
    let look_at = Vector3::new(0.0, -1.0, 0.5);

    registry
        .service
        .login_agent(&user, session, new_secure_session())
        .await
        .unwrap();

    assert!(registry
        .service
        .report_agent(session, region, position, look_at)
        .await
        .unwrap());

    let info = registry.service.get_agent(session).await.unwrap().unwrap();
    assert_eq!(info.region_id, region);
    assert_eq!(info.position, position);
    assert_eq!(info.look_at, look_at);
}

#[tokio::test]
async fn test_report_unknown_session_is_false() {
    let registry = TestRegistry::new();

    let ok = registry
        .service
        .report_agent(new_session(), new_region(), sample_position(), sample_look_at())
        .await
        .unwrap();
    assert!(!ok);
}

// ============================================================================
// Bulk lookup
// ============================================================================

#[tokio::test]
async fn test_get_agents_duplicate_user_duplicates_results() {
    let registry = TestRegistry::new();
    let user = unique_user();

    registry
        .service
        .login_agent(&user, new_session(), new_secure_session())
        .await
        .unwrap();
    registry
        .service
        .login_agent(&user, new_session(), new_secure_session())
        .await
        .unwrap();

    let agents = registry
        .service
        .get_agents(&[user.clone(), user.clone()])
        .await
        .unwrap();

    // Two sessions, user listed twice: four entries, same relative order
    assert_eq!(agents.len(), 4);
    assert_eq!(agents[0], agents[2]);
    assert_eq!(agents[1], agents[3]);
}

#[tokio::test]
async fn test_get_agents_unknown_user_is_empty() {
    let registry = TestRegistry::new();
    let agents = registry
        .service
        .get_agents(&[unique_user()])
        .await
        .unwrap();
    assert!(agents.is_empty());
}

#[tokio::test]
async fn test_get_agent_unknown_session_is_none() {
    let registry = TestRegistry::new();
    assert!(registry
        .service
        .get_agent(new_session())
        .await
        .unwrap()
        .is_none());
}

// ============================================================================
// Home location
// ============================================================================

#[tokio::test]
async fn test_set_home_location_without_records_is_false() {
    let registry = TestRegistry::new();

    let ok = registry
        .service
        .set_home_location(
            &unique_user(),
            new_region(),
            sample_position(),
            sample_look_at(),
        )
        .await
        .unwrap();
    assert!(!ok);
}

#[tokio::test]
async fn test_home_agrees_across_concurrent_sessions() {
    let registry = TestRegistry::new();
    let user = unique_user();
    let a = new_session();
    let b = new_session();

    registry
        .service
        .login_agent(&user, a, new_secure_session())
        .await
        .unwrap();
    registry
        .service
        .login_agent(&user, b, new_secure_session())
        .await
        .unwrap();

    let home = new_region();
    registry
        .service
        .set_home_location(&user, home, sample_position(), sample_look_at())
        .await
        .unwrap();

    for session in [a, b] {
        let info = registry.service.get_agent(session).await.unwrap().unwrap();
        assert_eq!(info.home_region_id, home);
        assert_eq!(info.home_position, sample_position());
    }
}

// ============================================================================
// Pruning
// ============================================================================

#[tokio::test]
async fn test_login_prunes_stale_offline_records() {
    let registry = TestRegistry::with_settings(StoreSettings {
        prune_retain_offline: 1,
    });
    let user = unique_user();

    // Seed stale offline snapshots directly in the store; the service
    // itself never accumulates more than one (a logout with siblings
    // present deletes the record outright).
    for logout in [100, 300, 200] {
        let mut record = PresenceRecord::new(user.clone(), new_session());
        record.login = Some(logout - 50);
        record.logout = Some(logout);
        record.online = Some(false);
        registry.store.store(&record).await.unwrap();
    }

    // Login prunes down to one retained snapshot plus the new record
    let session = new_session();
    registry
        .service
        .login_agent(&user, session, new_secure_session())
        .await
        .unwrap();

    let agents = registry
        .service
        .get_agents(std::slice::from_ref(&user))
        .await
        .unwrap();
    assert_eq!(agents.len(), 2);
}

#[tokio::test]
async fn test_home_survives_pruning() {
    let registry = TestRegistry::new();
    let user = unique_user();
    let home = new_region();

    let first = new_session();
    registry
        .service
        .login_agent(&user, first, new_secure_session())
        .await
        .unwrap();
    registry
        .service
        .set_home_location(&user, home, sample_position(), sample_look_at())
        .await
        .unwrap();
    registry.service.logout_agent(first).await.unwrap();

    // Cycle a few sessions; the retained snapshot keeps seeding home
    for _ in 0..3 {
        let session = new_session();
        registry
            .service
            .login_agent(&user, session, new_secure_session())
            .await
            .unwrap();

        let info = registry.service.get_agent(session).await.unwrap().unwrap();
        assert_eq!(info.home_region_id, home);

        registry.service.logout_agent(session).await.unwrap();
    }
}

// ============================================================================
// Configuration
// ============================================================================

#[tokio::test]
async fn test_env_configured_retention_drives_pruning() {
    // No other test in this binary touches the environment.
    std::env::set_var("PRESENCE_PRUNE_RETAIN_OFFLINE", "2");
    let config = PresenceConfig::from_env().unwrap();
    std::env::remove_var("PRESENCE_PRUNE_RETAIN_OFFLINE");
    assert_eq!(config.store.prune_retain_offline, 2);

    let registry = TestRegistry::with_settings(config.store);
    let user = unique_user();

    for logout in [100, 400, 200, 300] {
        let mut record = PresenceRecord::new(user.clone(), new_session());
        record.login = Some(logout - 50);
        record.logout = Some(logout);
        record.online = Some(false);
        registry.store.store(&record).await.unwrap();
    }

    registry
        .service
        .login_agent(&user, new_session(), new_secure_session())
        .await
        .unwrap();

    // Two retained snapshots plus the fresh login record
    let agents = registry
        .service
        .get_agents(std::slice::from_ref(&user))
        .await
        .unwrap();
    assert_eq!(agents.len(), 3);
}

// ============================================================================
// Full lifecycle
// ============================================================================

#[tokio::test]
async fn test_session_lifecycle() {
    let registry = TestRegistry::new();
    let user = unique_user();
    let session = new_session();
    let region = new_region();

    registry
        .service
        .login_agent(&user, session, new_secure_session())
        .await
        .unwrap();

    registry
        .service
        .report_agent(session, region, sample_position(), sample_look_at())
        .await
        .unwrap();

    let live = registry.service.get_agent(session).await.unwrap().unwrap();
    assert!(live.online);
    assert_eq!(live.region_id, region);

    registry.service.logout_agent(session).await.unwrap();

    let offline = registry.service.get_agent(session).await.unwrap().unwrap();
    assert!(!offline.online);
    // Region and position stay as last reported on the retained record
    assert_eq!(offline.region_id, region);
    assert_eq!(offline.position, sample_position());
}
