//! Integration tests for [`storage::SqliteUserStore`].
//!
//! Covers lazy defaults, round-tripping of session fields, candidate and paired scans, the
//! transactional `put_many`, and reading a table created by the earlier schema.

use anon_core::UserRecord;
use chrono::{Duration, Utc};
use storage::{SqliteUserStore, UserStore};

async fn memory_store() -> SqliteUserStore {
    SqliteUserStore::new("sqlite::memory:")
        .await
        .expect("Failed to create store")
}

fn active_user(id: i64) -> UserRecord {
    let mut record = UserRecord::new(id);
    record.active = true;
    record
}

/// **Test: Unknown user yields a default record that is not persisted.**
///
/// **Setup:** Empty in-memory DB.
/// **Action:** `get(100)`, then `count_active()`.
/// **Expected:** Inactive default record with no partner; nothing counted.
#[tokio::test]
async fn test_get_unknown_user_returns_default() {
    let store = memory_store().await;

    let record = store.get(100).await.expect("Failed to get record");

    assert_eq!(record.user_id, 100);
    assert!(!record.active);
    assert!(record.current_partner.is_none());
    assert_eq!(store.count_active().await.unwrap(), 0);
}

/// **Test: Saved record reads back with partner, preferences and wait start intact.**
///
/// **Setup:** Record with partner, all three preferences, and a match wait start.
/// **Action:** `put`, then `get`.
/// **Expected:** Fields equal; timestamps preserved to the microsecond.
#[tokio::test]
async fn test_put_then_get_round_trips_fields() {
    let store = memory_store().await;
    let mut record = active_user(1);
    record.current_partner = Some(2);
    record.preferences.country = Some("UK".to_string());
    record.preferences.language = Some("English".to_string());
    record.preferences.gender = Some("Other".to_string());
    let waited = Utc::now() - Duration::seconds(30);
    record.match_wait_start = Some(waited);

    store.put(&record).await.expect("Failed to save record");
    let loaded = store.get(1).await.expect("Failed to get record");

    assert!(loaded.active);
    assert_eq!(loaded.current_partner, Some(2));
    assert_eq!(loaded.preferences, record.preferences);
    let loaded_wait = loaded.match_wait_start.expect("wait start persisted");
    assert!((loaded_wait - waited).num_milliseconds().abs() < 1);
    assert!((loaded.last_activity - record.last_activity).num_milliseconds().abs() < 1);
}

/// **Test: Candidate scan returns only active, unpaired users other than the requester.**
///
/// **Setup:** Requester (active), one free active user, one inactive user, one paired active user.
/// **Action:** `find_candidates(requester)`.
/// **Expected:** Only the free active user.
#[tokio::test]
async fn test_find_candidates_filters_pool() {
    let store = memory_store().await;
    let mut paired = active_user(4);
    paired.current_partner = Some(5);
    store
        .put_many(&[active_user(1), active_user(2), UserRecord::new(3), paired])
        .await
        .unwrap();

    let candidates = store.find_candidates(1).await.unwrap();

    let ids: Vec<i64> = candidates.iter().map(|r| r.user_id).collect();
    assert_eq!(ids, vec![2]);
}

/// **Test: Paired scan and active count.**
///
/// **Setup:** Two users paired with each other, one active idle user.
/// **Action:** `find_paired()`, `count_active()`.
/// **Expected:** Both paired records returned; three active users.
#[tokio::test]
async fn test_find_paired_and_count_active() {
    let store = memory_store().await;
    let mut a = active_user(10);
    let mut b = active_user(11);
    a.current_partner = Some(11);
    b.current_partner = Some(10);
    store.put_many(&[a, b, active_user(12)]).await.unwrap();

    let mut paired: Vec<i64> = store
        .find_paired()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.user_id)
        .collect();
    paired.sort();

    assert_eq!(paired, vec![10, 11]);
    assert_eq!(store.count_active().await.unwrap(), 3);
}

/// **Test: Clearing a partner stores NULL and the user becomes a candidate again.**
#[tokio::test]
async fn test_unpair_persists_null_partner() {
    let store = memory_store().await;
    let mut a = active_user(20);
    a.current_partner = Some(21);
    store.put(&a).await.unwrap();

    a.unpair();
    store.put(&a).await.unwrap();

    assert!(store.get(20).await.unwrap().current_partner.is_none());
    assert_eq!(store.find_candidates(99).await.unwrap().len(), 1);
}

/// **Test: A table from the earlier schema (no match_wait_start, current_chat = 0) is migrated and readable.**
///
/// **Setup:** File DB created with the six-column schema and one legacy row.
/// **Action:** Open `SqliteUserStore` on it; `get`, `find_candidates`.
/// **Expected:** Legacy row reads as active and unpaired; store can write wait starts.
#[tokio::test]
async fn test_opens_legacy_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");
    let url = format!("sqlite://{}?mode=rwc", path.display());

    {
        let pool = sqlx::SqlitePool::connect(&url).await.unwrap();
        sqlx::query(
            "CREATE TABLE users (user_id INTEGER PRIMARY KEY, is_active INTEGER DEFAULT 0, current_chat INTEGER, last_activity TEXT, country TEXT, language TEXT, gender TEXT)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO users VALUES (1, 1, 0, '2024-01-01T00:00:00', '', 'Spanish', '')")
            .execute(&pool)
            .await
            .unwrap();
        pool.close().await;
    }

    let store = SqliteUserStore::new(path.to_str().unwrap()).await.unwrap();
    let mut record = store.get(1).await.unwrap();

    assert!(record.active);
    assert!(record.current_partner.is_none());
    assert!(record.preferences.country.is_none());
    assert_eq!(record.preferences.language.as_deref(), Some("Spanish"));
    assert_eq!(store.find_candidates(2).await.unwrap().len(), 1);

    record.match_wait_start = Some(Utc::now());
    store.put(&record).await.unwrap();
    assert!(store.get(1).await.unwrap().match_wait_start.is_some());
}
