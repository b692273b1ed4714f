//! Conformance runs for both snapshot store backends, plus sled durability.

use std::sync::atomic::{AtomicU32, Ordering};

use time::macros::datetime;

use activateflow_core::{FunnelSnapshot, FunnelStage};
use activateflow_storage::conformance::run_conformance_suite;
use activateflow_storage::{FunnelStore, MemoryStore, SledStore};

#[tokio::test]
async fn memory_store_conformance() {
    let report = run_conformance_suite(|| async { MemoryStore::new() }).await;
    assert_eq!(report.failed, 0, "{report}");
}

#[tokio::test]
async fn sled_store_conformance() {
    let dir = tempfile::tempdir().expect("tempdir");
    let counter = AtomicU32::new(0);

    let report = run_conformance_suite(|| {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        let path = dir.path().join(format!("db-{n}"));
        async move { SledStore::open(&path, "funnel_data").expect("open sled store") }
    })
    .await;

    assert_eq!(report.failed, 0, "{report}");
}

#[tokio::test]
async fn sled_store_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("db");

    let snapshot = FunnelSnapshot {
        id: "persisted".to_string(),
        revenue_per_activated_user: 450.0,
        stages: vec![FunnelStage {
            stage_name: "Signup Completed".to_string(),
            users: 10_000,
            avg_time_hours: 0.0,
            target_sla_hours: 0.0,
        }],
        timestamp: datetime!(2025-06-01 12:00:00 UTC),
    };

    {
        let store = SledStore::open(&path, "funnel_data").expect("open sled store");
        store
            .insert_snapshot(&snapshot)
            .await
            .expect("insert snapshot");
    }

    let reopened = SledStore::open(&path, "funnel_data").expect("reopen sled store");
    let read = reopened
        .latest_snapshot()
        .await
        .expect("latest after reopen")
        .expect("snapshot survives reopen");
    assert_eq!(read, snapshot);
}

#[tokio::test]
async fn sled_store_collections_are_isolated() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("db");

    {
        let store = SledStore::open(&path, "funnel_data").expect("open sled store");
        let snapshot = FunnelSnapshot {
            id: "in-funnel-data".to_string(),
            revenue_per_activated_user: 1.0,
            stages: Vec::new(),
            timestamp: datetime!(2025-06-01 12:00:00 UTC),
        };
        store
            .insert_snapshot(&snapshot)
            .await
            .expect("insert snapshot");
    }

    let other = SledStore::open(&path, "other_collection").expect("open second collection");
    assert!(other
        .latest_snapshot()
        .await
        .expect("latest on empty collection")
        .is_none());
}
