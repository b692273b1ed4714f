//! Conformance test suite for `FunnelStore` implementations.
//!
//! A backend-agnostic suite that any `FunnelStore` implementation can run to
//! verify correctness. The suite covers:
//!
//! - **Empty store**: `latest_snapshot` is `None`, not an error
//! - **Insert**: full document read-back fidelity
//! - **Latest**: ordering by timestamp, independent of insertion order
//! - **Tie-break**: equal timestamps resolve to the most recent insert
//!
//! Backend tests call [`run_conformance_suite`] with a factory that creates
//! a fresh, empty store for each test:
//!
//! ```ignore
//! use activateflow_storage::conformance::run_conformance_suite;
//!
//! #[tokio::test]
//! async fn memory_conformance() {
//!     let report = run_conformance_suite(|| async { MemoryStore::new() }).await;
//!     assert_eq!(report.failed, 0, "{report}");
//! }
//! ```

use std::fmt;
use std::future::Future;

use activateflow_core::{FunnelSnapshot, FunnelStage};
use time::macros::datetime;
use time::OffsetDateTime;

use crate::FunnelStore;

/// Result of a single conformance test.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Test category (e.g. "empty", "insert", "latest").
    pub category: String,
    /// Test name.
    pub name: String,
    /// Whether the test passed.
    pub passed: bool,
    /// Error message if the test failed.
    pub message: Option<String>,
}

impl TestResult {
    fn from_result(category: &str, name: &str, result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self {
                category: category.to_string(),
                name: name.to_string(),
                passed: true,
                message: None,
            },
            Err(msg) => Self {
                category: category.to_string(),
                name: name.to_string(),
                passed: false,
                message: Some(msg),
            },
        }
    }
}

/// Aggregated report from a full conformance suite run.
#[derive(Debug, Clone)]
pub struct ConformanceReport {
    pub results: Vec<TestResult>,
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Conformance: {}/{} passed ({} failed)",
            self.passed, self.total, self.failed
        )?;
        for r in &self.results {
            if !r.passed {
                writeln!(
                    f,
                    "  FAIL [{}/{}]: {}",
                    r.category,
                    r.name,
                    r.message.as_deref().unwrap_or("(no message)")
                )?;
            }
        }
        Ok(())
    }
}

/// Run the full conformance suite against a storage backend.
///
/// The `factory` function is called once per test to create a fresh, empty
/// store, ensuring test isolation.
pub async fn run_conformance_suite<S, F, Fut>(factory: F) -> ConformanceReport
where
    S: FunnelStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let mut results = Vec::new();

    results.push(TestResult::from_result(
        "empty",
        "empty_store_returns_none",
        empty_store_returns_none(factory().await).await,
    ));
    results.push(TestResult::from_result(
        "insert",
        "insert_round_trips_full_document",
        insert_round_trips_full_document(factory().await).await,
    ));
    results.push(TestResult::from_result(
        "latest",
        "latest_is_max_timestamp_not_last_insert",
        latest_is_max_timestamp_not_last_insert(factory().await).await,
    ));
    results.push(TestResult::from_result(
        "latest",
        "latest_follows_sequential_submissions",
        latest_follows_sequential_submissions(factory().await).await,
    ));
    results.push(TestResult::from_result(
        "latest",
        "equal_timestamps_break_by_insertion_order",
        equal_timestamps_break_by_insertion_order(factory().await).await,
    ));

    let passed = results.iter().filter(|r| r.passed).count();
    let total = results.len();

    ConformanceReport {
        results,
        passed,
        failed: total - passed,
        total,
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn make_snapshot(id: &str, timestamp: OffsetDateTime) -> FunnelSnapshot {
    FunnelSnapshot {
        id: id.to_string(),
        revenue_per_activated_user: 450.0,
        stages: vec![
            FunnelStage {
                stage_name: "Signup Completed".to_string(),
                users: 10_000,
                avg_time_hours: 0.0,
                target_sla_hours: 0.0,
            },
            FunnelStage {
                stage_name: "Email Verified".to_string(),
                users: 7_200,
                avg_time_hours: 8.0,
                target_sla_hours: 2.0,
            },
        ],
        timestamp,
    }
}

async fn latest_id<S: FunnelStore>(store: &S) -> Result<String, String> {
    match store.latest_snapshot().await {
        Ok(Some(snapshot)) => Ok(snapshot.id),
        Ok(None) => Err("expected a snapshot, got None".to_string()),
        Err(e) => Err(format!("latest_snapshot failed: {e}")),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

async fn empty_store_returns_none<S: FunnelStore>(store: S) -> Result<(), String> {
    match store.latest_snapshot().await {
        Ok(None) => Ok(()),
        Ok(Some(snapshot)) => Err(format!("empty store returned snapshot {}", snapshot.id)),
        Err(e) => Err(format!("empty store errored: {e}")),
    }
}

async fn insert_round_trips_full_document<S: FunnelStore>(store: S) -> Result<(), String> {
    let snapshot = make_snapshot("round-trip", datetime!(2025-06-01 12:00:00 UTC));
    store
        .insert_snapshot(&snapshot)
        .await
        .map_err(|e| format!("insert failed: {e}"))?;

    match store.latest_snapshot().await {
        Ok(Some(read)) if read == snapshot => Ok(()),
        Ok(Some(read)) => Err(format!("document mutated in storage: {read:?}")),
        Ok(None) => Err("inserted snapshot not found".to_string()),
        Err(e) => Err(format!("latest_snapshot failed: {e}")),
    }
}

async fn latest_is_max_timestamp_not_last_insert<S: FunnelStore>(store: S) -> Result<(), String> {
    // Insert the newer snapshot first; latest must still be the max timestamp.
    let newer = make_snapshot("newer", datetime!(2025-06-02 00:00:00 UTC));
    let older = make_snapshot("older", datetime!(2025-06-01 00:00:00 UTC));

    for snapshot in [&newer, &older] {
        store
            .insert_snapshot(snapshot)
            .await
            .map_err(|e| format!("insert failed: {e}"))?;
    }

    let id = latest_id(&store).await?;
    if id == "newer" {
        Ok(())
    } else {
        Err(format!("expected 'newer', got '{id}'"))
    }
}

async fn latest_follows_sequential_submissions<S: FunnelStore>(store: S) -> Result<(), String> {
    let first = make_snapshot("first", datetime!(2025-06-01 00:00:00 UTC));
    let second = make_snapshot("second", datetime!(2025-06-01 00:00:01 UTC));

    for snapshot in [&first, &second] {
        store
            .insert_snapshot(snapshot)
            .await
            .map_err(|e| format!("insert failed: {e}"))?;
    }

    let id = latest_id(&store).await?;
    if id == "second" {
        Ok(())
    } else {
        Err(format!("expected 'second', got '{id}'"))
    }
}

async fn equal_timestamps_break_by_insertion_order<S: FunnelStore>(store: S) -> Result<(), String> {
    let tied = datetime!(2025-06-01 00:00:00 UTC);

    for id in ["tie-a", "tie-b", "tie-c"] {
        store
            .insert_snapshot(&make_snapshot(id, tied))
            .await
            .map_err(|e| format!("insert failed: {e}"))?;
    }

    let id = latest_id(&store).await?;
    if id == "tie-c" {
        Ok(())
    } else {
        Err(format!("expected last-inserted 'tie-c', got '{id}'"))
    }
}
