use async_trait::async_trait;

use activateflow_core::FunnelSnapshot;

use crate::error::StoreError;

/// The storage trait for funnel snapshot backends.
///
/// Snapshots are append-only: `insert_snapshot` never overwrites an existing
/// document, and no update or delete path exists.
///
/// ## Latest-snapshot semantics
///
/// `latest_snapshot` returns the snapshot with the maximum timestamp.
/// Equal timestamps are broken by insertion order: the most recently
/// inserted snapshot wins. Backends realize this with a composite ordering
/// key of `(timestamp, insertion sequence)` rather than relying on engine
/// iteration order.
///
/// ## Thread safety
///
/// Implementations must be `Send + Sync + 'static` so a single store can be
/// shared as axum application state for the process lifetime.
#[async_trait]
pub trait FunnelStore: Send + Sync + 'static {
    /// Append one snapshot to the store.
    async fn insert_snapshot(&self, snapshot: &FunnelSnapshot) -> Result<(), StoreError>;

    /// The most recent snapshot, or `None` if nothing has been stored.
    async fn latest_snapshot(&self) -> Result<Option<FunnelSnapshot>, StoreError>;
}
