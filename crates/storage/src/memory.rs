use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use activateflow_core::FunnelSnapshot;

use crate::error::StoreError;
use crate::traits::FunnelStore;

/// In-memory snapshot store for tests and ephemeral serving.
///
/// Keys are `(timestamp nanos, insertion sequence)`, so the map's last entry
/// is always the latest snapshot under the tie-break rule.
#[derive(Default)]
pub struct MemoryStore {
    snapshots: RwLock<BTreeMap<(i128, u64), FunnelSnapshot>>,
    seq: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FunnelStore for MemoryStore {
    async fn insert_snapshot(&self, snapshot: &FunnelSnapshot) -> Result<(), StoreError> {
        let key = (
            snapshot.timestamp.unix_timestamp_nanos(),
            self.seq.fetch_add(1, Ordering::SeqCst),
        );
        self.snapshots.write().await.insert(key, snapshot.clone());
        Ok(())
    }

    async fn latest_snapshot(&self) -> Result<Option<FunnelSnapshot>, StoreError> {
        let snapshots = self.snapshots.read().await;
        Ok(snapshots.values().next_back().cloned())
    }
}
