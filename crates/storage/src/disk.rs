//! Sled-backed persistent snapshot store.

use std::path::Path;

use async_trait::async_trait;

use activateflow_core::FunnelSnapshot;

use crate::error::StoreError;
use crate::traits::FunnelStore;

/// Persistent snapshot store on an embedded sled database.
///
/// One database per process; each logical collection is a named sled tree.
/// Record keys are the 16-byte big-endian timestamp in nanoseconds followed
/// by the 8-byte big-endian monotonic id from [`sled::Db::generate_id`], so
/// `Tree::last` yields the maximum timestamp and equal timestamps resolve to
/// the most recently inserted record. Values are JSON documents.
pub struct SledStore {
    db: sled::Db,
    tree: sled::Tree,
}

impl SledStore {
    /// Open or create the database at `path` and the named snapshot tree.
    pub fn open(path: impl AsRef<Path>, collection: &str) -> Result<Self, StoreError> {
        let db = sled::open(path.as_ref())?;
        let tree = db.open_tree(collection)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            collection,
            records = tree.len(),
            "opened snapshot store"
        );
        Ok(Self { db, tree })
    }

    fn record_key(&self, snapshot: &FunnelSnapshot) -> Result<[u8; 24], StoreError> {
        // Timestamps are server-assigned and never precede the epoch; clamp
        // anyway so a hostile document cannot underflow the cast.
        let nanos = snapshot.timestamp.unix_timestamp_nanos().max(0) as u128;
        let seq = self.db.generate_id()?;
        let mut key = [0u8; 24];
        key[..16].copy_from_slice(&nanos.to_be_bytes());
        key[16..].copy_from_slice(&seq.to_be_bytes());
        Ok(key)
    }
}

#[async_trait]
impl FunnelStore for SledStore {
    async fn insert_snapshot(&self, snapshot: &FunnelSnapshot) -> Result<(), StoreError> {
        let key = self.record_key(snapshot)?;
        let value = serde_json::to_vec(snapshot)?;
        let tree = self.tree.clone();

        tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
            tree.insert(key, value)?;
            tree.flush()?;
            Ok(())
        })
        .await
        .map_err(|e| StoreError::Backend(format!("storage task failed: {e}")))?
    }

    async fn latest_snapshot(&self) -> Result<Option<FunnelSnapshot>, StoreError> {
        let tree = self.tree.clone();
        let last = tokio::task::spawn_blocking(move || tree.last())
            .await
            .map_err(|e| StoreError::Backend(format!("storage task failed: {e}")))??;

        match last {
            Some((_, value)) => Ok(Some(serde_json::from_slice(&value)?)),
            None => Ok(None),
        }
    }
}
