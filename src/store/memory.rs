use crate::core::cache::SnapshotStore;
use crate::core::rates::RateSnapshot;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory snapshot store, lost when the process exits
pub struct MemorySnapshotStore {
    inner: Arc<Mutex<HashMap<String, RateSnapshot>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of stored snapshots
    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}

impl Default for MemorySnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn get(&self, key: &str) -> Result<Option<RateSnapshot>> {
        let snapshots = self.inner.lock().await;
        let snapshot = snapshots.get(key).cloned();
        if snapshot.is_some() {
            debug!("Snapshot HIT for key: {}", key);
        } else {
            debug!("Snapshot MISS for key: {}", key);
        }
        Ok(snapshot)
    }

    async fn put(&self, snapshot: RateSnapshot) -> Result<()> {
        let mut snapshots = self.inner.lock().await;
        debug!("Snapshot PUT for key: {}", snapshot.key);
        snapshots.insert(snapshot.key.clone(), snapshot);
        Ok(())
    }
}
