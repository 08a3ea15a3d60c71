use crate::core::cache::SnapshotStore;
use crate::core::rates::RateSnapshot;
use anyhow::{Context, Result};
use async_trait::async_trait;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const PARTITION: &str = "rates";

/// Snapshot store backed by a fjall partition, surviving process restarts.
///
/// Values are JSON encoded snapshots keyed by the base currency code.
pub struct DiskSnapshotStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskSnapshotStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create store directory: {}", path.display()))?;

        let keyspace = fjall::Config::new(path)
            .open()
            .with_context(|| format!("Failed to open keyspace at {}", path.display()))?;
        let partition = keyspace.open_partition(PARTITION, PartitionCreateOptions::default())?;
        Ok(Self {
            keyspace,
            partition,
        })
    }
}

#[async_trait]
impl SnapshotStore for DiskSnapshotStore {
    async fn get(&self, key: &str) -> Result<Option<RateSnapshot>> {
        let Some(value) = self.partition.get(key.as_bytes())? else {
            debug!("Snapshot MISS for key: {}", key);
            return Ok(None);
        };
        let snapshot: RateSnapshot = serde_json::from_slice(&value)
            .with_context(|| format!("Failed to decode snapshot for {key}"))?;
        debug!("Snapshot HIT for key: {}", key);
        Ok(Some(snapshot))
    }

    async fn put(&self, snapshot: RateSnapshot) -> Result<()> {
        let value = serde_json::to_vec(&snapshot)?;
        self.partition.insert(snapshot.key.as_bytes(), value)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Snapshot PUT for key: {}", snapshot.key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::Rates;
    use tempfile::tempdir;

    fn snapshot(key: &str, npr: f64) -> RateSnapshot {
        RateSnapshot::new(key, Rates::from([("npr".to_string(), npr)]))
    }

    #[tokio::test]
    async fn test_disk_store_get_put() {
        let dir = tempdir().unwrap();
        let store = DiskSnapshotStore::open(dir.path()).unwrap();

        assert!(store.get("usd").await.unwrap().is_none());

        store.put(snapshot("usd", 133.5)).await.unwrap();

        let stored = store.get("usd").await.unwrap().unwrap();
        assert_eq!(stored.key, "usd");
        assert_eq!(stored.rates["npr"], 133.5);
        assert!(store.get("eur").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_disk_store_upserts_by_key() {
        let dir = tempdir().unwrap();
        let store = DiskSnapshotStore::open(dir.path()).unwrap();

        store.put(snapshot("usd", 130.0)).await.unwrap();
        store.put(snapshot("usd", 133.5)).await.unwrap();
        store.put(snapshot("eur", 145.0)).await.unwrap();

        assert_eq!(store.get("usd").await.unwrap().unwrap().rates["npr"], 133.5);
        assert_eq!(store.get("eur").await.unwrap().unwrap().rates["npr"], 145.0);
    }

    #[tokio::test]
    async fn test_disk_store_survives_reopen() {
        let dir = tempdir().unwrap();
        let original = snapshot("usd", 133.5);
        {
            let store = DiskSnapshotStore::open(dir.path()).unwrap();
            store.put(original.clone()).await.unwrap();
        }

        let store = DiskSnapshotStore::open(dir.path()).unwrap();
        let stored = store.get("usd").await.unwrap().unwrap();
        assert_eq!(stored.rates, original.rates);
        assert_eq!(
            stored.cached_at.timestamp_millis(),
            original.cached_at.timestamp_millis()
        );
    }

    #[tokio::test]
    async fn test_disk_store_rejects_corrupt_value() {
        let dir = tempdir().unwrap();
        let store = DiskSnapshotStore::open(dir.path()).unwrap();
        store.partition.insert("usd", "not json").unwrap();

        assert!(store.get("usd").await.is_err());
    }
}
