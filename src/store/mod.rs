pub mod disk;
pub mod memory;

use crate::core::cache::SnapshotStore;
use crate::core::config::AppConfig;
use disk::DiskSnapshotStore;
use memory::MemorySnapshotStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Opens the persistent snapshot store under the configured data path.
///
/// Falls back to an in-memory store when the data directory is unavailable,
/// so lookups keep working without persistence.
pub fn open_store(config: &AppConfig) -> Arc<dyn SnapshotStore> {
    let opened = config
        .default_data_path()
        .and_then(|path| DiskSnapshotStore::open(&path.join("cache")));

    match opened {
        Ok(store) => {
            debug!("Opened disk snapshot store");
            Arc::new(store)
        }
        Err(e) => {
            warn!(error = %e, "Falling back to in-memory snapshot store");
            Arc::new(MemorySnapshotStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::{RateSnapshot, Rates};
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_open_store_persists_under_data_path() {
        let dir = tempdir().unwrap();
        let config = AppConfig {
            data_path: Some(dir.path().to_string_lossy().into_owned()),
            ..AppConfig::default()
        };

        {
            let store = open_store(&config);
            store
                .put(RateSnapshot::new("usd", Rates::from([("inr".to_string(), 83.1)])))
                .await
                .unwrap();
        }

        assert!(dir.path().join("cache").exists());
        let store = open_store(&config);
        assert!(store.get("usd").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_open_store_falls_back_to_memory() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file, not a directory").unwrap();
        let config = AppConfig {
            data_path: Some(blocker.to_string_lossy().into_owned()),
            ..AppConfig::default()
        };

        let store = open_store(&config);
        store
            .put(RateSnapshot::new("usd", Rates::from([("inr".to_string(), 83.1)])))
            .await
            .unwrap();
        assert!(store.get("usd").await.unwrap().is_some());
    }
}
