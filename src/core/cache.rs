//! Persistent snapshot storage abstraction

use crate::core::rates::RateSnapshot;
use anyhow::Result;
use async_trait::async_trait;

/// Key-value storage for rate snapshots, keyed by base currency code.
///
/// `put` replaces any snapshot already stored under the same key, so a store
/// never holds more than one snapshot per base currency.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<RateSnapshot>>;

    async fn put(&self, snapshot: RateSnapshot) -> Result<()>;
}
