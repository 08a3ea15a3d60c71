//! Offline-aware rate lookup with tiered fallback
//!
//! A lookup walks a fixed chain: fresh snapshot, remote sources in priority
//! order, stale snapshot, default table. It never fails.

use crate::core::cache::SnapshotStore;
use crate::core::connectivity::Connectivity;
use crate::core::convert::{convert, cross_convert};
use crate::core::defaults::{DEFAULT_BASE, default_rates};
use crate::core::rates::{AttemptFailure, RateSnapshot, RateSource, Rates};
use chrono::{Duration, Utc};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Snapshots younger than this are served without touching the network.
pub const DEFAULT_FRESHNESS: Duration = Duration::hours(1);

#[derive(Debug, Clone, PartialEq)]
pub enum RateOrigin {
    /// Snapshot within the freshness window
    Fresh,
    /// Fetched just now from the named source
    Fetched { source: String },
    /// Snapshot past the freshness window, served because no source answered
    Stale { age: Duration },
    /// Hardcoded table, relative to USD
    Default,
}

impl Display for RateOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateOrigin::Fresh => write!(f, "cache"),
            RateOrigin::Fetched { source } => write!(f, "{source}"),
            RateOrigin::Stale { age } => write!(f, "stale cache ({}m old)", age.num_minutes()),
            RateOrigin::Default => write!(f, "built-in defaults"),
        }
    }
}

/// Rates for a base currency along with where they came from.
#[derive(Debug, Clone)]
pub struct RateLookup {
    pub key: String,
    pub rates: Rates,
    pub origin: RateOrigin,
    /// Sources tried and failed during this lookup, in attempt order
    pub failures: Vec<AttemptFailure>,
}

#[derive(Debug, Clone)]
pub struct Conversion {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub value: Option<f64>,
    pub origin: RateOrigin,
}

pub struct RateCache {
    store: Arc<dyn SnapshotStore>,
    sources: Vec<Arc<dyn RateSource>>,
    connectivity: Arc<dyn Connectivity>,
    freshness: Duration,
}

impl RateCache {
    /// `sources` are tried in the given order; the first to answer wins.
    pub fn new(
        store: Arc<dyn SnapshotStore>,
        sources: Vec<Arc<dyn RateSource>>,
        connectivity: Arc<dyn Connectivity>,
    ) -> Self {
        Self {
            store,
            sources,
            connectivity,
            freshness: DEFAULT_FRESHNESS,
        }
    }

    pub fn with_freshness(mut self, freshness: Duration) -> Self {
        self.freshness = freshness;
        self
    }

    /// Returns rates for `key` (default `"usd"`). Always yields a non-empty table.
    pub async fn get_rates(&self, key: Option<&str>) -> Rates {
        self.lookup(key).await.rates
    }

    #[instrument(name = "RateLookup", skip(self))]
    pub async fn lookup(&self, key: Option<&str>) -> RateLookup {
        let key = normalize_key(key);
        let cached = self.read_snapshot(&key).await;

        if let Some(snapshot) = &cached {
            if snapshot.is_fresh(Utc::now(), self.freshness) {
                debug!("Fresh snapshot for {}", key);
                return RateLookup {
                    key,
                    rates: snapshot.rates.clone(),
                    origin: RateOrigin::Fresh,
                    failures: Vec::new(),
                };
            }
        }

        let mut failures = Vec::new();
        if self.connectivity.is_online().await {
            for source in &self.sources {
                match source.fetch_rates(&key).await {
                    Ok(rates) => {
                        self.write_snapshot(&key, &rates, cached.as_ref()).await;
                        info!(
                            source = source.name(),
                            count = rates.len(),
                            "Fetched rates for {}",
                            key
                        );
                        return RateLookup {
                            key,
                            rates,
                            origin: RateOrigin::Fetched {
                                source: source.name().to_string(),
                            },
                            failures,
                        };
                    }
                    Err(reason) => {
                        warn!(source = source.name(), %reason, "Rate source failed for {}", key);
                        failures.push(AttemptFailure {
                            source: source.name().to_string(),
                            reason,
                        });
                    }
                }
            }
        } else {
            debug!("Offline, skipping remote sources for {}", key);
        }

        if let Some(snapshot) = cached {
            debug!("Serving stale snapshot for {}", key);
            return RateLookup {
                key,
                origin: RateOrigin::Stale {
                    age: snapshot.age(Utc::now()),
                },
                rates: snapshot.rates,
                failures,
            };
        }

        debug!("No snapshot for {}, using defaults", key);
        RateLookup {
            key,
            rates: default_rates(),
            origin: RateOrigin::Default,
            failures,
        }
    }

    /// Converts `amount` from one currency to another.
    ///
    /// Uses rates with `from` as base. When the target is missing from those
    /// (the default table is USD based) both codes are converted through the
    /// default table instead.
    pub async fn convert(&self, amount: f64, from: &str, to: &str) -> Conversion {
        let lookup = self.lookup(Some(from)).await;
        let to = normalize_key(Some(to));

        let value = match lookup.origin {
            RateOrigin::Default => cross_convert(&lookup.rates, amount, &lookup.key, &to),
            _ => convert(&lookup.rates, &lookup.key, amount, &to)
                .or_else(|| cross_convert(&default_rates(), amount, &lookup.key, &to)),
        };

        Conversion {
            amount,
            from: lookup.key,
            to,
            value,
            origin: lookup.origin,
        }
    }

    async fn read_snapshot(&self, key: &str) -> Option<RateSnapshot> {
        match self.store.get(key).await {
            Ok(snapshot) => snapshot.filter(|s| !s.rates.is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read snapshot for {}", key);
                None
            }
        }
    }

    async fn write_snapshot(&self, key: &str, rates: &Rates, previous: Option<&RateSnapshot>) {
        let mut snapshot = RateSnapshot::new(key, rates.clone());
        if let Some(previous) = previous {
            snapshot.cached_at = snapshot.cached_at.max(previous.cached_at);
        }
        if let Err(e) = self.store.put(snapshot).await {
            warn!(error = %e, "Failed to store snapshot for {}", key);
        }
    }
}

fn normalize_key(key: Option<&str>) -> String {
    key.map(str::trim)
        .filter(|k| !k.is_empty())
        .unwrap_or(DEFAULT_BASE)
        .to_lowercase()
}
