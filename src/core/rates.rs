//! Rate snapshot types and the remote source abstraction

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;

/// Target currency code to the number of target units per one base unit.
pub type Rates = HashMap<String, f64>;

/// One cached fetch result for a base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    pub key: String,
    pub rates: Rates,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub cached_at: DateTime<Utc>,
}

impl RateSnapshot {
    pub fn new(key: impl Into<String>, rates: Rates) -> Self {
        Self {
            key: key.into(),
            rates,
            cached_at: Utc::now(),
        }
    }

    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.cached_at
    }

    /// A snapshot dated in the future (clock stepped back) is never fresh.
    pub fn is_fresh(&self, now: DateTime<Utc>, window: Duration) -> bool {
        let age = self.age(now);
        age >= Duration::zero() && age < window
    }
}

/// Why a single source attempt did not produce rates.
#[derive(Debug, Clone, PartialEq)]
pub enum FailureReason {
    /// DNS, connect, timeout or body read failure
    Transport(String),
    /// Non-success HTTP status
    Status(u16),
    /// Body is not JSON or the base field is not a rate table
    Malformed(String),
    /// Body parsed but has no field named after the base currency
    MissingBase(String),
}

impl Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::Transport(e) => write!(f, "transport error: {e}"),
            FailureReason::Status(code) => write!(f, "HTTP status {code}"),
            FailureReason::Malformed(e) => write!(f, "malformed response: {e}"),
            FailureReason::MissingBase(key) => write!(f, "response has no '{key}' field"),
        }
    }
}

impl std::error::Error for FailureReason {}

#[derive(Debug, Clone, PartialEq)]
pub struct AttemptFailure {
    pub source: String,
    pub reason: FailureReason,
}

impl Display for AttemptFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.source, self.reason)
    }
}

/// A remote provider of rate tables for a base currency.
#[async_trait]
pub trait RateSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch_rates(&self, key: &str) -> Result<Rates, FailureReason>;
}
