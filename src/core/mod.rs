//! Core business logic abstractions

pub mod cache;
pub mod config;
pub mod connectivity;
pub mod convert;
pub mod defaults;
pub mod log;
pub mod rate_cache;
pub mod rates;

// Re-export main types for cleaner imports
pub use cache::SnapshotStore;
pub use connectivity::{Connectivity, StaticConnectivity, TcpProbe};
pub use defaults::default_rates;
pub use rate_cache::{Conversion, RateCache, RateLookup, RateOrigin};
pub use rates::{AttemptFailure, FailureReason, RateSnapshot, RateSource, Rates};
