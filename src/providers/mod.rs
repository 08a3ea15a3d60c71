pub mod currency_api;
pub mod util;

use crate::core::config::AppConfig;
use crate::core::rates::RateSource;
use anyhow::{Context, Result};
use currency_api::HttpRateSource;
use std::sync::Arc;

/// Builds the configured rate sources, preserving their priority order.
pub fn build_sources(config: &AppConfig) -> Result<Vec<Arc<dyn RateSource>>> {
    config
        .providers
        .iter()
        .map(|provider| {
            HttpRateSource::new(&provider.name, &provider.url_template, config.request_timeout())
                .map(|source| Arc::new(source) as Arc<dyn RateSource>)
                .with_context(|| format!("Failed to build rate source: {}", provider.name))
        })
        .collect()
}
