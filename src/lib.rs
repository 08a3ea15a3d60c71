pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::{Connectivity, RateCache, StaticConnectivity, TcpProbe};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

pub enum AppCommand {
    Rates { base: Option<String> },
    Convert { amount: f64, from: String, to: String },
    Defaults,
}

/// Wires store, sources and connectivity from `config` into a [`RateCache`].
pub fn build_rate_cache(config: &AppConfig, offline: bool) -> Result<RateCache> {
    let store = store::open_store(config);
    let sources = providers::build_sources(config)?;

    let connectivity: Arc<dyn Connectivity> = if offline {
        Arc::new(StaticConnectivity::offline())
    } else if let Some(addr) = &config.connectivity_probe {
        Arc::new(TcpProbe::new(addr, PROBE_TIMEOUT))
    } else {
        Arc::new(StaticConnectivity::online())
    };

    Ok(RateCache::new(store, sources, connectivity).with_freshness(config.freshness()))
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    offline: bool,
) -> Result<()> {
    info!("tripfx starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Defaults => {
            println!("{}", cli::rates::rates_table(&crate::core::default_rates()));
        }
        AppCommand::Rates { base } => {
            let cache = build_rate_cache(&config, offline)?;
            let base = base.as_deref().unwrap_or(&config.base_currency);
            cli::rates::run_rates(&cache, Some(base)).await;
        }
        AppCommand::Convert { amount, from, to } => {
            let cache = build_rate_cache(&config, offline)?;
            cli::convert::run_convert(&cache, amount, &from, &to).await;
        }
    }
    Ok(())
}
