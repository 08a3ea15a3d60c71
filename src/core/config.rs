use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};
use tracing::{debug, warn};

use crate::core::defaults::DEFAULT_BASE;

/// One remote rate provider. `{key}` in the template is replaced with the
/// lowercase base currency code.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProviderConfig {
    pub name: String,
    pub url_template: String,
}

fn default_base_currency() -> String {
    DEFAULT_BASE.to_string()
}

fn default_freshness_secs() -> u64 {
    60 * 60
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig {
            name: "jsdelivr".to_string(),
            url_template:
                "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest/v1/currencies/{key}.json"
                    .to_string(),
        },
        ProviderConfig {
            name: "pages.dev".to_string(),
            url_template: "https://latest.currency-api.pages.dev/v1/currencies/{key}.json"
                .to_string(),
        },
    ]
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    #[serde(default = "default_freshness_secs")]
    pub freshness_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Tried in order, first success wins
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderConfig>,
    /// `host:port` to probe before going to the network
    #[serde(default)]
    pub connectivity_probe: Option<String>,
    #[serde(default)]
    pub data_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            base_currency: default_base_currency(),
            freshness_secs: default_freshness_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            providers: default_providers(),
            connectivity_probe: None,
            data_path: None,
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, or defaults if there is none.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "tripfx", "tripfx")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("dev", "tripfx", "tripfx")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Windows too large for a `chrono::Duration` are clamped to the maximum.
    pub fn freshness(&self) -> chrono::Duration {
        i64::try_from(self.freshness_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or_else(|| {
                warn!(
                    freshness_secs = self.freshness_secs,
                    "Freshness window out of range, clamping"
                );
                chrono::Duration::MAX
            })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
