use crate::core::risk::RiskModel;
use crate::core::simulator::Strategy;
use crate::core::window::WindowToken;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};
use tracing::debug;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FundApiConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub fund_api: Option<FundApiConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            fund_api: Some(FundApiConfig {
                base_url: DEFAULT_API_BASE_URL.to_string(),
            }),
        }
    }
}

/// Values used when a command is run without explicit options.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct DefaultsConfig {
    pub window: WindowToken,
    pub strategy: Strategy,
    pub amount: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            window: WindowToken::OneYear,
            strategy: Strategy::Lumpsum,
            amount: 10000.0,
        }
    }
}

fn default_cache_ttl_seconds() -> u64 {
    15 * 60
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub risk: RiskModel,
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: u64,
    pub data_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            providers: ProvidersConfig::default(),
            defaults: DefaultsConfig::default(),
            risk: RiskModel::default(),
            cache_ttl_seconds: default_cache_ttl_seconds(),
            data_path: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "fundscope", "fundscope")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("dev", "fundscope", "fundscope")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config.risk.validate().with_context(|| {
            format!("Invalid risk model in config file: {}", path.as_ref().display())
        })?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn api_base_url(&self) -> &str {
        self.providers
            .fund_api
            .as_ref()
            .map_or(DEFAULT_API_BASE_URL, |p| &p.base_url)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}
