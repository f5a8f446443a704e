use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::providers::frankfurter::DEFAULT_BASE_URL;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Currencies and amount used when a command omits them.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DefaultsConfig {
    #[serde(default = "default_from")]
    pub from: String,
    #[serde(default = "default_to")]
    pub to: String,
    #[serde(default = "default_amount")]
    pub amount: f64,
}

fn default_from() -> String {
    "USD".to_string()
}

fn default_to() -> String {
    "EUR".to_string()
}

fn default_amount() -> f64 {
    1.0
}

fn default_trend_days() -> u32 {
    7
}

fn default_debounce_ms() -> u64 {
    500
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        DefaultsConfig {
            from: default_from(),
            to: default_to(),
            amount: default_amount(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default = "default_trend_days")]
    pub trend_days: u32,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            provider: ProviderConfig::default(),
            defaults: DefaultsConfig::default(),
            trend_days: default_trend_days(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location; a missing file just
    /// means defaults.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file found, using defaults");
            return Ok(AppConfig::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "fxlens", "fxlens")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
