use crate::core::conversion::{
    DEFAULT_RATE, DEFAULT_SOURCE_CURRENCY, DEFAULT_TARGET_CURRENCY, ExchangeRate,
};
use crate::core::session::SessionMode;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ExchangeConfig {
    pub source_currency: String,
    pub target_currency: String,
    pub rate: f64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        ExchangeConfig {
            source_currency: DEFAULT_SOURCE_CURRENCY.to_string(),
            target_currency: DEFAULT_TARGET_CURRENCY.to_string(),
            rate: DEFAULT_RATE,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct SessionConfig {
    #[serde(default)]
    pub per_user: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl AppConfig {
    /// Loads the config from the default location, falling back to the
    /// built-in defaults when no file was set up.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "fxconv", "fxconv")
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

    pub fn exchange_rate(&self) -> Result<ExchangeRate> {
        ExchangeRate::new(
            &self.exchange.source_currency,
            &self.exchange.target_currency,
            self.exchange.rate,
        )
        .context("Invalid exchange settings in config")
    }

    pub fn session_mode(&self) -> SessionMode {
        if self.session.per_user {
            SessionMode::PerUser
        } else {
            SessionMode::Single
        }
    }
}
