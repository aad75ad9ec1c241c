pub mod types;

pub use types::*;

use crate::error::AppError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Optional user configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tools: ToolsConfig,
    pub remux: RemuxConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the TOML file, or defaults if there is none
    pub fn load() -> Result<Self, AppError> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from_file(&config_path)
    }

    /// Load configuration, falling back to defaults when the file is unusable
    pub fn load_or_default(loaded: Result<Self, AppError>) -> Self {
        loaded.unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Load configuration from a specific file
    fn load_from_file(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config file: {}", e)))?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the default configuration file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("changelang")
            .join("config.toml")
    }
}
