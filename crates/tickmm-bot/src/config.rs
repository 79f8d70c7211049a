//! Application configuration.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use tickmm_strategy::StrategyConfig;
use tickmm_telemetry::DEFAULT_MAX_LOG_LENGTH;

/// Tick record settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Upper bound on one serialized tick record, in characters.
    #[serde(default = "default_max_log_length")]
    pub max_log_length: usize,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            max_log_length: default_max_log_length(),
        }
    }
}

fn default_max_log_length() -> usize {
    DEFAULT_MAX_LOG_LENGTH
}

/// Top-level configuration file layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub strategy: StrategyConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> AppResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;
        config.strategy.validate()?;
        Ok(config)
    }
}
