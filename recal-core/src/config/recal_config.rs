//! Top-level RECAL configuration with 3-layer resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AssistConfig, LearningConfig, LimitsConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`RECAL_*`)
/// 2. Project config (`recal.toml` in the given root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RecalConfig {
    pub limits: LimitsConfig,
    pub learning: LearningConfig,
    pub assist: AssistConfig,
}

impl RecalConfig {
    /// Load configuration with 3-layer resolution.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 3 → 2: project config
        let project_path = root.join("recal.toml");
        if project_path.exists() {
            let raw = std::fs::read_to_string(&project_path).map_err(|e| {
                ConfigError::IoError {
                    path: project_path.display().to_string(),
                    message: e.to_string(),
                }
            })?;
            config = toml::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: project_path.display().to_string(),
                message: e.to_string(),
            })?;
        }

        // Layer 1: environment variables
        Self::apply_env_overrides(&mut config);

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    fn apply_env_overrides(config: &mut Self) {
        if let Some(v) = env_parse::<usize>("RECAL_MAX_ESTIMATE_BYTES") {
            config.limits.max_estimate_bytes = v;
        }
        if let Some(v) = env_parse::<u32>("RECAL_REPORT_SCORE_THRESHOLD") {
            config.limits.report_score_threshold = v;
        }
        if let Some(v) = env_parse::<f64>("RECAL_MIN_APPLY_WEIGHT") {
            config.learning.min_apply_weight = v;
        }
        if let Some(v) = env_parse::<u64>("RECAL_ASSIST_TIMEOUT_MS") {
            config.assist.timeout_ms = v;
        }
    }

    /// Validate the configuration values.
    pub fn validate(config: &Self) -> Result<(), ConfigError> {
        if config.limits.max_estimate_bytes == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "limits.max_estimate_bytes".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&config.learning.min_apply_weight) {
            return Err(ConfigError::ValidationFailed {
                field: "learning.min_apply_weight".to_string(),
                message: "must be between 0.0 and 1.0".to_string(),
            });
        }
        if config.learning.weight_floor <= 0.0
            || config.learning.weight_floor > config.learning.weight_ceiling
        {
            return Err(ConfigError::ValidationFailed {
                field: "learning.weight_floor".to_string(),
                message: "must be positive and not exceed weight_ceiling".to_string(),
            });
        }
        if config.learning.weight_ceiling > 1.0 {
            return Err(ConfigError::ValidationFailed {
                field: "learning.weight_ceiling".to_string(),
                message: "must not exceed 1.0".to_string(),
            });
        }
        if config.assist.timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "assist.timeout_ms".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
