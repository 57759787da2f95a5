//! Configuration for the reasoning and agent orchestration core.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
    #[error("Failed to read configuration: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed for {field}: {reason}")]
    ValidationError { field: String, reason: String },
}

fn default_method() -> String {
    "weighted_average".to_string()
}

/// Weights the WIN scorer applies across its three dimensions (§4.9).
/// Must sum to 1.0; validated on load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WinWeights {
    pub wisdom: f64,
    pub intelligence: f64,
    pub networking: f64,
}

impl Default for WinWeights {
    fn default() -> Self {
        Self {
            wisdom: 0.4,
            intelligence: 0.4,
            networking: 0.2,
        }
    }
}

/// Tunables for the reasoning pipeline (C1-C11), loaded from an optional
/// TOML file with defaults for everything (§6.5, §9 Open Questions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasoningConfig {
    /// Maximum tensions processed concurrently in a batch reasoning run.
    pub max_batch_concurrency: usize,
    /// Which [`crate::domain::reasoning::priority_calculator::PriorityMethod`]
    /// the coordinator uses when the caller doesn't specify one.
    #[serde(default = "default_method")]
    pub default_priority_method: String,
    /// Whether [`crate::domain::reasoning::rule_engine::RuleEngine`] seeds
    /// itself with the five built-in rules on construction.
    pub rule_engine_defaults_enabled: bool,
    pub win_scoring_weights: WinWeights,
    /// Most-recent performance records an [`crate::domain::models::Agent`]
    /// retains (§9 Open Question: configurable, default 100).
    pub performance_history_limit: usize,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            max_batch_concurrency: 16,
            default_priority_method: default_method(),
            rule_engine_defaults_enabled: true,
            win_scoring_weights: WinWeights::default(),
            performance_history_limit: 100,
        }
    }
}

impl ReasoningConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_batch_concurrency == 0 {
            return Err(ConfigError::ValidationError {
                field: "max_batch_concurrency".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        let weight_sum = self.win_scoring_weights.wisdom
            + self.win_scoring_weights.intelligence
            + self.win_scoring_weights.networking;
        if (weight_sum - 1.0).abs() > 1e-6 {
            return Err(ConfigError::ValidationError {
                field: "win_scoring_weights".to_string(),
                reason: format!("wisdom + intelligence + networking must sum to 1.0, got {weight_sum}"),
            });
        }
        if self.performance_history_limit == 0 {
            return Err(ConfigError::ValidationError {
                field: "performance_history_limit".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    pub fn sample_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_internally_consistent() {
        let config = ReasoningConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_file_is_reported() {
        let err = ReasoningConfig::from_file("/nonexistent/path/reasoning.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn mismatched_win_weights_fail_validation() {
        let mut config = ReasoningConfig::default();
        config.win_scoring_weights.wisdom = 0.9;
        assert!(config.validate().is_err());
    }
}
