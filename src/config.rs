use std::path::Path;

use log::warn;

use crate::ai::{DeepeningConfig, EvalWeights, WIN_SCORE};
use crate::error::ConfigError;

/// Top-level engine configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub search: DeepeningConfig,
    pub eval: EvalWeights,
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let search = &self.search;
        if !search.time_budget_secs.is_finite() || search.time_budget_secs < 0.0 {
            return Err(ConfigError::Validation(
                "search.time_budget_secs must be a finite value >= 0".into(),
            ));
        }
        if search.min_depth == 0 {
            return Err(ConfigError::Validation(
                "search.min_depth must be >= 1".into(),
            ));
        }
        if search.max_depth < search.min_depth {
            return Err(ConfigError::Validation(
                "search.max_depth must be >= search.min_depth".into(),
            ));
        }
        if search.use_transposition && search.tt_max_entries == 0 {
            return Err(ConfigError::Validation(
                "search.tt_max_entries must be > 0 when the transposition table is enabled"
                    .into(),
            ));
        }

        if !self.eval.is_non_negative() {
            return Err(ConfigError::Validation(
                "eval weights must be >= 0".into(),
            ));
        }
        if self.eval.max_magnitude() >= i64::from(WIN_SCORE) {
            return Err(ConfigError::Validation(format!(
                "eval weights can reach {} and would be confused with a win ({WIN_SCORE})",
                self.eval.max_magnitude()
            )));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&EngineConfig::default())
    }
}
