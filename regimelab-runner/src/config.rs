//! TOML run configuration.
//!
//! ```toml
//! [engine]
//! min_confidence = 0.65
//!
//! [engine.indicators]
//! rsi_period = 10
//!
//! [runner]
//! parallel = true
//! threads = 4
//! top_picks = 5
//! ```
//!
//! Every table and field is optional. Engine values are validated on load so
//! a bad file fails before any ticker is evaluated.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use regimelab_core::{ConfigError, EngineConfig};

/// Errors from loading a run-config file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid engine config: {0}")]
    Engine(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub engine: EngineConfig,
    pub runner: RunnerSettings,
}

/// Aggregator execution settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerSettings {
    /// Evaluate tickers on the rayon pool. `false` runs them in order.
    pub parallel: bool,
    /// Thread cap for a dedicated pool; `None` uses the global pool.
    pub threads: Option<usize>,
    /// Number of picks listed in the summary.
    pub top_picks: usize,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
            top_picks: 3,
        }
    }
}

impl RunConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigFileError> {
        let config: Self = toml::from_str(content)?;
        config.engine.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = RunConfig::from_toml_str("").unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.engine.min_confidence, 0.6);
        assert!(config.runner.parallel);
        assert_eq!(config.runner.top_picks, 3);
    }

    #[test]
    fn nested_tables_override_selected_fields() {
        let config = RunConfig::from_toml_str(
            r#"
            [engine]
            min_confidence = 0.7
            volatility_factor = 1.5

            [engine.indicators]
            rsi_period = 10

            [engine.regime]
            hurst_trending = 0.6

            [runner]
            parallel = false
            threads = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.min_confidence, 0.7);
        assert_eq!(config.engine.volatility_factor, 1.5);
        assert_eq!(config.engine.indicators.rsi_period, 10);
        assert_eq!(config.engine.indicators.macd_slow, 26);
        assert_eq!(config.engine.regime.hurst_trending, 0.6);
        assert!(!config.runner.parallel);
        assert_eq!(config.runner.threads, Some(2));
        assert_eq!(config.runner.top_picks, 3);
    }

    #[test]
    fn invalid_engine_values_are_rejected() {
        let err = RunConfig::from_toml_str("[engine]\nmin_confidence = 1.5\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigFileError::Engine(ConfigError::MinConfidenceOutOfRange { .. })
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = RunConfig::from_toml_str("[runner]\nparalel = true\n").unwrap_err();
        assert!(matches!(err, ConfigFileError::Parse(_)));
    }

    #[test]
    fn serializes_back_to_toml() {
        let config = RunConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(RunConfig::from_toml_str(&text).unwrap(), config);
    }
}
