//! Configuration for detection and the service surface
//!
//! Defaults reproduce the reference behavior: runs of 4, two runs to be a
//! mutant, grids of at least 4×4, uppercase-only input.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the store snapshot path
pub const STORE_ENV: &str = "MUTANT_STORE";

const DEFAULT_STORE_FILE: &str = "mutant-store.json";

/// How lowercase letters are treated by the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CasePolicy {
    /// Only `ACGT` is accepted; `acgt` is an alphabet error
    #[default]
    Strict,
    /// Rows are uppercased before checking and storing
    Normalize,
}

/// Tunables for the validator and scanner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Minimum length of a same-letter run to qualify
    pub min_run_length: usize,
    /// Number of qualifying runs that makes a grid mutant
    pub required_runs: usize,
    /// Smallest accepted grid side
    pub min_size: usize,
    pub case_policy: CasePolicy,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_run_length: 4,
            required_runs: 2,
            min_size: 4,
            case_policy: CasePolicy::Strict,
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_run_length < 2 {
            return Err(ConfigError::Invalid(format!(
                "min_run_length must be at least 2, got {}",
                self.min_run_length
            )));
        }
        if self.required_runs == 0 {
            return Err(ConfigError::Invalid("required_runs must be at least 1".into()));
        }
        if self.min_size < self.min_run_length {
            return Err(ConfigError::Invalid(format!(
                "min_size {} cannot hold a run of {}",
                self.min_size, self.min_run_length
            )));
        }
        Ok(())
    }
}

/// Top-level configuration for the CLI / service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub detector: DetectorConfig,
    /// Where the record snapshot lives
    pub store_path: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            store_path: PathBuf::from(DEFAULT_STORE_FILE),
        }
    }
}

impl ServiceConfig {
    /// Load from an optional JSON file, then apply `MUTANT_STORE`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => {
                let data = std::fs::read_to_string(p)
                    .map_err(|e| ConfigError::Io(p.display().to_string(), e))?;
                serde_json::from_str(&data)?
            }
            None => Self::default(),
        };
        if let Ok(store) = std::env::var(STORE_ENV) {
            if !store.is_empty() {
                config.store_path = PathBuf::from(store);
            }
        }
        config.detector.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config {0}: {1}")]
    Io(String, #[source] std::io::Error),

    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
