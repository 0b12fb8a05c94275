use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Tracker behaviour knobs, loadable from YAML. Missing keys keep their
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Record bridge-illegal calls and carry on. When false such calls are
    /// rejected instead.
    pub tolerate_anomalies: bool,
    /// Treat an event stamped with a different board number as the end of
    /// the current deal.
    pub supersede_on_board_mismatch: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tolerate_anomalies: true,
            supersede_on_board_mismatch: true,
        }
    }
}

impl TrackerConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }
}
