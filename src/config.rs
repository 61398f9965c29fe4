use crate::memory::{EngineConfig, EngineError};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] EngineError),
}

/// Settings for the `recall` binary, usually read from a TOML file.
///
/// ```toml
/// log_level = "debug"
/// seed_sample = false
/// queue_length = 5
///
/// [engine]
/// decay_rate = 0.2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fallback tracing filter when `RECALL_LOG` is unset
    pub log_level: String,
    /// Seed the built-in curriculum at startup
    pub seed_sample: bool,
    /// Entries returned by `GET_REVISION_QUEUE` without a count
    pub queue_length: usize,
    pub engine: EngineConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            seed_sample: true,
            queue_length: 10,
            engine: EngineConfig::default(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(source)?;
        settings.engine.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}
