//! Config - board の設定（TOML）
//!
//! ```toml
//! storage_key = "taskboard:columns"
//! activation_distance = 5.0
//! upcoming_limit = 6
//! broadcast_capacity = 64
//! ```
//!
//! 省略したキーは既定値になります。

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::drag::DEFAULT_ACTIVATION_DISTANCE;
use crate::sync::{DEFAULT_BROADCAST_CAPACITY, DEFAULT_STORAGE_KEY};
use crate::views::DEFAULT_UPCOMING_LIMIT;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {field} {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Board settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Durable slot key holding the serialized column model
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Pointer travel needed before a press becomes a drag
    #[serde(default = "default_activation_distance")]
    pub activation_distance: f64,

    /// Upcoming tasks shown on the dashboard
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,

    /// Snapshots buffered per surface before it has to re-pull
    #[serde(default = "default_broadcast_capacity")]
    pub broadcast_capacity: usize,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

const fn default_activation_distance() -> f64 {
    DEFAULT_ACTIVATION_DISTANCE
}

const fn default_upcoming_limit() -> usize {
    DEFAULT_UPCOMING_LIMIT
}

const fn default_broadcast_capacity() -> usize {
    DEFAULT_BROADCAST_CAPACITY
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            activation_distance: default_activation_distance(),
            upcoming_limit: default_upcoming_limit(),
            broadcast_capacity: default_broadcast_capacity(),
        }
    }
}

impl BoardConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "storage_key",
                reason: "must not be empty",
            });
        }
        if !self.activation_distance.is_finite() || self.activation_distance < 0.0 {
            return Err(ConfigError::Invalid {
                field: "activation_distance",
                reason: "must be a non-negative number",
            });
        }
        if self.broadcast_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "broadcast_capacity",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
