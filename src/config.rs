//! Panel configuration.
//!
//! Two knobs: how many ranked sites the top-sites cache holds, and how many
//! recent-history rows the panel shows. Stored as a JSON file; missing file
//! means defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::errors::ConfigError;

/// Default bound on the frecency-ranked top-sites cache.
pub const DEFAULT_TOP_SITES_CACHE_SIZE: usize = 20;

/// Default number of recent-history rows shown in the panel.
pub const DEFAULT_RECENT_HISTORY_SIZE: usize = 10;

/// Panel configuration constants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PanelConfig {
    pub top_sites_cache_size: usize,
    pub recent_history_size: usize,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            top_sites_cache_size: DEFAULT_TOP_SITES_CACHE_SIZE,
            recent_history_size: DEFAULT_RECENT_HISTORY_SIZE,
        }
    }
}

impl PanelConfig {
    /// Loads configuration from a JSON file.
    ///
    /// If the file does not exist, returns defaults. If the file exists but
    /// is malformed, returns a serialization error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("Failed to read config file: {}", e)))?;

        serde_json::from_str(&content).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to parse config file: {}", e))
        })
    }

    /// Saves the configuration to a JSON file, creating parent directories
    /// if needed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| ConfigError::IoError(format!("Failed to write config file: {}", e)))
    }
}
