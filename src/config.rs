use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::models::Priority;

/// Workspace settings stored in `.reeltrack/config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Used when `project create` is given no `--priority`.
    pub default_priority: Priority,
    /// `tracing` filter directive, overridden by `REELTRACK_LOG`.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_priority: Priority::Medium,
            log_filter: "warn".into(),
        }
    }
}

impl Config {
    /// Read the config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, TrackerError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| TrackerError::validation(format!("Invalid config {}: {e}", path.display())))
    }

    /// Write the defaults unless a config file already exists.
    pub fn write_default_if_missing(path: &Path) -> Result<(), TrackerError> {
        if path.exists() {
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&Self::default())
            .map_err(|e| TrackerError::validation(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }
}
