//! Configuration management for the regression objectives.
//!
//! Provides the [`ObjectiveConfig`] snapshot and the file formats it can be
//! persisted in.

pub mod objective;

pub use objective::ObjectiveConfig;

use crate::core::error::{LightGBMError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "objective.toml";

/// Configuration format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigFormat {
    /// TOML configuration format
    Toml,
    /// JSON configuration format
    Json,
}

impl Default for ConfigFormat {
    fn default() -> Self {
        ConfigFormat::Toml
    }
}

impl ConfigFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("json") => Ok(ConfigFormat::Json),
            _ => Err(LightGBMError::config(format!(
                "Unsupported config file format for '{}'. Use .json or .toml",
                path.display()
            ))),
        }
    }
}
