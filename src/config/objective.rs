//! Objective function configuration.
//!
//! [`ObjectiveConfig`] is the immutable snapshot each regression objective
//! copies its parameters from at construction time. It can be built in code,
//! parsed from LightGBM-style `key=value` parameters, or loaded from a TOML or
//! JSON file.

use super::ConfigFormat;
use crate::core::constants::*;
use crate::core::error::{LightGBMError, Result};
use crate::core::types::*;
use crate::core::utils::common::Common;
use crate::config_error;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Objective function configuration structure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectiveConfig {
    /// Which regression loss to optimize
    pub objective: ObjectiveType,
    /// Width of the Gaussian used to approximate the hessian of L1 and Huber
    pub gaussian_eta: f64,
    /// Huber delta parameter for Huber regression
    pub huber_delta: f64,
    /// Fair C parameter for Fair regression
    pub fair_c: f64,
}

impl Default for ObjectiveConfig {
    fn default() -> Self {
        ObjectiveConfig {
            objective: ObjectiveType::Regression,
            gaussian_eta: DEFAULT_GAUSSIAN_ETA,
            huber_delta: DEFAULT_HUBER_DELTA,
            fair_c: DEFAULT_FAIR_C,
        }
    }
}

impl ObjectiveConfig {
    /// Create a new objective configuration
    pub fn new(objective: ObjectiveType) -> Self {
        ObjectiveConfig {
            objective,
            ..ObjectiveConfig::default()
        }
    }

    /// Create configuration for squared error regression
    pub fn regression() -> Self {
        ObjectiveConfig::new(ObjectiveType::Regression)
    }

    /// Create configuration for absolute error regression
    pub fn regression_l1() -> Self {
        ObjectiveConfig::new(ObjectiveType::RegressionL1)
    }

    /// Create configuration for Huber regression
    pub fn huber(huber_delta: f64) -> Self {
        ObjectiveConfig::new(ObjectiveType::Huber).with_huber_delta(huber_delta)
    }

    /// Create configuration for Fair regression
    pub fn fair(fair_c: f64) -> Self {
        ObjectiveConfig::new(ObjectiveType::Fair).with_fair_c(fair_c)
    }

    /// Set Gaussian eta parameter
    pub fn with_gaussian_eta(mut self, gaussian_eta: f64) -> Self {
        self.gaussian_eta = gaussian_eta;
        self
    }

    /// Set Huber delta parameter
    pub fn with_huber_delta(mut self, huber_delta: f64) -> Self {
        self.huber_delta = huber_delta;
        self
    }

    /// Set Fair C parameter
    pub fn with_fair_c(mut self, fair_c: f64) -> Self {
        self.fair_c = fair_c;
        self
    }

    /// Validate the parameters used by the selected objective.
    ///
    /// Each of them must be finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        if self.objective.uses_gaussian_eta() {
            check_positive("gaussian_eta", self.gaussian_eta)?;
        }
        match self.objective {
            ObjectiveType::Huber => check_positive("huber_delta", self.huber_delta)?,
            ObjectiveType::Fair => check_positive("fair_c", self.fair_c)?,
            ObjectiveType::Regression | ObjectiveType::RegressionL1 => {}
        }
        Ok(())
    }

    /// Get objective-specific parameter map
    pub fn as_parameter_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert("objective".to_string(), self.objective.to_string());
        if self.objective.uses_gaussian_eta() {
            map.insert("gaussian_eta".to_string(), self.gaussian_eta.to_string());
        }
        match self.objective {
            ObjectiveType::Huber => {
                map.insert("huber_delta".to_string(), self.huber_delta.to_string());
            }
            ObjectiveType::Fair => {
                map.insert("fair_c".to_string(), self.fair_c.to_string());
            }
            ObjectiveType::Regression | ObjectiveType::RegressionL1 => {}
        }

        map
    }

    /// Parse configuration from key-value pairs.
    ///
    /// Keys outside the objective parameters are logged and ignored, so a full
    /// LightGBM parameter set can be passed through. The objective may be given
    /// under any of its aliases (`objective`, `objective_type`, `app`,
    /// `application`, `loss`); aliases naming different objectives are an error.
    pub fn from_parameter_map(map: &HashMap<String, String>) -> Result<Self> {
        let mut config = ObjectiveConfig::default();
        let mut objective_key: Option<&str> = None;

        for (key, value) in map {
            let value = Common::remove_quotation_symbol(value.trim());
            match key.trim() {
                "objective" | "objective_type" | "app" | "application" | "loss" => {
                    let objective: ObjectiveType = value.parse()?;
                    // aliases of the same key must agree, map order is arbitrary
                    if let Some(previous) = objective_key {
                        if objective != config.objective {
                            return Err(config_error!(
                                "Conflicting objectives: {} = {}, {} = {}",
                                previous,
                                config.objective,
                                key.trim(),
                                objective
                            ));
                        }
                    }
                    objective_key = Some(key.trim());
                    config.objective = objective;
                }
                "gaussian_eta" => config.gaussian_eta = parse_f64(key, value)?,
                "huber_delta" => config.huber_delta = parse_f64(key, value)?,
                "fair_c" => config.fair_c = parse_f64(key, value)?,
                _ => {
                    log::warn!("Unknown configuration parameter: {}", key);
                }
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a LightGBM parameter string such as
    /// `"objective=huber huber_delta=2.0"`.
    ///
    /// Pairs may be separated by whitespace, commas or newlines, and may have
    /// spaces around `=`; lines starting with `#` are comments.
    pub fn from_parameter_str(params: &str) -> Result<Self> {
        let mut map = HashMap::new();

        for line in params.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            // "key = value" becomes "key=value"
            let line = line.split('=').map(str::trim).collect::<Vec<_>>().join("=");
            for token in line.split(|c: char| c.is_whitespace() || c == ',') {
                if token.is_empty() {
                    continue;
                }
                let (key, value) = token
                    .split_once('=')
                    .ok_or_else(|| config_error!("Expected key=value, got '{}'", token))?;
                map.insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        Self::from_parameter_map(&map)
    }

    /// Load configuration from a `.toml` or `.json` file and validate it.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| LightGBMError::config(format!("Failed to read config file: {}", e)))?;

        let config: ObjectiveConfig = match format {
            ConfigFormat::Json => serde_json::from_str(&content)
                .map_err(|e| LightGBMError::config(format!("Failed to parse JSON config: {}", e)))?,
            ConfigFormat::Toml => toml::from_str(&content)
                .map_err(|e| LightGBMError::config(format!("Failed to parse TOML config: {}", e)))?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a `.toml` or `.json` file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| LightGBMError::config(format!("Failed to serialize to TOML: {}", e)))?,
        };

        std::fs::write(path, content)?;
        Ok(())
    }
}

fn check_positive(parameter: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LightGBMError::invalid_parameter(
            parameter,
            value.to_string(),
            "must be finite and positive",
        ))
    }
}

fn parse_f64(key: &str, value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|_| config_error!("Invalid {}: {}", key, value))
}
