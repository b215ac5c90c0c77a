//! Core data types for the regression objectives.
//!
//! The scalar aliases keep LightGBM's naming so that objective code reads the
//! same way as the rest of a pure Rust LightGBM: gradients and hessians are
//! `score_t`, labels and weights are `label_t`.

use crate::core::error::{LightGBMError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Data indexing type, equivalent to `data_size_t` in LightGBM C++.
/// 32-bit integer supporting up to 2 billion data points.
pub type DataSize = i32;

/// Gradient and hessian value type, equivalent to `score_t` in LightGBM C++.
pub type Score = f32;

/// Target value and sample weight type, equivalent to `label_t` in LightGBM C++.
pub type Label = f32;

/// Regression objectives supported by this crate.
///
/// The string forms produced by `Display` are the names persisted in model
/// configuration and accepted back by `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectiveType {
    /// Squared error (L2) regression
    #[serde(rename = "regression")]
    Regression,
    /// Absolute error (L1) regression
    #[serde(rename = "regression_l1")]
    RegressionL1,
    /// Huber regression
    #[serde(rename = "huber")]
    Huber,
    /// Fair regression
    #[serde(rename = "fair")]
    Fair,
}

impl ObjectiveType {
    /// Every supported objective, in registry order.
    pub const ALL: [ObjectiveType; 4] = [
        ObjectiveType::Regression,
        ObjectiveType::RegressionL1,
        ObjectiveType::Huber,
        ObjectiveType::Fair,
    ];

    /// Canonical objective name.
    pub fn name(&self) -> &'static str {
        match self {
            ObjectiveType::Regression => "regression",
            ObjectiveType::RegressionL1 => "regression_l1",
            ObjectiveType::Huber => "huber",
            ObjectiveType::Fair => "fair",
        }
    }

    /// Whether the objective needs the Gaussian bandwidth parameter.
    pub fn uses_gaussian_eta(&self) -> bool {
        matches!(self, ObjectiveType::RegressionL1 | ObjectiveType::Huber)
    }
}

impl Default for ObjectiveType {
    fn default() -> Self {
        ObjectiveType::Regression
    }
}

impl fmt::Display for ObjectiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse objective alias to canonical form (equivalent to ParseObjectiveAlias in C++)
pub fn parse_objective_alias(objective_type: &str) -> &str {
    match objective_type {
        "regression"
        | "regression_l2"
        | "mean_squared_error"
        | "mse"
        | "l2"
        | "l2_root"
        | "root_mean_squared_error"
        | "rmse" => "regression",
        "regression_l1" | "mean_absolute_error" | "l1" | "mae" => "regression_l1",
        _ => objective_type,
    }
}

impl FromStr for ObjectiveType {
    type Err = LightGBMError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        match parse_objective_alias(&lowered) {
            "regression" => Ok(ObjectiveType::Regression),
            "regression_l1" => Ok(ObjectiveType::RegressionL1),
            "huber" => Ok(ObjectiveType::Huber),
            "fair" => Ok(ObjectiveType::Fair),
            _ => Err(LightGBMError::unknown_objective(s)),
        }
    }
}
