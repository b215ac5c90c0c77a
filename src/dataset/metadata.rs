//! Per-example labels and optional sample weights.
//!
//! [`Metadata`] owns the label and weight vectors of a training set.
//! Objectives borrow views into it for their whole lifetime and never mutate
//! them.

use crate::core::error::{LightGBMError, Result};
use crate::core::types::*;
use crate::dataset_error;
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

/// Labels and optional weights of a training set.
///
/// Deserialization goes through [`Metadata::new`], so a persisted metadata
/// value is validated exactly like one built in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMetadata")]
pub struct Metadata {
    /// Target labels (num_data,)
    label: Array1<Label>,
    /// Sample weights (optional)
    weights: Option<Array1<Label>>,
}

/// Unvalidated wire form of [`Metadata`].
#[derive(Deserialize)]
struct RawMetadata {
    label: Array1<Label>,
    #[serde(default)]
    weights: Option<Array1<Label>>,
}

impl TryFrom<RawMetadata> for Metadata {
    type Error = LightGBMError;

    fn try_from(raw: RawMetadata) -> Result<Self> {
        Metadata::new(raw.label, raw.weights)
    }
}

impl Metadata {
    /// Create metadata from labels and optional weights.
    ///
    /// Weights must match the label count and be finite and non-negative.
    /// Non-finite labels are accepted with a warning; gradients computed for
    /// them will be non-finite as well.
    pub fn new(label: Array1<Label>, weights: Option<Array1<Label>>) -> Result<Self> {
        if label.len() > DataSize::MAX as usize {
            return Err(dataset_error!(
                "Too many data points: {} exceeds {}",
                label.len(),
                DataSize::MAX
            ));
        }

        if let Some(ref w) = weights {
            if w.len() != label.len() {
                return Err(LightGBMError::dimension_mismatch(
                    format!("{} weights", label.len()),
                    format!("{} weights", w.len()),
                ));
            }
            if let Some((i, &bad)) = w
                .iter()
                .enumerate()
                .find(|(_, &v)| !v.is_finite() || v < 0.0)
            {
                return Err(LightGBMError::invalid_parameter(
                    format!("weights[{}]", i),
                    bad.to_string(),
                    "must be finite and non-negative",
                ));
            }
        }

        let non_finite = label.iter().filter(|v| !v.is_finite()).count();
        if non_finite > 0 {
            log::warn!(
                "{} of {} labels are NaN or infinite, their gradients will not be finite",
                non_finite,
                label.len()
            );
        }

        Ok(Metadata { label, weights })
    }

    /// Create metadata from plain vectors.
    pub fn from_vec(label: Vec<Label>, weights: Option<Vec<Label>>) -> Result<Self> {
        Self::new(Array1::from_vec(label), weights.map(Array1::from_vec))
    }

    /// Number of data points
    pub fn num_data(&self) -> DataSize {
        self.label.len() as DataSize
    }

    /// Get labels view
    pub fn label(&self) -> ArrayView1<'_, Label> {
        self.label.view()
    }

    /// Get weights view
    pub fn weights(&self) -> Option<ArrayView1<'_, Label>> {
        self.weights.as_ref().map(|w| w.view())
    }

    /// Check if metadata has weights
    pub fn has_weights(&self) -> bool {
        self.weights.is_some()
    }
}
