//! Core trait definitions.
//!
//! [`ObjectiveFunction`] is the interface the boosting driver programs
//! against: it is constructed once per training run, bound to the training
//! metadata with [`ObjectiveFunction::init`], and then asked for gradients and
//! hessians once per boosting iteration.

use crate::core::error::Result;
use crate::core::types::*;
use crate::dataset::Metadata;
use ndarray::{ArrayView1, ArrayViewMut1};

use std::fmt::Debug;

/// Trait for objective functions that compute gradients and hessians.
///
/// The lifetime `'a` is the lifetime of the [`Metadata`] the objective borrows
/// its labels and weights from; the borrow checker guarantees the metadata
/// outlives every call to [`get_gradients`](ObjectiveFunction::get_gradients).
pub trait ObjectiveFunction<'a>: Send + Sync + Debug {
    /// Bind label and weight views and record the number of data points.
    ///
    /// Must be called exactly once before computing gradients.
    fn init(&mut self, metadata: &'a Metadata, num_data: DataSize) -> Result<()>;

    /// Compute gradients and hessians for the current scores.
    ///
    /// Every index of both output buffers is overwritten. The math never
    /// fails; non-finite scores or labels propagate into the outputs. Errors
    /// are returned only when the objective is not initialized or a buffer
    /// length differs from `num_data`.
    fn get_gradients(
        &self,
        score: ArrayView1<'_, f64>,
        gradients: ArrayViewMut1<'_, Score>,
        hessians: ArrayViewMut1<'_, Score>,
    ) -> Result<()>;

    /// Get the objective function name.
    fn name(&self) -> &'static str;

    /// Number of data points bound by `init` (0 before).
    fn num_data(&self) -> DataSize;

    /// Whether every hessian written by this objective is the same constant.
    fn is_constant_hessian(&self) -> bool {
        false
    }

    /// Constant initial score that minimizes the loss on the bound labels.
    fn boost_from_score(&self) -> f64;

    /// Name of the evaluation metric matching this loss.
    fn default_metric(&self) -> &'static str;

    /// Slice-based convenience wrapper around
    /// [`get_gradients`](ObjectiveFunction::get_gradients).
    fn get_gradients_slice(
        &self,
        score: &[f64],
        gradients: &mut [Score],
        hessians: &mut [Score],
    ) -> Result<()> {
        self.get_gradients(
            ArrayView1::from(score),
            ArrayViewMut1::from(gradients),
            ArrayViewMut1::from(hessians),
        )
    }
}
