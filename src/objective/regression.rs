/*!
 * Copyright (c) 2016 Microsoft Corporation. All rights reserved.
 * Licensed under the MIT License. See LICENSE file in the project root for license information.
 */

//! Regression objectives: squared error, absolute error, Huber and Fair.
//!
//! Every objective follows the same life cycle. It is constructed from an
//! [`ObjectiveConfig`], bound once to a [`Metadata`] with `init`, and then
//! asked for gradients and hessians once per boosting iteration. The weighted
//! and unweighted cases are separate loops chosen once per call, and each loop
//! is a data-parallel map over the examples.

use crate::config::ObjectiveConfig;
use crate::core::constants::L2_CONSTANT_HESSIAN;
use crate::core::error::{LightGBMError, Result};
use crate::core::traits::ObjectiveFunction;
use crate::core::types::*;
use crate::core::utils::common::Common;
use crate::dataset::Metadata;
use ndarray::{ArrayView1, ArrayViewMut1, Zip};

/// Label and weight views bound by `init`.
#[derive(Debug, Clone)]
struct BoundMetadata<'a> {
    /// Number of data
    num_data: DataSize,
    /// View of labels
    label: ArrayView1<'a, Label>,
    /// View of weights, `None` when all weights are 1
    weights: Option<ArrayView1<'a, Label>>,
}

impl<'a> BoundMetadata<'a> {
    fn bind(
        slot: &mut Option<BoundMetadata<'a>>,
        name: &'static str,
        metadata: &'a Metadata,
        num_data: DataSize,
    ) -> Result<()> {
        if slot.is_some() {
            return Err(LightGBMError::config(format!(
                "Objective '{}' is already initialized",
                name
            )));
        }
        if num_data < 0 {
            return Err(LightGBMError::invalid_parameter(
                "num_data",
                num_data.to_string(),
                "must be non-negative",
            ));
        }
        if num_data != metadata.num_data() {
            return Err(LightGBMError::dimension_mismatch(
                format!("{} labels", num_data),
                format!("{} labels", metadata.num_data()),
            ));
        }

        if let Some(weights) = metadata.weights() {
            if weights.len() != metadata.label().len() {
                return Err(LightGBMError::dimension_mismatch(
                    format!("{} weights", num_data),
                    format!("{} weights", weights.len()),
                ));
            }
        }

        log::debug!(
            "Initialized objective '{}' with {} data points ({})",
            name,
            num_data,
            if metadata.has_weights() { "weighted" } else { "unweighted" }
        );

        *slot = Some(BoundMetadata {
            num_data,
            label: metadata.label(),
            weights: metadata.weights(),
        });
        Ok(())
    }

    fn get<'s>(slot: &'s Option<BoundMetadata<'a>>, name: &'static str) -> Result<&'s Self> {
        slot.as_ref().ok_or_else(|| LightGBMError::not_initialized(name))
    }

    fn check_buffers(&self, score: &ArrayView1<'_, f64>, gradients: usize, hessians: usize) -> Result<()> {
        let expected = self.num_data as usize;
        for (what, len) in [("score", score.len()), ("gradients", gradients), ("hessians", hessians)] {
            if len != expected {
                return Err(LightGBMError::dimension_mismatch(
                    format!("{} of length {}", what, expected),
                    format!("length {}", len),
                ));
            }
        }
        Ok(())
    }

    fn weighted_mean(&self) -> f64 {
        Common::weighted_mean(self.label, self.weights)
    }
}

/// Squared-error gradient, shared by L2 and the quadratic region of Huber so
/// both produce bit-identical values.
#[inline]
fn l2_gradient(score: f64, label: Label) -> Score {
    (score - label as f64) as Score
}

/// Gaussian-smoothed hessian narrowed to `Score`.
///
/// A nonzero gradient always yields a positive, finite hessian, even where
/// the `f64` estimate falls outside the `f32` range. NaN propagates.
#[inline]
fn smoothed_hessian(score: f64, label: Label, grad: Score, eta: f64) -> Score {
    let h = Common::approximate_hessian_with_gaussian(score, label as f64, grad as f64, eta) as Score;
    if grad != 0.0 {
        h.clamp(Score::MIN_POSITIVE, Score::MAX)
    } else {
        h
    }
}

/// Objective function for regression
#[derive(Debug, Clone)]
pub struct RegressionL2Loss<'a> {
    data: Option<BoundMetadata<'a>>,
}

impl<'a> RegressionL2Loss<'a> {
    /// Create the squared-error objective. It has no parameters.
    pub fn new(_config: &ObjectiveConfig) -> Result<Self> {
        Ok(RegressionL2Loss { data: None })
    }
}

impl<'a> ObjectiveFunction<'a> for RegressionL2Loss<'a> {
    fn init(&mut self, metadata: &'a Metadata, num_data: DataSize) -> Result<()> {
        let name = self.name();
        BoundMetadata::bind(&mut self.data, name, metadata, num_data)
    }

    fn get_gradients(
        &self,
        score: ArrayView1<'_, f64>,
        mut gradients: ArrayViewMut1<'_, Score>,
        mut hessians: ArrayViewMut1<'_, Score>,
    ) -> Result<()> {
        let data = BoundMetadata::get(&self.data, self.name())?;
        data.check_buffers(&score, gradients.len(), hessians.len())?;

        match data.weights {
            None => {
                Zip::from(&mut gradients)
                    .and(&mut hessians)
                    .and(&score)
                    .and(&data.label)
                    .par_for_each(|g, h, &s, &y| {
                        *g = l2_gradient(s, y);
                        *h = L2_CONSTANT_HESSIAN as Score;
                    });
            }
            Some(ref weights) => {
                Zip::from(&mut gradients)
                    .and(&mut hessians)
                    .and(&score)
                    .and(&data.label)
                    .and(weights)
                    .par_for_each(|g, h, &s, &y, &w| {
                        *g = l2_gradient(s, y) * w;
                        *h = w;
                    });
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "regression"
    }

    fn num_data(&self) -> DataSize {
        self.data.as_ref().map_or(0, |d| d.num_data)
    }

    fn is_constant_hessian(&self) -> bool {
        matches!(self.data, Some(ref d) if d.weights.is_none())
    }

    fn boost_from_score(&self) -> f64 {
        self.data.as_ref().map_or(0.0, BoundMetadata::weighted_mean)
    }

    fn default_metric(&self) -> &'static str {
        "l2"
    }
}

/// L1 regression loss
#[derive(Debug, Clone)]
pub struct RegressionL1Loss<'a> {
    data: Option<BoundMetadata<'a>>,
    /// Width of the Gaussian used to approximate the hessian
    eta: f64,
}

impl<'a> RegressionL1Loss<'a> {
    /// Create the absolute-error objective, failing if `gaussian_eta` is not
    /// strictly positive.
    pub fn new(config: &ObjectiveConfig) -> Result<Self> {
        ObjectiveConfig {
            objective: ObjectiveType::RegressionL1,
            ..*config
        }
        .validate()?;
        Ok(RegressionL1Loss {
            data: None,
            eta: config.gaussian_eta,
        })
    }

    /// Gaussian bandwidth captured at construction.
    pub fn eta(&self) -> f64 {
        self.eta
    }
}

impl<'a> ObjectiveFunction<'a> for RegressionL1Loss<'a> {
    fn init(&mut self, metadata: &'a Metadata, num_data: DataSize) -> Result<()> {
        let name = self.name();
        BoundMetadata::bind(&mut self.data, name, metadata, num_data)
    }

    fn get_gradients(
        &self,
        score: ArrayView1<'_, f64>,
        mut gradients: ArrayViewMut1<'_, Score>,
        mut hessians: ArrayViewMut1<'_, Score>,
    ) -> Result<()> {
        let data = BoundMetadata::get(&self.data, self.name())?;
        data.check_buffers(&score, gradients.len(), hessians.len())?;
        let eta = self.eta;

        match data.weights {
            None => {
                Zip::from(&mut gradients)
                    .and(&mut hessians)
                    .and(&score)
                    .and(&data.label)
                    .par_for_each(|g, h, &s, &y| {
                        let diff = s - y as f64;
                        *g = if diff >= 0.0 { 1.0 } else { -1.0 };
                        *h = smoothed_hessian(s, y, *g, eta);
                    });
            }
            Some(ref weights) => {
                Zip::from(&mut gradients)
                    .and(&mut hessians)
                    .and(&score)
                    .and(&data.label)
                    .and(weights)
                    .par_for_each(|g, h, &s, &y, &w| {
                        let diff = s - y as f64;
                        *g = if diff >= 0.0 { w } else { -w };
                        *h = smoothed_hessian(s, y, *g, eta);
                    });
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "regression_l1"
    }

    fn num_data(&self) -> DataSize {
        self.data.as_ref().map_or(0, |d| d.num_data)
    }

    fn boost_from_score(&self) -> f64 {
        self.data
            .as_ref()
            .map_or(0.0, |d| Common::weighted_median(d.label, d.weights))
    }

    fn default_metric(&self) -> &'static str {
        "l1"
    }
}

/// Huber regression loss
#[derive(Debug, Clone)]
pub struct RegressionHuberLoss<'a> {
    data: Option<BoundMetadata<'a>>,
    /// Delta for Huber loss
    delta: f64,
    /// Width of the Gaussian used to approximate the hessian
    eta: f64,
}

impl<'a> RegressionHuberLoss<'a> {
    /// Create the Huber objective, failing if `huber_delta` or `gaussian_eta`
    /// is not strictly positive.
    pub fn new(config: &ObjectiveConfig) -> Result<Self> {
        ObjectiveConfig {
            objective: ObjectiveType::Huber,
            ..*config
        }
        .validate()?;
        Ok(RegressionHuberLoss {
            data: None,
            delta: config.huber_delta,
            eta: config.gaussian_eta,
        })
    }

    /// Threshold between the quadratic and linear regions.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Gaussian bandwidth captured at construction.
    pub fn eta(&self) -> f64 {
        self.eta
    }
}

impl<'a> ObjectiveFunction<'a> for RegressionHuberLoss<'a> {
    fn init(&mut self, metadata: &'a Metadata, num_data: DataSize) -> Result<()> {
        let name = self.name();
        BoundMetadata::bind(&mut self.data, name, metadata, num_data)
    }

    fn get_gradients(
        &self,
        score: ArrayView1<'_, f64>,
        mut gradients: ArrayViewMut1<'_, Score>,
        mut hessians: ArrayViewMut1<'_, Score>,
    ) -> Result<()> {
        let data = BoundMetadata::get(&self.data, self.name())?;
        data.check_buffers(&score, gradients.len(), hessians.len())?;
        let (delta, eta) = (self.delta, self.eta);

        match data.weights {
            None => {
                Zip::from(&mut gradients)
                    .and(&mut hessians)
                    .and(&score)
                    .and(&data.label)
                    .par_for_each(|g, h, &s, &y| {
                        let diff = s - y as f64;
                        if diff.abs() <= delta {
                            *g = l2_gradient(s, y);
                            *h = L2_CONSTANT_HESSIAN as Score;
                        } else {
                            *g = if diff >= 0.0 { delta as Score } else { -delta as Score };
                            *h = smoothed_hessian(s, y, *g, eta);
                        }
                    });
            }
            Some(ref weights) => {
                Zip::from(&mut gradients)
                    .and(&mut hessians)
                    .and(&score)
                    .and(&data.label)
                    .and(weights)
                    .par_for_each(|g, h, &s, &y, &w| {
                        let diff = s - y as f64;
                        if diff.abs() <= delta {
                            *g = l2_gradient(s, y) * w;
                            *h = w;
                        } else {
                            let saturated = if diff >= 0.0 { delta } else { -delta };
                            *g = (saturated * w as f64) as Score;
                            *h = smoothed_hessian(s, y, *g, eta);
                        }
                    });
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "huber"
    }

    fn num_data(&self) -> DataSize {
        self.data.as_ref().map_or(0, |d| d.num_data)
    }

    fn boost_from_score(&self) -> f64 {
        self.data.as_ref().map_or(0.0, BoundMetadata::weighted_mean)
    }

    fn default_metric(&self) -> &'static str {
        "huber"
    }
}

/// Fair regression loss, `c^2 (|x|/c - ln(1 + |x|/c))`.
///
/// Smooth everywhere, so the hessian is exact: it equals the sample weight at
/// `x = 0` and decays towards zero for large residuals.
#[derive(Debug, Clone)]
pub struct RegressionFairLoss<'a> {
    data: Option<BoundMetadata<'a>>,
    /// C for Fair loss
    c: f64,
}

impl<'a> RegressionFairLoss<'a> {
    /// Create the Fair objective, failing if `fair_c` is not strictly positive.
    pub fn new(config: &ObjectiveConfig) -> Result<Self> {
        ObjectiveConfig {
            objective: ObjectiveType::Fair,
            ..*config
        }
        .validate()?;
        Ok(RegressionFairLoss {
            data: None,
            c: config.fair_c,
        })
    }

    /// Fair loss constant captured at construction.
    pub fn c(&self) -> f64 {
        self.c
    }
}

impl<'a> ObjectiveFunction<'a> for RegressionFairLoss<'a> {
    fn init(&mut self, metadata: &'a Metadata, num_data: DataSize) -> Result<()> {
        let name = self.name();
        BoundMetadata::bind(&mut self.data, name, metadata, num_data)
    }

    fn get_gradients(
        &self,
        score: ArrayView1<'_, f64>,
        mut gradients: ArrayViewMut1<'_, Score>,
        mut hessians: ArrayViewMut1<'_, Score>,
    ) -> Result<()> {
        let data = BoundMetadata::get(&self.data, self.name())?;
        data.check_buffers(&score, gradients.len(), hessians.len())?;
        let c = self.c;

        match data.weights {
            None => {
                Zip::from(&mut gradients)
                    .and(&mut hessians)
                    .and(&score)
                    .and(&data.label)
                    .par_for_each(|g, h, &s, &y| {
                        let x = s - y as f64;
                        let denom = x.abs() + c;
                        *g = (c * x / denom) as Score;
                        *h = (c * c / (denom * denom)) as Score;
                    });
            }
            Some(ref weights) => {
                Zip::from(&mut gradients)
                    .and(&mut hessians)
                    .and(&score)
                    .and(&data.label)
                    .and(weights)
                    .par_for_each(|g, h, &s, &y, &w| {
                        let x = s - y as f64;
                        let denom = x.abs() + c;
                        let w = w as f64;
                        *g = (c * x / denom * w) as Score;
                        *h = (c * c / (denom * denom) * w) as Score;
                    });
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "fair"
    }

    fn num_data(&self) -> DataSize {
        self.data.as_ref().map_or(0, |d| d.num_data)
    }

    fn boost_from_score(&self) -> f64 {
        self.data.as_ref().map_or(0.0, BoundMetadata::weighted_mean)
    }

    fn default_metric(&self) -> &'static str {
        "fair"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1};

    fn run<'a, O: ObjectiveFunction<'a>>(objective: &O, score: &[f64]) -> (Vec<Score>, Vec<Score>) {
        let mut gradients = vec![Score::NAN; score.len()];
        let mut hessians = vec![Score::NAN; score.len()];
        objective
            .get_gradients_slice(score, &mut gradients, &mut hessians)
            .unwrap();
        (gradients, hessians)
    }

    #[test]
    fn test_l2_scenario() {
        let metadata = Metadata::new(array![1.0, 2.0, 3.0], None).unwrap();
        let mut objective = RegressionL2Loss::new(&ObjectiveConfig::regression()).unwrap();
        objective.init(&metadata, 3).unwrap();

        let (g, h) = run(&objective, &[1.0, 1.0, 1.0]);
        assert_eq!(g, vec![0.0, -1.0, -2.0]);
        assert_eq!(h, vec![1.0, 1.0, 1.0]);
        assert!(objective.is_constant_hessian());
        assert_eq!(objective.num_data(), 3);
    }

    #[test]
    fn test_l2_weighted() {
        let metadata = Metadata::new(array![1.0, 2.0, 3.0], Some(array![2.0, 0.5, 0.0])).unwrap();
        let mut objective = RegressionL2Loss::new(&ObjectiveConfig::regression()).unwrap();
        objective.init(&metadata, 3).unwrap();

        let (g, h) = run(&objective, &[2.0, 0.0, 10.0]);
        assert_eq!(g, vec![2.0, -1.0, 0.0]);
        assert_eq!(h, vec![2.0, 0.5, 0.0]);
        assert!(!objective.is_constant_hessian());
    }

    #[test]
    fn test_l1_sign_and_ties() {
        let metadata = Metadata::new(array![0.0, 0.0, 0.0], None).unwrap();
        let mut objective = RegressionL1Loss::new(&ObjectiveConfig::regression_l1()).unwrap();
        objective.init(&metadata, 3).unwrap();

        let (g, h) = run(&objective, &[-5.0, 0.0, 1e6]);
        assert_eq!(g, vec![-1.0, 1.0, 1.0]);
        assert!(h.iter().all(|&v| v > 0.0));
        // the tie sits on the peak of the bump
        assert!(h[1] > h[0]);
    }

    #[test]
    fn test_huber_scenario() {
        let metadata = Metadata::new(array![1.0, 2.0, 3.0], None).unwrap();
        let mut objective = RegressionHuberLoss::new(&ObjectiveConfig::huber(1.0)).unwrap();
        objective.init(&metadata, 3).unwrap();

        let (g, h) = run(&objective, &[1.0, 1.0, 1.0]);
        assert_eq!(&g[..2], &[0.0, -1.0]);
        assert_eq!(&h[..2], &[1.0, 1.0]);
        assert_eq!(g[2], -1.0);
        assert!(h[2] > 0.0);
    }

    #[test]
    fn test_fair_at_zero() {
        let metadata = Metadata::new(array![4.0, -2.0], Some(array![1.0, 3.0])).unwrap();
        let mut objective = RegressionFairLoss::new(&ObjectiveConfig::fair(1.0)).unwrap();
        objective.init(&metadata, 2).unwrap();

        let (g, h) = run(&objective, &[4.0, -2.0]);
        assert_eq!(g, vec![0.0, 0.0]);
        assert_eq!(h, vec![1.0, 3.0]);
    }

    #[test]
    fn test_fair_closed_form() {
        let metadata = Metadata::new(array![0.0], None).unwrap();
        let mut objective = RegressionFairLoss::new(&ObjectiveConfig::fair(2.0)).unwrap();
        objective.init(&metadata, 1).unwrap();

        // x = 2: g = 2*2/4 = 1, h = 4/16 = 0.25
        let (g, h) = run(&objective, &[2.0]);
        assert_abs_diff_eq!(g[0], 1.0, epsilon = 1e-7);
        assert_abs_diff_eq!(h[0], 0.25, epsilon = 1e-7);
    }

    #[test]
    fn test_names_and_metrics() {
        let config = ObjectiveConfig::default();
        assert_eq!(RegressionL2Loss::new(&config).unwrap().name(), "regression");
        assert_eq!(RegressionL1Loss::new(&config).unwrap().name(), "regression_l1");
        assert_eq!(RegressionHuberLoss::new(&config).unwrap().name(), "huber");
        assert_eq!(RegressionFairLoss::new(&config).unwrap().name(), "fair");

        assert_eq!(RegressionL2Loss::new(&config).unwrap().default_metric(), "l2");
        assert_eq!(RegressionL1Loss::new(&config).unwrap().default_metric(), "l1");
    }

    #[test]
    fn test_constructor_validation() {
        let config = ObjectiveConfig::default().with_gaussian_eta(0.0);
        assert!(RegressionL1Loss::new(&config).is_err());
        assert!(RegressionHuberLoss::new(&config).is_err());
        assert!(RegressionL2Loss::new(&config).is_ok());
        assert!(RegressionFairLoss::new(&config).is_ok());

        let config = ObjectiveConfig::default().with_huber_delta(-1.0).with_fair_c(0.0);
        assert!(RegressionHuberLoss::new(&config).is_err());
        assert!(RegressionFairLoss::new(&config).is_err());
        assert!(RegressionL1Loss::new(&config).is_ok());
    }

    #[test]
    fn test_not_initialized() {
        let objective = RegressionHuberLoss::new(&ObjectiveConfig::huber(1.0)).unwrap();
        let mut g = vec![0.0; 1];
        let mut h = vec![0.0; 1];
        let err = objective.get_gradients_slice(&[0.0], &mut g, &mut h).unwrap_err();
        assert!(matches!(err, LightGBMError::NotInitialized { .. }));
        assert_eq!(objective.num_data(), 0);
        assert_eq!(objective.boost_from_score(), 0.0);
    }

    #[test]
    fn test_init_errors() {
        let metadata = Metadata::new(array![1.0, 2.0], None).unwrap();

        let mut objective = RegressionL2Loss::new(&ObjectiveConfig::regression()).unwrap();
        assert!(objective.init(&metadata, 3).is_err());
        assert!(objective.init(&metadata, -1).is_err());
        objective.init(&metadata, 2).unwrap();
        assert!(objective.init(&metadata, 2).is_err());
    }

    #[test]
    fn test_buffer_length_mismatch() {
        let metadata = Metadata::new(array![1.0, 2.0], None).unwrap();
        let mut objective = RegressionFairLoss::new(&ObjectiveConfig::fair(1.0)).unwrap();
        objective.init(&metadata, 2).unwrap();

        let mut g = vec![0.0; 2];
        let mut h = vec![0.0; 1];
        let err = objective.get_gradients_slice(&[0.0, 0.0], &mut g, &mut h).unwrap_err();
        assert_eq!(err.category(), "dimension_mismatch");

        let mut h = vec![0.0; 2];
        assert!(objective.get_gradients_slice(&[0.0], &mut g, &mut h).is_err());
    }

    #[test]
    fn test_boost_from_score() {
        let metadata = Metadata::new(array![1.0, 2.0, 9.0], None).unwrap();

        let mut l2 = RegressionL2Loss::new(&ObjectiveConfig::regression()).unwrap();
        l2.init(&metadata, 3).unwrap();
        assert_abs_diff_eq!(l2.boost_from_score(), 4.0, epsilon = 1e-12);

        let mut l1 = RegressionL1Loss::new(&ObjectiveConfig::regression_l1()).unwrap();
        l1.init(&metadata, 3).unwrap();
        assert_eq!(l1.boost_from_score(), 2.0);

        let weighted = Metadata::new(array![1.0, 2.0, 9.0], Some(array![1.0, 1.0, 6.0])).unwrap();
        let mut fair = RegressionFairLoss::new(&ObjectiveConfig::fair(1.0)).unwrap();
        fair.init(&weighted, 3).unwrap();
        assert_abs_diff_eq!(fair.boost_from_score(), 57.0 / 8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_smoothed_hessian_stays_in_range() {
        let metadata = Metadata::new(array![0.0, 0.0], Some(array![1.0, 0.0])).unwrap();
        for eta in [1e50, 1e300, 1e-40, 1e-300] {
            let config = ObjectiveConfig::regression_l1().with_gaussian_eta(eta);
            let mut l1 = RegressionL1Loss::new(&config).unwrap();
            l1.init(&metadata, 2).unwrap();
            let (_, h) = run(&l1, &[1.0, 0.0]);
            assert!(h[0] > 0.0 && h[0].is_finite(), "eta {} gave {}", eta, h[0]);
            // zero weight keeps a zero hessian
            assert_eq!(h[1], 0.0);

            let mut huber = RegressionHuberLoss::new(&ObjectiveConfig::huber(0.5).with_gaussian_eta(eta)).unwrap();
            huber.init(&metadata, 2).unwrap();
            let (_, h) = run(&huber, &[-3.0, 0.0]);
            assert!(h[0] > 0.0 && h[0].is_finite(), "eta {} gave {}", eta, h[0]);
        }
    }

    #[test]
    fn test_empty_data() {
        let metadata = Metadata::new(Array1::zeros(0), None).unwrap();
        let mut objective = RegressionL1Loss::new(&ObjectiveConfig::regression_l1()).unwrap();
        objective.init(&metadata, 0).unwrap();
        let (g, h) = run(&objective, &[]);
        assert!(g.is_empty() && h.is_empty());
        assert_eq!(objective.boost_from_score(), 0.0);
    }
}
