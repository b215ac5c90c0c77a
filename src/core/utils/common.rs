/*!
 * Copyright (c) 2016 Microsoft Corporation. All rights reserved.
 * Licensed under the MIT License. See LICENSE file in the project root for license information.
 */

//! Numerical helpers shared by the regression objectives.

use crate::core::constants::SQRT_2PI;
use ndarray::ArrayView1;
use num_traits::AsPrimitive;

/// Common utility functions for objective computations.
#[derive(Debug)]
pub struct Common;

impl Common {
    /// Approximates the hessian of a loss whose true second derivative is zero
    /// or undefined (the kink of |x|) with a Gaussian bump of width `eta`.
    ///
    /// With `x = |score - label|` the estimate is
    ///
    /// ```text
    /// 2 |grad| / (eta * sqrt(2 pi)) * exp(-min(x, eta)^2 / (2 eta^2))
    /// ```
    ///
    /// i.e. the curvature of |x| convolved with N(0, eta^2), held at its
    /// one-bandwidth value once the residual is further than `eta` from the
    /// kink. The result is:
    ///
    /// * strictly positive for finite inputs with `grad != 0` and `eta > 0`,
    ///   never smaller than `exp(-1/2)` times its peak;
    /// * continuous in the residual and in `eta`;
    /// * strictly decreasing in `eta`;
    /// * linear in `|grad|`, so passing a gradient already multiplied by a
    ///   sample weight yields the weighted hessian.
    ///
    /// A NaN residual propagates to the result.
    #[inline]
    pub fn approximate_hessian_with_gaussian(score: f64, label: f64, grad: f64, eta: f64) -> f64 {
        let mut x = (score - label).abs();
        // plain comparison so that NaN falls through unchanged
        if x > eta {
            x = eta;
        }
        // scaled by eta first so neither x^2 nor eta^2 can overflow
        let r = x / eta;
        let peak = 2.0 * grad.abs() / SQRT_2PI / eta;
        peak * (-0.5 * r * r).exp()
    }

    /// Weighted arithmetic mean of `values`. Returns 0 for empty input or a
    /// non-positive total weight.
    pub fn weighted_mean<T>(values: ArrayView1<'_, T>, weights: Option<ArrayView1<'_, T>>) -> f64
    where
        T: AsPrimitive<f64>,
    {
        match weights {
            None => {
                if values.is_empty() {
                    return 0.0;
                }
                let sum: f64 = values.iter().map(|v| v.as_()).sum();
                sum / values.len() as f64
            }
            Some(weights) => {
                let (sum, total) = values
                    .iter()
                    .zip(weights.iter())
                    .fold((0.0f64, 0.0f64), |(sum, total), (v, w)| {
                        let w: f64 = w.as_();
                        (sum + v.as_() * w, total + w)
                    });
                if total > 0.0 {
                    sum / total
                } else {
                    0.0
                }
            }
        }
    }

    /// Weighted median of `values`.
    ///
    /// Without weights this is the usual median (mean of the two middle
    /// elements for an even count). With weights it is the smallest value whose
    /// cumulative weight reaches half of the total. Returns 0 for empty input
    /// or a non-positive total weight.
    pub fn weighted_median<T>(values: ArrayView1<'_, T>, weights: Option<ArrayView1<'_, T>>) -> f64
    where
        T: AsPrimitive<f64>,
    {
        let n = values.len();
        if n == 0 {
            return 0.0;
        }
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| values[a].as_().total_cmp(&values[b].as_()));

        match weights {
            None => {
                let mid = n / 2;
                if n % 2 == 1 {
                    values[order[mid]].as_()
                } else {
                    (values[order[mid - 1]].as_() + values[order[mid]].as_()) / 2.0
                }
            }
            Some(weights) => {
                let total: f64 = weights.iter().map(|w| w.as_()).sum();
                if total <= 0.0 {
                    return 0.0;
                }
                let target = total * 0.5;
                let mut cumulative = 0.0;
                for &i in &order {
                    cumulative += weights[i].as_();
                    if cumulative >= target {
                        return values[i].as_();
                    }
                }
                values[order[n - 1]].as_()
            }
        }
    }

    /// Removes surrounding quotation marks (single or double) from a string.
    pub fn remove_quotation_symbol(s: &str) -> &str {
        s.trim_matches(&['\'', '"'][..])
    }
}
