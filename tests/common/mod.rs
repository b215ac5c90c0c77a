//! Common test utilities for the regression objective integration tests.

#![allow(dead_code)]

use lightgbm_regression_objective::*;
use ndarray::Array1;
use rand::prelude::*;

/// Create regression labels drawn uniformly from `[-10, 10)`
pub fn create_test_labels(num_samples: usize, seed: u64) -> Array1<Label> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array1::from_shape_fn(num_samples, |_| rng.gen_range(-10.0..10.0))
}

/// Create strictly positive sample weights in `[0.1, 5)`
pub fn create_test_weights(num_samples: usize, seed: u64) -> Array1<Label> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array1::from_shape_fn(num_samples, |_| rng.gen_range(0.1..5.0))
}

/// Create scores scattered around the labels, with a few large residuals
pub fn create_test_scores(labels: &Array1<Label>, seed: u64) -> Array1<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    labels.mapv(|y| {
        let spread = if rng.gen_bool(0.1) { 100.0 } else { 3.0 };
        y as f64 + rng.gen_range(-spread..spread)
    })
}

/// Create metadata with seeded labels and, optionally, seeded weights
pub fn create_test_metadata(num_samples: usize, weighted: bool) -> Metadata {
    let labels = create_test_labels(num_samples, 42);
    let weights = weighted.then(|| create_test_weights(num_samples, 7));
    Metadata::new(labels, weights).expect("test metadata should be valid")
}

/// A representative configuration for every objective
pub fn all_test_configs() -> Vec<ObjectiveConfig> {
    vec![
        ObjectiveConfig::regression(),
        ObjectiveConfig::regression_l1().with_gaussian_eta(0.5),
        ObjectiveConfig::huber(2.0).with_gaussian_eta(0.5),
        ObjectiveConfig::fair(1.5),
    ]
}

/// Run an initialized objective and return fresh gradient and hessian buffers
pub fn compute<'a>(
    objective: &dyn ObjectiveFunction<'a>,
    score: &Array1<f64>,
) -> (Array1<Score>, Array1<Score>) {
    let mut gradients = Array1::from_elem(score.len(), Score::NAN);
    let mut hessians = Array1::from_elem(score.len(), Score::NAN);
    objective
        .get_gradients(score.view(), gradients.view_mut(), hessians.view_mut())
        .expect("gradient computation should succeed");
    (gradients, hessians)
}

/// Create and bind an objective to `metadata`
pub fn bound_objective<'a>(config: &ObjectiveConfig, metadata: &'a Metadata) -> BoxedObjective<'a> {
    let mut objective = create_objective_function(config).expect("config should be valid");
    objective
        .init(metadata, metadata.num_data())
        .expect("init should succeed");
    objective
}
