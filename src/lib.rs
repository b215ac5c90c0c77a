//! # LightGBM Regression Objectives
//!
//! Pure Rust implementation of the regression objective functions of the
//! LightGBM gradient boosting framework: the per-example gradients and
//! hessians a boosting driver needs to grow each tree.
//!
//! ## Objectives
//!
//! - **`regression`**: squared error (L2), constant hessian
//! - **`regression_l1`**: absolute error (L1), with a Gaussian-smoothed hessian
//! - **`huber`**: quadratic near zero, linear beyond `huber_delta`
//! - **`fair`**: smooth robust loss controlled by `fair_c`
//!
//! ## Quick Start
//!
//! ```rust
//! use lightgbm_regression_objective::{create_objective_function, Metadata, ObjectiveConfig};
//! use ndarray::{array, Array1};
//!
//! # fn main() -> lightgbm_regression_objective::Result<()> {
//! let metadata = Metadata::new(array![1.0, 2.0, 3.0], None)?;
//!
//! let mut objective = create_objective_function(&ObjectiveConfig::huber(1.0))?;
//! objective.init(&metadata, metadata.num_data())?;
//!
//! let score = array![1.0, 1.0, 1.0];
//! let mut gradients = Array1::zeros(3);
//! let mut hessians = Array1::zeros(3);
//! objective.get_gradients(score.view(), gradients.view_mut(), hessians.view_mut())?;
//!
//! assert_eq!(gradients[1], -1.0);
//! assert_eq!(hessians[0], 1.0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: Scalar types, constants, error handling and the objective trait
//! - [`config`]: Objective parameters, parsing and persistence
//! - [`dataset`]: Labels and sample weights consumed by the objectives
//! - [`objective`]: The regression losses and the name registry

#![doc(html_root_url = "https://docs.rs/lightgbm-regression-objective/")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    non_snake_case,
    non_upper_case_globals
)]

// Core infrastructure module - always available
pub mod core;

// Configuration management module
pub mod config;

// Dataset metadata module
pub mod dataset;

// Objective functions
pub mod objective;

// Re-export core functionality for convenience
pub use core::{
    constants::*,
    error::{LightGBMError, Result},
    init_logging,
    traits::*,
    types::*,
};

// Re-export configuration functionality
pub use config::{ConfigFormat, ObjectiveConfig};

// Re-export dataset functionality
pub use dataset::Metadata;

// Re-export objective functionality
pub use objective::{
    create_objective_function, create_objective_function_from_name, BoxedObjective,
    RegressionFairLoss, RegressionHuberLoss, RegressionL1Loss, RegressionL2Loss,
};

// Version information
pub use core::constants::LIGHTGBM_RUST_VERSION as VERSION;
