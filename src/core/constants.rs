//! Default parameter values and numerical constants for the regression objectives.

/// Default width of the Gaussian used to approximate the hessian of
/// non-smooth losses (`gaussian_eta`).
pub const DEFAULT_GAUSSIAN_ETA: f64 = 1.0;

/// Default Huber threshold (`huber_delta`).
pub const DEFAULT_HUBER_DELTA: f64 = 1.0;

/// Default Fair loss constant (`fair_c`).
pub const DEFAULT_FAIR_C: f64 = 1.0;

/// Hessian written by the squared-error loss for unweighted data.
pub const L2_CONSTANT_HESSIAN: f64 = 1.0;

/// `sqrt(2 * pi)`, normalizer of the Gaussian kernel.
pub const SQRT_2PI: f64 = 2.506_628_274_631_000_7;

/// Version information.
pub const LIGHTGBM_RUST_VERSION: &str = env!("CARGO_PKG_VERSION");
