//! Core infrastructure module.
//!
//! This module provides the foundational components the objectives are built
//! on: scalar types, default constants, error handling, the objective trait
//! and shared numerical helpers.
//!
//! - [`types`]: Scalar aliases and the [`types::ObjectiveType`] enumeration
//! - [`constants`]: Parameter defaults and numerical constants
//! - [`error`]: Error type and `Result` alias
//! - [`traits`]: The [`traits::ObjectiveFunction`] contract
//! - [`utils`]: Hessian smoothing and weighted statistics

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
pub mod utils;

pub use constants::*;
pub use error::{LightGBMError, Result};
pub use traits::*;
pub use types::*;

/// Initialize the logging subsystem.
///
/// Defaults `RUST_LOG` to `info` when unset. Safe to call more than once;
/// later calls are no-ops if a logger is already installed.
pub fn init_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }

    // Try to initialize env_logger, ignore if already initialized
    let _ = env_logger::try_init();
}
