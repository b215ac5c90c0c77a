//! Objective function registry.
//!
//! Maps objective names (and their LightGBM aliases) to the regression loss
//! implementations. The canonical name of each objective is also what gets
//! persisted in a trained model's configuration, so
//! `create_objective_function_from_name(objective.name(), ..)` always
//! recreates the same kind of objective.

pub mod regression;

pub use regression::{RegressionFairLoss, RegressionHuberLoss, RegressionL1Loss, RegressionL2Loss};

use crate::config::ObjectiveConfig;
use crate::core::error::Result;
use crate::core::traits::ObjectiveFunction;
use crate::core::types::ObjectiveType;

/// Boxed objective borrowing metadata for `'a`.
pub type BoxedObjective<'a> = Box<dyn ObjectiveFunction<'a> + 'a>;

/// Factory function to create objective functions
pub fn create_objective_function<'a>(config: &ObjectiveConfig) -> Result<BoxedObjective<'a>> {
    config.validate()?;
    let objective: BoxedObjective<'a> = match config.objective {
        ObjectiveType::Regression => Box::new(RegressionL2Loss::new(config)?),
        ObjectiveType::RegressionL1 => Box::new(RegressionL1Loss::new(config)?),
        ObjectiveType::Huber => Box::new(RegressionHuberLoss::new(config)?),
        ObjectiveType::Fair => Box::new(RegressionFairLoss::new(config)?),
    };
    log::debug!("Created objective '{}' from {:?}", objective.name(), config);
    Ok(objective)
}

/// Create an objective by name, taking its parameters from `config`.
///
/// `name` overrides `config.objective` and may be any accepted alias.
pub fn create_objective_function_from_name<'a>(
    name: &str,
    config: &ObjectiveConfig,
) -> Result<BoxedObjective<'a>> {
    let objective: ObjectiveType = name.parse()?;
    create_objective_function(&ObjectiveConfig {
        objective,
        ..*config
    })
}
