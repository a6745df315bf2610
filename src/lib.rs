#[cfg(test)]
#[macro_use]
extern crate assert_float_eq;

pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod optimizer;
pub mod state;

pub use error::{MacroError, OptimizeError, Result};
pub use models::{IngredientData, MacroTarget, Output};
pub use optimizer::{optimize, optimize_with_config, optimize_with_rng, OptimizerConfig};
