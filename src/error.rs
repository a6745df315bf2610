use thiserror::Error;

use crate::models::{Deviation, Output};

/// Failures of a single optimization run.
#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("Invalid ingredient: {0}")]
    InvalidIngredient(String),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// Mandatory grams exceed the declared max. Carries the all-zero report
    /// (100% deviation on every macro) the run degenerates to.
    #[error("Mandatory grams ({mandatory}) exceed available max ({max}) for {ingredient}")]
    Infeasible {
        ingredient: String,
        mandatory: f64,
        max: f64,
        output: Output,
    },

    #[error(
        "Unable to meet macros within tolerance of {tolerance}% with given ingredients. \
         Best deviations: protein={}%, fat={}%, carbs={}%.",
        .deviation.protein,
        .deviation.fat,
        .deviation.carbo
    )]
    ToleranceExceeded { deviation: Deviation, tolerance: f64 },

    #[error("No attempts configured")]
    NoAttempts,
}

#[derive(Debug, Error)]
pub enum MacroError {
    #[error("Meal not found: {0}")]
    MealNotFound(String),

    #[error("Ingredient not found: {0}")]
    IngredientNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No ingredients selected")]
    NoIngredientsSelected,

    #[error(transparent)]
    Optimize(#[from] OptimizeError),
}

pub type Result<T> = std::result::Result<T, MacroError>;
