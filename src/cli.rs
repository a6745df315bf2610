use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// MacroMeal — size ingredient portions so a meal hits its carb, protein and fat targets.
#[derive(Parser, Debug)]
#[command(name = "macro_meal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the catalog JSON file.
    #[arg(short, long, default_value = "macro_catalog.json", global = true)]
    pub file: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compose a meal from the chosen ingredients.
    Optimize {
        /// Stored meal to target (prompted when omitted).
        #[arg(short, long)]
        meal: Option<String>,

        /// Ingredient to use; repeat for several (prompted when omitted).
        #[arg(short, long = "ingredient")]
        ingredients: Vec<String>,

        /// Seed the random source for reproducible results.
        #[arg(long)]
        seed: Option<u64>,

        /// Maximum deviation per macro, in percent.
        #[arg(long)]
        tolerance: Option<f64>,

        /// Maximum refinement sweeps per attempt.
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Print the result as JSON instead of a table.
        #[arg(long)]
        json: bool,

        /// Also write the result rows to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// List stored meals and ingredients.
    List,

    /// Merge meals and ingredients from another catalog file.
    Import {
        /// Catalog JSON file to merge in.
        path: PathBuf,
    },

    /// Add or replace a meal target.
    AddMeal {
        name: String,

        /// Carbohydrate grams.
        #[arg(long)]
        carbo: f64,

        /// Protein grams.
        #[arg(long)]
        protein: f64,

        /// Fat grams.
        #[arg(long)]
        fat: f64,
    },

    /// Add or replace an ingredient.
    AddIngredient {
        name: String,

        /// Carbohydrate grams per 100 g.
        #[arg(long = "carbo100g")]
        carbo_100g: f64,

        /// Protein grams per 100 g.
        #[arg(long = "protein100g")]
        protein_100g: f64,

        /// Fat grams per 100 g.
        #[arg(long = "fat100g")]
        fat_100g: f64,

        /// Lower bound in grams.
        #[arg(long)]
        min: Option<f64>,

        /// Upper bound in grams.
        #[arg(long)]
        max: Option<f64>,

        /// Grams that must always be included.
        #[arg(long)]
        mandatory: Option<f64>,

        /// Portion size; extra grams come in whole multiples of it.
        #[arg(long)]
        indivisible: Option<f64>,
    },

    /// Remove a meal.
    RemoveMeal { name: String },

    /// Remove an ingredient.
    RemoveIngredient { name: String },
}

impl Default for Command {
    fn default() -> Self {
        Command::Optimize {
            meal: None,
            ingredients: Vec::new(),
            seed: None,
            tolerance: None,
            max_iterations: None,
            json: false,
            csv: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_optimize_with_repeated_ingredients() {
        let cli = Cli::parse_from([
            "macro_meal",
            "optimize",
            "--meal",
            "Lunch",
            "-i",
            "Chicken breast",
            "--ingredient",
            "Cooked rice",
            "--seed",
            "42",
        ]);
        match cli.command {
            Some(Command::Optimize {
                meal,
                ingredients,
                seed,
                json,
                ..
            }) => {
                assert_eq!(meal.as_deref(), Some("Lunch"));
                assert_eq!(ingredients, vec!["Chicken breast", "Cooked rice"]);
                assert_eq!(seed, Some(42));
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.file, "macro_catalog.json");
    }

    #[test]
    fn test_parse_add_ingredient_flags() {
        let cli = Cli::parse_from([
            "macro_meal",
            "--file",
            "other.json",
            "add-ingredient",
            "Whey",
            "--carbo100g",
            "5",
            "--protein100g",
            "80",
            "--fat100g",
            "2",
            "--indivisible",
            "30",
        ]);
        assert_eq!(cli.file, "other.json");
        match cli.command {
            Some(Command::AddIngredient {
                name,
                protein_100g,
                indivisible,
                max,
                ..
            }) => {
                assert_eq!(name, "Whey");
                assert_eq!(protein_100g, 80.0);
                assert_eq!(indivisible, Some(30.0));
                assert_eq!(max, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_default_command_is_optimize() {
        assert!(matches!(Command::default(), Command::Optimize { json: false, .. }));
    }
}
