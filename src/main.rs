use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use macro_meal_rs::cli::{Cli, Command};
use macro_meal_rs::error::{MacroError, Result};
use macro_meal_rs::interface::{
    display_catalog, display_failure, display_output, output_json, prompt_ingredients,
    prompt_meal, prompt_yes_no, resolve_ingredient, write_output_csv,
};
use macro_meal_rs::models::{IngredientData, MacroTarget};
use macro_meal_rs::optimizer::{optimize_with_rng, OptimizerConfig};
use macro_meal_rs::state::{load_catalog, load_or_default, read_catalog_file, save_catalog};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        if let MacroError::Optimize(err) = &e {
            display_failure(err);
        }
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Optimize {
            meal,
            ingredients,
            seed,
            tolerance,
            max_iterations,
            json,
            csv,
        } => cmd_optimize(
            &cli.file,
            OptimizeArgs {
                meal,
                ingredients,
                seed,
                tolerance,
                max_iterations,
                json,
                csv,
            },
        ),
        Command::List => cmd_list(&cli.file),
        Command::Import { path } => cmd_import(&cli.file, &path),
        Command::AddMeal {
            name,
            carbo,
            protein,
            fat,
        } => cmd_add_meal(&cli.file, MacroTarget::new(name, carbo, protein, fat)),
        Command::AddIngredient {
            name,
            carbo_100g,
            protein_100g,
            fat_100g,
            min,
            max,
            mandatory,
            indivisible,
        } => {
            let ingredient = IngredientData {
                min,
                max,
                mandatory,
                indivisible,
                ..IngredientData::new(name, carbo_100g, protein_100g, fat_100g)
            };
            cmd_add_ingredient(&cli.file, ingredient)
        }
        Command::RemoveMeal { name } => cmd_remove(&cli.file, &name, true),
        Command::RemoveIngredient { name } => cmd_remove(&cli.file, &name, false),
    }
}

struct OptimizeArgs {
    meal: Option<String>,
    ingredients: Vec<String>,
    seed: Option<u64>,
    tolerance: Option<f64>,
    max_iterations: Option<usize>,
    json: bool,
    csv: Option<PathBuf>,
}

/// Compose a meal: pick the target and ingredients, then run the optimizer.
fn cmd_optimize(file_path: &str, args: OptimizeArgs) -> Result<()> {
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Catalog file not found: {}", file_path);
        eprintln!("Add meals and ingredients with 'add-meal' / 'add-ingredient' first.");
        return Ok(());
    }

    let catalog = load_catalog(path)?;

    let target = match &args.meal {
        Some(name) => catalog.find_meal(name)?.clone(),
        None => prompt_meal(&catalog)?,
    };

    let ingredients: Vec<IngredientData> = if args.ingredients.is_empty() {
        prompt_ingredients(&catalog)?
    } else {
        args.ingredients
            .iter()
            .map(|name| resolve_ingredient(&catalog, name))
            .collect::<Result<_>>()?
    };

    if ingredients.is_empty() {
        return Err(MacroError::NoIngredientsSelected);
    }

    let ingredients: Vec<IngredientData> = ingredients.iter().map(IngredientData::sanitized).collect();

    let mut config = OptimizerConfig::default();
    if let Some(tolerance) = args.tolerance {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(MacroError::InvalidInput(
                "Tolerance must be a non-negative number".to_string(),
            ));
        }
        config = config.with_tolerance(tolerance);
    }
    if let Some(iterations) = args.max_iterations {
        config = config.with_max_refine_iterations(iterations);
    }

    let output = match args.seed {
        Some(seed) => optimize_with_rng(
            &target,
            &ingredients,
            &config,
            &mut StdRng::seed_from_u64(seed),
        )?,
        None => optimize_with_rng(&target, &ingredients, &config, &mut rand::thread_rng())?,
    };

    if args.json {
        println!("{}", output_json(&output, &target)?);
    } else {
        display_output(&output, &target);
    }

    if let Some(csv_path) = &args.csv {
        write_output_csv(&output, csv_path)?;
        println!("Wrote {}", csv_path.display());
    }

    Ok(())
}

/// Print everything in the catalog.
fn cmd_list(file_path: &str) -> Result<()> {
    let catalog = load_or_default(file_path)?;

    if catalog.is_empty() {
        println!("Catalog is empty: {}", file_path);
        return Ok(());
    }

    display_catalog(&catalog);
    Ok(())
}

/// Merge another catalog file into ours.
fn cmd_import(file_path: &str, source: &Path) -> Result<()> {
    let mut catalog = load_or_default(file_path)?;
    let incoming = read_catalog_file(source)?;

    let overlapping = incoming
        .meals
        .iter()
        .filter(|m| catalog.get_meal(&m.name).is_some())
        .count()
        + incoming
            .ingredients
            .iter()
            .filter(|i| catalog.get_ingredient(&i.name).is_some())
            .count();

    if overlapping > 0 {
        let replace = prompt_yes_no(
            &format!("{} entries already exist. Replace them?", overlapping),
            true,
        )?;
        if !replace {
            println!("Import cancelled.");
            return Ok(());
        }
    }

    let (meals, ingredients) = catalog.merge(incoming)?;

    save_catalog(file_path, &catalog)?;
    println!(
        "Imported {} meals and {} ingredients from {}.",
        meals,
        ingredients,
        source.display()
    );
    Ok(())
}

fn cmd_add_meal(file_path: &str, meal: MacroTarget) -> Result<()> {
    let mut catalog = load_or_default(file_path)?;
    let name = meal.name.clone();

    let replaced = catalog.upsert_meal(meal)?;

    save_catalog(file_path, &catalog)?;
    println!("{} meal '{}'.", if replaced { "Updated" } else { "Added" }, name);
    Ok(())
}

fn cmd_add_ingredient(file_path: &str, ingredient: IngredientData) -> Result<()> {
    let mut catalog = load_or_default(file_path)?;
    let name = ingredient.name.clone();

    let replaced = catalog.upsert_ingredient(ingredient)?;

    save_catalog(file_path, &catalog)?;
    println!(
        "{} ingredient '{}'.",
        if replaced { "Updated" } else { "Added" },
        name
    );
    Ok(())
}

fn cmd_remove(file_path: &str, name: &str, meal: bool) -> Result<()> {
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Catalog file not found: {}", file_path);
        return Ok(());
    }

    let mut catalog = load_catalog(path)?;

    let removed = if meal {
        catalog.remove_meal(name)?.name
    } else {
        catalog.remove_ingredient(name)?.name
    };

    save_catalog(path, &catalog)?;
    println!("Removed '{}'.", removed);
    Ok(())
}
