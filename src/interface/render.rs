use crate::error::OptimizeError;
use crate::models::{IngredientData, MacroTarget, Output};
use crate::state::Catalog;

/// Format a signed percentage, e.g. "+4.2%".
fn signed_pct(value: f64) -> String {
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{}{:.1}%", sign, value)
}

/// Display an optimization result as an aligned table.
pub fn display_output(output: &Output, target: &MacroTarget) {
    println!();
    println!("=== {} ===", target.name);
    println!();

    if output.ingredients.is_empty() {
        println!("No ingredients used.");
    } else {
        let width = output
            .ingredients
            .iter()
            .map(|r| r.name.len())
            .max()
            .unwrap_or(10)
            .max(5);

        println!(
            "{:<width$}  {:>8}  {:>7}  {:>7}  {:>7}  {:>5}",
            "Item",
            "Weight",
            "Carbo",
            "Protein",
            "Fat",
            "kcal",
            width = width
        );
        for row in &output.ingredients {
            println!(
                "{:<width$}  {:>7.1}g  {:>7.1}  {:>7.1}  {:>7.1}  {:>5.0}",
                row.name,
                row.weight,
                row.carbo,
                row.protein,
                row.fat,
                row.kcal,
                width = width
            );
        }
    }

    println!();
    println!("--- Summary ---");
    println!(
        "Carbo:   {:>6.1} g  (target {:.1}, {})",
        output.total.carbo,
        target.carbo,
        signed_pct(output.deviation.carbo)
    );
    println!(
        "Protein: {:>6.1} g  (target {:.1}, {})",
        output.total.protein,
        target.protein,
        signed_pct(output.deviation.protein)
    );
    println!(
        "Fat:     {:>6.1} g  (target {:.1}, {})",
        output.total.fat,
        target.fat,
        signed_pct(output.deviation.fat)
    );
    println!(
        "Energy:  {:>6.0} kcal (target {:.0})",
        output.total.kcal,
        target.kcal()
    );
    println!();
}

/// Explain an optimizer failure in user-facing terms.
pub fn display_failure(err: &OptimizeError) {
    match err {
        OptimizeError::Infeasible {
            ingredient,
            mandatory,
            max,
            ..
        } => {
            eprintln!(
                "'{}' requires {:.1} g but at most {:.1} g is available.",
                ingredient, mandatory, max
            );
            eprintln!("Lower its mandatory amount or raise its max, then try again.");
        }
        OptimizeError::ToleranceExceeded { .. } => {
            eprintln!("{}", err);
            eprintln!("Try adding ingredients that cover the missing macros, or loosen --tolerance.");
        }
        other => eprintln!("{}", other),
    }
}

fn format_bound(label: &str, value: Option<f64>) -> Option<String> {
    value.map(|v| format!("{}:{}", label, v))
}

fn ingredient_line(ing: &IngredientData) -> String {
    let limits: Vec<String> = [
        format_bound("min", ing.min),
        format_bound("max", ing.max),
        format_bound("mandatory", ing.mandatory),
        format_bound("step", ing.indivisible),
    ]
    .into_iter()
    .flatten()
    .collect();

    let limits = if limits.is_empty() {
        String::new()
    } else {
        format!("  [{}]", limits.join(" "))
    };

    format!(
        "  {} - C:{} P:{} F:{} per 100g, {:.0} kcal{}",
        ing.name,
        ing.carbo_100g,
        ing.protein_100g,
        ing.fat_100g,
        ing.kcal_100g(),
        limits
    )
}

/// Display every meal and ingredient in the catalog.
pub fn display_catalog(catalog: &Catalog) {
    let meals = catalog.meals();
    if meals.is_empty() {
        println!("Meals: (none)");
    } else {
        println!();
        println!("=== Meals ({} items) ===", meals.len());
        println!();
        for meal in meals {
            println!(
                "  {} - C:{} P:{} F:{}, {:.0} kcal",
                meal.name,
                meal.carbo,
                meal.protein,
                meal.fat,
                meal.kcal()
            );
        }
    }

    let ingredients = catalog.ingredients();
    if ingredients.is_empty() {
        println!("Ingredients: (none)");
    } else {
        println!();
        println!("=== Ingredients ({} items) ===", ingredients.len());
        println!();
        for ing in ingredients {
            println!("{}", ingredient_line(ing));
        }
    }
    println!();
}
