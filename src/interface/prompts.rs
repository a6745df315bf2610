use dialoguer::{Confirm, Input, MultiSelect, Select};

use crate::error::{MacroError, Result};
use crate::models::{IngredientData, MacroTarget};
use crate::state::Catalog;

/// Prompt for a non-negative number of grams.
pub fn prompt_grams(prompt: &str, default: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| MacroError::InvalidInput("Invalid number".to_string()))?;

    if !value.is_finite() || value < 0.0 {
        return Err(MacroError::InvalidInput(
            "Grams must be a non-negative number".to_string(),
        ));
    }

    Ok(value)
}

/// Prompt for an ad-hoc macro target.
pub fn prompt_target() -> Result<MacroTarget> {
    let name: String = Input::new()
        .with_prompt("Meal name")
        .default("Custom meal".to_string())
        .interact_text()?;
    let carbo = prompt_grams("Carbohydrate target (g)", 0.0)?;
    let protein = prompt_grams("Protein target (g)", 0.0)?;
    let fat = prompt_grams("Fat target (g)", 0.0)?;
    Ok(MacroTarget::new(name.trim(), carbo, protein, fat))
}

/// Let the user pick a stored meal, or enter a new target.
pub fn prompt_meal(catalog: &Catalog) -> Result<MacroTarget> {
    let meals = catalog.meals();
    if meals.is_empty() {
        return prompt_target();
    }

    let mut options: Vec<String> = meals
        .iter()
        .map(|m| format!("{} (C:{} P:{} F:{})", m.name, m.carbo, m.protein, m.fat))
        .collect();
    options.push("Enter a custom target".to_string());

    let selection = Select::new()
        .with_prompt("Which meal?")
        .items(&options)
        .default(0)
        .interact()?;

    match meals.get(selection) {
        Some(meal) => Ok((*meal).clone()),
        None => prompt_target(),
    }
}

/// Let the user tick the ingredients to compose the meal from.
pub fn prompt_ingredients(catalog: &Catalog) -> Result<Vec<IngredientData>> {
    let ingredients = catalog.ingredients();
    if ingredients.is_empty() {
        return Err(MacroError::NoIngredientsSelected);
    }

    let options: Vec<String> = ingredients.iter().map(|i| i.name.clone()).collect();
    let picked = MultiSelect::new()
        .with_prompt("Select ingredients (space to toggle, enter to confirm)")
        .items(&options)
        .interact()?;

    if picked.is_empty() {
        return Err(MacroError::NoIngredientsSelected);
    }

    Ok(picked
        .into_iter()
        .filter_map(|i| ingredients.get(i).map(|ing| (*ing).clone()))
        .collect())
}

/// Resolve an ingredient name typed by the user, with fuzzy matching.
///
/// Exact (case-insensitive) names resolve silently; otherwise the user
/// confirms or picks among the closest matches.
pub fn resolve_ingredient(catalog: &Catalog, name: &str) -> Result<IngredientData> {
    if let Some(ing) = catalog.get_ingredient(name) {
        return Ok(ing.clone());
    }

    let candidates = catalog.fuzzy_ingredients(name);

    if candidates.is_empty() {
        return Err(MacroError::IngredientNotFound(name.to_string()));
    }

    if candidates.len() == 1 {
        let ing = candidates[0].0;
        let confirm = Confirm::new()
            .with_prompt(format!("Did you mean '{}'?", ing.name))
            .default(true)
            .interact()?;

        return if confirm {
            Ok(ing.clone())
        } else {
            Err(MacroError::IngredientNotFound(name.to_string()))
        };
    }

    // Multiple matches - let user select
    let options: Vec<String> = candidates
        .iter()
        .take(5)
        .map(|(i, _)| i.name.clone())
        .collect();

    let mut selection_options = options.clone();
    selection_options.push("None of these".to_string());

    let selection = Select::new()
        .with_prompt(format!("Which did you mean by '{}'?", name))
        .items(&selection_options)
        .default(0)
        .interact()?;

    if selection < options.len() {
        Ok(candidates[selection].0.clone())
    } else {
        Err(MacroError::IngredientNotFound(name.to_string()))
    }
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
