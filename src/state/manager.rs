use std::collections::HashMap;

use strsim::jaro_winkler;

use crate::error::{MacroError, Result};
use crate::models::{IngredientData, MacroTarget};
use crate::state::persistence::CatalogFile;

/// Minimum Jaro-Winkler similarity for a fuzzy name match.
pub const FUZZY_THRESHOLD: f64 = 0.7;

/// Meals and ingredients known to the CLI, keyed by lowercase name.
#[derive(Debug, Default)]
pub struct Catalog {
    meals: HashMap<String, MacroTarget>,
    ingredients: HashMap<String, IngredientData>,
}

fn sorted_by_name<'a, T>(items: impl Iterator<Item = &'a T>, name: impl Fn(&T) -> &str) -> Vec<&'a T>
where
    T: 'a,
{
    let mut v: Vec<&T> = items.collect();
    v.sort_by_key(|item| name(*item).to_lowercase());
    v
}

impl Catalog {
    /// Build a catalog from stored records. Later duplicates win.
    pub fn new(file: CatalogFile) -> Self {
        let mut catalog = Self::default();
        for meal in file.meals {
            catalog.meals.insert(meal.key(), meal);
        }
        for ing in file.ingredients {
            catalog.ingredients.insert(ing.key(), ing);
        }
        catalog
    }

    /// Get a meal by name (case-insensitive).
    pub fn get_meal(&self, name: &str) -> Option<&MacroTarget> {
        self.meals.get(&name.trim().to_lowercase())
    }

    /// Get an ingredient by name (case-insensitive).
    pub fn get_ingredient(&self, name: &str) -> Option<&IngredientData> {
        self.ingredients.get(&name.trim().to_lowercase())
    }

    /// Insert or replace a meal after validation. Returns true when it replaced
    /// an existing entry.
    pub fn upsert_meal(&mut self, meal: MacroTarget) -> Result<bool> {
        meal.validate().map_err(MacroError::InvalidInput)?;
        let meal = MacroTarget {
            name: meal.name.trim().to_string(),
            ..meal
        };
        Ok(self.meals.insert(meal.key(), meal).is_some())
    }

    /// Insert or replace an ingredient after sanitizing and validation.
    pub fn upsert_ingredient(&mut self, ingredient: IngredientData) -> Result<bool> {
        let ingredient = ingredient.sanitized();
        ingredient.validate().map_err(MacroError::InvalidInput)?;
        Ok(self.ingredients.insert(ingredient.key(), ingredient).is_some())
    }

    pub fn remove_meal(&mut self, name: &str) -> Result<MacroTarget> {
        self.meals
            .remove(&name.trim().to_lowercase())
            .ok_or_else(|| MacroError::MealNotFound(name.to_string()))
    }

    pub fn remove_ingredient(&mut self, name: &str) -> Result<IngredientData> {
        self.ingredients
            .remove(&name.trim().to_lowercase())
            .ok_or_else(|| MacroError::IngredientNotFound(name.to_string()))
    }

    /// Meals sorted by name, case-insensitive.
    pub fn meals(&self) -> Vec<&MacroTarget> {
        sorted_by_name(self.meals.values(), |m| m.name.as_str())
    }

    /// Ingredients sorted by name, case-insensitive.
    pub fn ingredients(&self) -> Vec<&IngredientData> {
        sorted_by_name(self.ingredients.values(), |i| i.name.as_str())
    }

    /// Ingredients whose name resembles `query`, best match first.
    pub fn fuzzy_ingredients(&self, query: &str) -> Vec<(&IngredientData, f64)> {
        let query = query.trim().to_lowercase();
        let mut candidates: Vec<(&IngredientData, f64)> = self
            .ingredients()
            .into_iter()
            .map(|i| (i, jaro_winkler(&i.name.to_lowercase(), &query)))
            .filter(|(_, score)| *score > FUZZY_THRESHOLD)
            .collect();
        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        candidates
    }

    /// Meal by exact name, else the single closest fuzzy match.
    pub fn find_meal(&self, query: &str) -> Result<&MacroTarget> {
        if let Some(meal) = self.get_meal(query) {
            return Ok(meal);
        }
        let q = query.trim().to_lowercase();
        self.meals()
            .into_iter()
            .map(|m| (m, jaro_winkler(&m.name.to_lowercase(), &q)))
            .filter(|(_, score)| *score > FUZZY_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(m, _)| m)
            .ok_or_else(|| MacroError::MealNotFound(query.to_string()))
    }

    /// Merge another catalog in, replacing entries with the same name.
    ///
    /// Returns (meals, ingredients) imported.
    pub fn merge(&mut self, other: CatalogFile) -> Result<(usize, usize)> {
        let mut counts = (0, 0);
        for meal in other.meals {
            self.upsert_meal(meal)?;
            counts.0 += 1;
        }
        for ing in other.ingredients {
            self.upsert_ingredient(ing)?;
            counts.1 += 1;
        }
        Ok(counts)
    }

    /// Snapshot for serialization, sorted by name.
    pub fn to_file(&self) -> CatalogFile {
        CatalogFile {
            meals: self.meals().into_iter().cloned().collect(),
            ingredients: self.ingredients().into_iter().cloned().collect(),
        }
    }

    pub fn meal_count(&self) -> usize {
        self.meals.len()
    }

    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty() && self.ingredients.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new(CatalogFile {
            meals: vec![
                MacroTarget::new("Lunch", 60.0, 30.0, 15.0),
                MacroTarget::new("breakfast", 50.0, 25.0, 10.0),
            ],
            ingredients: vec![
                IngredientData::new("Chicken breast", 0.0, 30.0, 5.0),
                IngredientData::new("Cooked rice", 28.0, 2.7, 0.3),
                IngredientData::new("Olive oil", 0.0, 0.0, 100.0).with_max(10.0),
            ],
        })
    }

    #[test]
    fn test_lookup_case_insensitive() {
        let catalog = sample();
        assert!(catalog.get_meal("LUNCH").is_some());
        assert!(catalog.get_ingredient("olive OIL").is_some());
        assert!(catalog.get_ingredient("butter").is_none());
    }

    #[test]
    fn test_sorted_listing() {
        let catalog = sample();
        let names: Vec<&str> = catalog.meals().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["breakfast", "Lunch"]);
    }

    #[test]
    fn test_upsert_sanitizes_and_validates() {
        let mut catalog = sample();
        let replaced = catalog
            .upsert_ingredient(IngredientData::new("Olive oil", 0.0, 0.0, 100.0).with_max(0.0))
            .unwrap();
        assert!(replaced);
        assert_eq!(catalog.get_ingredient("olive oil").unwrap().max, None);

        let bad = IngredientData::new("Broken", -1.0, 0.0, 0.0);
        assert!(matches!(
            catalog.upsert_ingredient(bad),
            Err(MacroError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_remove_missing_reports_not_found() {
        let mut catalog = sample();
        assert!(catalog.remove_meal("lunch").is_ok());
        assert!(matches!(
            catalog.remove_meal("lunch"),
            Err(MacroError::MealNotFound(_))
        ));
    }

    #[test]
    fn test_fuzzy_ingredients() {
        let catalog = sample();
        let matches = catalog.fuzzy_ingredients("chiken brest");
        assert!(!matches.is_empty());
        assert_eq!(matches[0].0.name, "Chicken breast");
    }

    #[test]
    fn test_find_meal_fuzzy() {
        let catalog = sample();
        assert_eq!(catalog.find_meal("lunh").unwrap().name, "Lunch");
        assert!(catalog.find_meal("zzzz").is_err());
    }

    #[test]
    fn test_merge_replaces_by_name() {
        let mut catalog = sample();
        let counts = catalog
            .merge(CatalogFile {
                meals: vec![MacroTarget::new("lunch", 70.0, 35.0, 20.0)],
                ingredients: vec![IngredientData::new("Oats", 60.0, 13.0, 7.0)],
            })
            .unwrap();
        assert_eq!(counts, (1, 1));
        assert_eq!(catalog.meal_count(), 2);
        assert_eq!(catalog.ingredient_count(), 4);
        assert_eq!(catalog.get_meal("Lunch").unwrap().carbo, 70.0);
    }
}
