use serde::{Deserialize, Serialize};

/// Aggregate macros (grams) and calories of a composed meal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTotals {
    pub carbo: f64,
    pub protein: f64,
    pub fat: f64,
    pub kcal: f64,
}

/// One ingredient's share of the composed meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRow {
    pub name: String,
    pub weight: f64,
    pub carbo: f64,
    pub protein: f64,
    pub fat: f64,
    pub kcal: f64,
}

/// Percentage deviation of the achieved totals from the target, per macro.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Deviation {
    pub carbo: f64,
    pub protein: f64,
    pub fat: f64,
}

impl Deviation {
    /// Largest absolute deviation across the three macros.
    pub fn max_abs(&self) -> f64 {
        self.carbo.abs().max(self.protein.abs()).max(self.fat.abs())
    }

    /// True when every macro is within `tolerance` percentage points.
    pub fn within(&self, tolerance: f64) -> bool {
        self.carbo.abs() <= tolerance
            && self.protein.abs() <= tolerance
            && self.fat.abs() <= tolerance
    }
}

/// The optimizer's report: rounded totals, non-zero rows and deviations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Output {
    pub total: MacroTotals,
    pub ingredients: Vec<IngredientRow>,
    pub deviation: Deviation,
}

impl Output {
    /// Row for an ingredient by name (case-insensitive).
    pub fn row(&self, name: &str) -> Option<&IngredientRow> {
        let key = name.to_lowercase();
        self.ingredients.iter().find(|r| r.name.to_lowercase() == key)
    }

    /// Sum of reported grams.
    pub fn total_weight(&self) -> f64 {
        self.ingredients.iter().map(|r| r.weight).sum()
    }
}
