use serde::{Deserialize, Serialize};

use crate::models::macros::MacroDensity;

/// Optional values closer to zero than this are treated as unset by `sanitized`.
const ZERO_EPSILON: f64 = 1e-6;

/// A candidate ingredient with per-100g macros and optional portion limits.
///
/// `min`/`max` bound the total grams used, `mandatory` is a floor that is
/// always present, and `indivisible` restricts the adjustable grams to
/// multiples of that step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientData {
    pub name: String,

    #[serde(rename = "carbo100g")]
    pub carbo_100g: f64,

    #[serde(rename = "protein100g")]
    pub protein_100g: f64,

    #[serde(rename = "fat100g")]
    pub fat_100g: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mandatory: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indivisible: Option<f64>,
}

impl IngredientData {
    /// Unconstrained ingredient.
    pub fn new(name: impl Into<String>, carbo_100g: f64, protein_100g: f64, fat_100g: f64) -> Self {
        Self {
            name: name.into(),
            carbo_100g,
            protein_100g,
            fat_100g,
            min: None,
            max: None,
            mandatory: None,
            indivisible: None,
        }
    }

    pub fn with_min(mut self, grams: f64) -> Self {
        self.min = Some(grams);
        self
    }

    pub fn with_max(mut self, grams: f64) -> Self {
        self.max = Some(grams);
        self
    }

    pub fn with_mandatory(mut self, grams: f64) -> Self {
        self.mandatory = Some(grams);
        self
    }

    pub fn with_indivisible(mut self, step: f64) -> Self {
        self.indivisible = Some(step);
        self
    }

    /// Per-gram macro density.
    #[inline]
    pub fn density(&self) -> MacroDensity {
        MacroDensity::from_per_100g(self.carbo_100g, self.protein_100g, self.fat_100g)
    }

    /// Calories in 100 g.
    pub fn kcal_100g(&self) -> f64 {
        self.density().kcal() * 100.0
    }

    /// Returns a description of the first problem found, if any.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is required".to_string());
        }
        for (label, value) in [
            ("carbo100g", self.carbo_100g),
            ("protein100g", self.protein_100g),
            ("fat100g", self.fat_100g),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "{}: {} must be a non-negative number, got {}",
                    self.name, label, value
                ));
            }
        }
        for (label, value) in [
            ("min", self.min),
            ("max", self.max),
            ("mandatory", self.mandatory),
            ("indivisible", self.indivisible),
        ] {
            if let Some(v) = value.filter(|v| !v.is_finite() || *v < 0.0) {
                return Err(format!(
                    "{}: {} must be a non-negative number, got {}",
                    self.name, label, v
                ));
            }
        }
        Ok(())
    }

    /// Copy with near-zero or non-finite optional values dropped.
    ///
    /// Editors tend to store `0` for "no limit"; this maps those back to unset
    /// so a blank `max` does not pin the ingredient at zero grams.
    pub fn sanitized(&self) -> Self {
        let bound = |v: Option<f64>| v.filter(|x| x.is_finite() && x.abs() >= ZERO_EPSILON);
        Self {
            name: self.name.trim().to_string(),
            carbo_100g: self.carbo_100g,
            protein_100g: self.protein_100g,
            fat_100g: self.fat_100g,
            min: bound(self.min),
            max: bound(self.max),
            mandatory: bound(self.mandatory),
            indivisible: bound(self.indivisible),
        }
    }

    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{}: C:{} P:{} F:{} /100g, min:{:?} max:{:?} mandatory:{:?} step:{:?}",
            self.name,
            self.carbo_100g,
            self.protein_100g,
            self.fat_100g,
            self.min,
            self.max,
            self.mandatory,
            self.indivisible
        )
    }
}
