use serde::{Deserialize, Serialize};

/// kcal per gram of carbohydrate.
pub const KCAL_PER_GRAM_CARBO: f64 = 4.0;

/// kcal per gram of protein.
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;

/// kcal per gram of fat.
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Calories from grams of carbohydrate, protein and fat (4/4/9).
#[inline]
pub fn kcal(carbo: f64, protein: f64, fat: f64) -> f64 {
    KCAL_PER_GRAM_CARBO * carbo + KCAL_PER_GRAM_PROTEIN * protein + KCAL_PER_GRAM_FAT * fat
}

/// One of the three tracked macronutrients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Macro {
    Carbo,
    Protein,
    Fat,
}

/// A meal's macro goal in grams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroTarget {
    pub name: String,
    pub carbo: f64,
    pub protein: f64,
    pub fat: f64,
}

impl MacroTarget {
    pub fn new(name: impl Into<String>, carbo: f64, protein: f64, fat: f64) -> Self {
        Self {
            name: name.into(),
            carbo,
            protein,
            fat,
        }
    }

    /// Target grams for a single macro.
    pub fn get(&self, which: Macro) -> f64 {
        match which {
            Macro::Carbo => self.carbo,
            Macro::Protein => self.protein,
            Macro::Fat => self.fat,
        }
    }

    /// Calories implied by the target grams.
    pub fn kcal(&self) -> f64 {
        kcal(self.carbo, self.protein, self.fat)
    }

    /// Returns a description of the first problem found, if any.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is required".to_string());
        }
        for (label, value) in [
            ("carbo", self.carbo),
            ("protein", self.protein),
            ("fat", self.fat),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a non-negative number, got {}", label, value));
            }
        }
        Ok(())
    }

    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Grams of each macro per gram of ingredient.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MacroDensity {
    pub carbo: f64,
    pub protein: f64,
    pub fat: f64,
}

impl MacroDensity {
    /// Convert per-100g composition into per-gram coefficients.
    pub fn from_per_100g(carbo_100g: f64, protein_100g: f64, fat_100g: f64) -> Self {
        Self {
            carbo: carbo_100g / 100.0,
            protein: protein_100g / 100.0,
            fat: fat_100g / 100.0,
        }
    }

    pub fn get(&self, which: Macro) -> f64 {
        match which {
            Macro::Carbo => self.carbo,
            Macro::Protein => self.protein,
            Macro::Fat => self.fat,
        }
    }

    /// Calories per gram of ingredient.
    #[inline]
    pub fn kcal(&self) -> f64 {
        kcal(self.carbo, self.protein, self.fat)
    }

    /// Grams of `which` per kcal, or negative infinity when the ingredient
    /// carries none of it.
    pub fn efficiency(&self, which: Macro) -> f64 {
        let amount = self.get(which);
        if amount <= 0.0 {
            return f64::NEG_INFINITY;
        }
        amount / self.kcal().max(1e-9)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kcal_uses_atwater_factors() {
        assert!((kcal(10.0, 10.0, 10.0) - 170.0).abs() < 1e-9);
        assert_eq!(kcal(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_density_from_per_100g() {
        let d = MacroDensity::from_per_100g(28.0, 2.7, 0.3);
        assert!((d.carbo - 0.28).abs() < 1e-12);
        assert!((d.protein - 0.027).abs() < 1e-12);
        assert!((d.fat - 0.003).abs() < 1e-12);
    }

    #[test]
    fn test_efficiency_missing_macro() {
        let oil = MacroDensity::from_per_100g(0.0, 0.0, 100.0);
        assert_eq!(oil.efficiency(Macro::Protein), f64::NEG_INFINITY);
        assert!((oil.efficiency(Macro::Fat) - 1.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_target_validate() {
        assert!(MacroTarget::new("Lunch", 60.0, 30.0, 15.0).validate().is_ok());
        assert!(MacroTarget::new("  ", 60.0, 30.0, 15.0).validate().is_err());
        assert!(MacroTarget::new("Lunch", -1.0, 30.0, 15.0).validate().is_err());
        assert!(MacroTarget::new("Lunch", 1.0, f64::NAN, 15.0).validate().is_err());
    }
}
