pub mod ingredient;
pub mod macros;
pub mod output;

pub use ingredient::IngredientData;
pub use macros::{kcal, Macro, MacroDensity, MacroTarget};
pub use output::{Deviation, IngredientRow, MacroTotals, Output};
