use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{IngredientData, MacroTarget};
use crate::state::manager::Catalog;

/// On-disk catalog layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub meals: Vec<MacroTarget>,

    #[serde(default)]
    pub ingredients: Vec<IngredientData>,
}

/// Read a catalog JSON file without building the lookup maps.
pub fn read_catalog_file<P: AsRef<Path>>(path: P) -> Result<CatalogFile> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load a catalog from a JSON file.
///
/// Deduplicates by lowercase name (last occurrence wins).
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    Ok(Catalog::new(read_catalog_file(path)?))
}

/// Load a catalog, or start an empty one when the file does not exist yet.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    if path.as_ref().exists() {
        load_catalog(path)
    } else {
        Ok(Catalog::default())
    }
}

/// Save a catalog as pretty JSON, entries sorted by name.
pub fn save_catalog<P: AsRef<Path>>(path: P, catalog: &Catalog) -> Result<()> {
    let json = serde_json::to_string_pretty(&catalog.to_file())?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_and_save_roundtrip() {
        let json = r#"{
            "meals": [{"name": "Lunch", "carbo": 60, "protein": 30, "fat": 15}],
            "ingredients": [
                {"name": "Olive oil", "carbo100g": 0, "protein100g": 0, "fat100g": 100, "max": 10}
            ]
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.meal_count(), 1);
        assert_eq!(catalog.get_ingredient("olive oil").unwrap().max, Some(10.0));

        let out_file = NamedTempFile::new().unwrap();
        save_catalog(out_file.path(), &catalog).unwrap();

        let reloaded = load_catalog(out_file.path()).unwrap();
        assert_eq!(reloaded.get_meal("lunch").unwrap().protein, 30.0);
        assert_eq!(reloaded.ingredient_count(), 1);
    }

    #[test]
    fn test_deduplication() {
        let json = r#"{
            "ingredients": [
                {"name": "Rice", "carbo100g": 28, "protein100g": 2.7, "fat100g": 0.3},
                {"name": "rice", "carbo100g": 77, "protein100g": 7, "fat100g": 0.6}
            ]
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.ingredient_count(), 1);
        assert_eq!(catalog.meal_count(), 0);
        // Last occurrence wins
        assert_eq!(catalog.get_ingredient("RICE").unwrap().carbo_100g, 77.0);
    }

    #[test]
    fn test_missing_file_gives_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = load_or_default(dir.path().join("absent.json")).unwrap();
        assert!(catalog.is_empty());
    }
}
