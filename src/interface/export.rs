use std::path::Path;

use crate::error::Result;
use crate::models::{MacroTarget, Output};

/// Write the result rows plus a TOTAL row to a CSV file.
pub fn write_output_csv(output: &Output, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["name", "weight", "carbo", "protein", "fat", "kcal"])?;

    for row in &output.ingredients {
        wtr.write_record([
            row.name.clone(),
            format!("{:.1}", row.weight),
            format!("{:.1}", row.carbo),
            format!("{:.1}", row.protein),
            format!("{:.1}", row.fat),
            format!("{:.0}", row.kcal),
        ])?;
    }

    wtr.write_record([
        "TOTAL".to_string(),
        format!("{:.1}", output.total_weight()),
        format!("{:.1}", output.total.carbo),
        format!("{:.1}", output.total.protein),
        format!("{:.1}", output.total.fat),
        format!("{:.0}", output.total.kcal),
    ])?;

    wtr.flush()?;
    Ok(())
}

/// Serialize the meal target and its result as pretty JSON.
pub fn output_json(output: &Output, target: &MacroTarget) -> Result<String> {
    let json = serde_json::json!({
        "meal": target,
        "result": output,
    });
    Ok(serde_json::to_string_pretty(&json)?)
}
