use crate::models::{
    kcal, Deviation, IngredientData, IngredientRow, MacroDensity, MacroTarget, MacroTotals, Output,
};
use crate::optimizer::evaluation::{pct_dev, totals};

/// Round to one decimal place, halves toward positive infinity.
#[inline]
pub fn round1(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Deviation of raw totals from the target, rounded to one decimal.
pub fn deviation(t: &MacroTotals, target: &MacroTarget) -> Deviation {
    Deviation {
        carbo: round1(pct_dev(t.carbo, target.carbo)),
        protein: round1(pct_dev(t.protein, target.protein)),
        fat: round1(pct_dev(t.fat, target.fat)),
    }
}

/// Assemble the rounded report for a weight vector.
///
/// Totals are computed from unrounded weights; rows whose rounded weight is
/// not positive are dropped afterwards.
pub fn build_output(
    weights: &[f64],
    ingredients: &[IngredientData],
    densities: &[MacroDensity],
    target: &MacroTarget,
) -> Output {
    let t = totals(weights, densities);

    let rows = weights
        .iter()
        .zip(ingredients)
        .zip(densities)
        .map(|((&w, ing), d)| {
            let (c, p, f) = (d.carbo * w, d.protein * w, d.fat * w);
            IngredientRow {
                name: ing.name.clone(),
                weight: round1(w),
                carbo: round1(c),
                protein: round1(p),
                fat: round1(f),
                kcal: kcal(c, p, f).round(),
            }
        })
        .filter(|row| row.weight > 0.0)
        .collect();

    Output {
        total: MacroTotals {
            carbo: round1(t.carbo),
            protein: round1(t.protein),
            fat: round1(t.fat),
            kcal: t.kcal.round(),
        },
        ingredients: rows,
        deviation: deviation(&t, target),
    }
}

/// All-zero report used when the constraints cannot be satisfied: every
/// ingredient listed at 0 g and +100% deviation on each macro.
pub fn empty_infeasible(ingredients: &[IngredientData]) -> Output {
    Output {
        total: MacroTotals::default(),
        ingredients: ingredients
            .iter()
            .map(|ing| IngredientRow {
                name: ing.name.clone(),
                weight: 0.0,
                carbo: 0.0,
                protein: 0.0,
                fat: 0.0,
                kcal: 0.0,
            })
            .collect(),
        deviation: Deviation {
            carbo: 100.0,
            protein: 100.0,
            fat: 100.0,
        },
    }
}
