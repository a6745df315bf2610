use std::cmp::Ordering;

use crate::models::{Macro, MacroDensity, MacroTarget};
use crate::optimizer::constraints::{clamp, ResolvedConstraint};
use crate::optimizer::evaluation::totals;

/// Macro packing passes, in order.
const PACK_ORDER: [Macro; 3] = [Macro::Protein, Macro::Fat, Macro::Carbo];

/// Mandatory-only weight vector.
pub fn mandatory_baseline(constraints: &[ResolvedConstraint]) -> Vec<f64> {
    constraints.iter().map(|c| c.mandatory_base).collect()
}

/// Build an initial weight vector: mandatory grams first, then bounded
/// knapsack packing toward each macro's remaining shortfall.
///
/// Within a pass, ingredients with spare capacity are ranked by grams of the
/// macro per kcal; ties keep their position in `seed_order`.
pub fn build_greedy(
    seed_order: &[usize],
    target: &MacroTarget,
    densities: &[MacroDensity],
    constraints: &[ResolvedConstraint],
) -> Vec<f64> {
    let x0 = mandatory_baseline(constraints);
    let mut added = vec![0.0; constraints.len()];

    // Only shortfalls are filled; surplus from mandatory grams stays.
    let base = totals(&x0, densities);
    let need = |which: Macro| {
        let have = match which {
            Macro::Carbo => base.carbo,
            Macro::Protein => base.protein,
            Macro::Fat => base.fat,
        };
        (target.get(which) - have).max(0.0)
    };

    for which in PACK_ORDER {
        pack_toward(
            need(which),
            which,
            seed_order,
            densities,
            constraints,
            &mut added,
        );
    }

    x0.iter()
        .zip(&added)
        .zip(constraints)
        .map(|((base, add), c)| {
            let max = c.declared_max.unwrap_or(f64::INFINITY);
            c.project(clamp(base + add, 0.0, max))
        })
        .collect()
}

/// One bounded-knapsack pass for a single macro.
fn pack_toward(
    residual: f64,
    which: Macro,
    seed_order: &[usize],
    densities: &[MacroDensity],
    constraints: &[ResolvedConstraint],
    added: &mut [f64],
) {
    if residual <= 0.0 {
        return;
    }

    let mut ranked: Vec<usize> = seed_order
        .iter()
        .copied()
        .filter(|&i| constraints[i].has_capacity())
        .collect();
    // Stable sort: equal efficiencies keep seed order.
    ranked.sort_by(|&a, &b| {
        densities[b]
            .efficiency(which)
            .partial_cmp(&densities[a].efficiency(which))
            .unwrap_or(Ordering::Equal)
    });

    let mut remain = residual;
    for i in ranked {
        if remain <= 0.0 {
            break;
        }
        let per_gram = densities[i].get(which);
        if per_gram <= 0.0 {
            continue;
        }

        let step = constraints[i].move_step();
        let capacity = constraints[i].residual_hi - added[i];
        if capacity <= 0.0 {
            continue;
        }

        let gain_per_step = per_gram * step;
        let k = (remain / gain_per_step).floor().min((capacity / step).floor());
        if k <= 0.0 {
            continue;
        }

        added[i] += k * step;
        remain -= gain_per_step * k;
    }
}
