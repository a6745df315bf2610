use crate::models::{MacroDensity, MacroTarget};
use crate::optimizer::config::TryConfig;
use crate::optimizer::constants::{IMPROVEMENT_EPSILON, PRIORITY_EPSILON};
use crate::optimizer::constraints::ResolvedConstraint;
use crate::optimizer::evaluation::score;

/// Result of a coordinate-descent run.
#[derive(Debug, Clone)]
pub struct Refined {
    pub weights: Vec<f64>,
    pub objective: f64,
    /// Sweeps performed, including the final one without improvement.
    pub sweeps: usize,
}

/// Visit order for refinement: protein-dense first, then fat, then carbs.
///
/// Densities are bucketed to `PRIORITY_EPSILON` so near-equal values tie and
/// keep their original relative order.
pub fn priority_order(densities: &[MacroDensity]) -> Vec<usize> {
    let bucket = |v: f64| (v / PRIORITY_EPSILON).round() as i64;
    let mut order: Vec<usize> = (0..densities.len()).collect();
    order.sort_by_key(|&i| {
        let d = &densities[i];
        (
            std::cmp::Reverse(bucket(d.protein)),
            std::cmp::Reverse(bucket(d.fat)),
            std::cmp::Reverse(bucket(d.carbo)),
        )
    });
    order
}

/// Hill-climb one ingredient at a time by a single step in either direction,
/// keeping only moves that strictly lower the objective.
///
/// Stops after a sweep with no accepted move or `max_iterations` sweeps, then
/// projects every weight back onto its step grid.
pub fn refine_local(
    start: &[f64],
    target: &MacroTarget,
    densities: &[MacroDensity],
    constraints: &[ResolvedConstraint],
    cfg: &TryConfig,
    max_iterations: usize,
) -> Refined {
    let mut x = start.to_vec();
    let mut best = score(&x, densities, target, cfg);
    let order = priority_order(densities);
    let mut sweeps = 0;

    for _ in 0..max_iterations {
        sweeps += 1;
        let mut improved = false;

        for &i in &order {
            let c = &constraints[i];
            let step = c.move_step();
            for dir in [1.0, -1.0] {
                let candidate = x[i] + dir * step;
                if !c.residual_in_range(candidate - c.mandatory_base) {
                    continue;
                }

                let old = x[i];
                x[i] = candidate;
                let obj = score(&x, densities, target, cfg);
                if obj + IMPROVEMENT_EPSILON < best {
                    best = obj;
                    improved = true;
                } else {
                    x[i] = old;
                }
            }
        }

        if !improved {
            break;
        }
    }

    for (w, c) in x.iter_mut().zip(constraints) {
        *w = c.project(*w);
    }

    Refined {
        objective: score(&x, densities, target, cfg),
        weights: x,
        sweeps,
    }
}
