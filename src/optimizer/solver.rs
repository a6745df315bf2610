use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::OptimizeError;
use crate::models::{IngredientData, MacroDensity, MacroTarget, Output};
use crate::optimizer::config::{OptimizerConfig, TryConfig};
use crate::optimizer::constraints::{clamp, first_infeasible, resolve_all, ResolvedConstraint};
use crate::optimizer::evaluation::score;
use crate::optimizer::greedy::build_greedy;
use crate::optimizer::local_search::refine_local;
use crate::optimizer::report::{build_output, empty_infeasible};

/// Summary of one attempt of the multi-try schedule.
#[derive(Debug, Clone)]
pub(crate) struct AttemptResult {
    pub attempt: usize,
    pub weights: Vec<f64>,
    pub objective: f64,
    pub sweeps: usize,
    pub output: Output,
}

/// Per-call problem data shared by every attempt.
struct Problem<'a> {
    target: &'a MacroTarget,
    ingredients: &'a [IngredientData],
    densities: Vec<MacroDensity>,
    constraints: Vec<ResolvedConstraint>,
}

impl<'a> Problem<'a> {
    fn new(target: &'a MacroTarget, ingredients: &'a [IngredientData]) -> Self {
        Self {
            target,
            ingredients,
            densities: ingredients.iter().map(IngredientData::density).collect(),
            constraints: resolve_all(ingredients),
        }
    }

    fn len(&self) -> usize {
        self.ingredients.len()
    }

    /// Pack, optionally jitter, refine, then score and report.
    fn run_attempt<R: Rng + ?Sized>(
        &self,
        attempt: usize,
        cfg: &TryConfig,
        config: &OptimizerConfig,
        rng: &mut R,
    ) -> AttemptResult {
        let mut seed_order: Vec<usize> = (0..self.len()).collect();
        if cfg.shuffle {
            seed_order.shuffle(rng);
        }

        let mut packed = build_greedy(&seed_order, self.target, &self.densities, &self.constraints);

        if cfg.shuffle {
            self.jitter(&mut packed, config.jitter_probability, rng);
        }

        let refined = refine_local(
            &packed,
            self.target,
            &self.densities,
            &self.constraints,
            cfg,
            config.max_refine_iterations,
        );

        let objective = score(&refined.weights, &self.densities, self.target, cfg);
        let output = build_output(&refined.weights, self.ingredients, &self.densities, self.target);

        AttemptResult {
            attempt,
            weights: refined.weights,
            objective,
            sweeps: refined.sweeps,
            output,
        }
    }

    /// Nudge each adjustable ingredient by one step with probability `p`,
    /// in a random direction, keeping it on its feasible grid.
    fn jitter<R: Rng + ?Sized>(&self, weights: &mut [f64], p: f64, rng: &mut R) {
        let p = if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 };
        for (w, c) in weights.iter_mut().zip(&self.constraints) {
            if !c.has_capacity() {
                continue;
            }
            let step = c.move_step();
            let fire = rng.gen_bool(p);
            let down = rng.gen_bool(0.5);
            if !fire {
                continue;
            }
            let (lo, hi) = c.weight_bounds();
            let moved = clamp(*w + if down { -step } else { step }, lo, hi);
            *w = c.project(moved);
        }
    }
}

/// Size every ingredient to approach `target` using the default policy and
/// thread-local randomness.
pub fn optimize(target: &MacroTarget, ingredients: &[IngredientData]) -> Result<Output, OptimizeError> {
    optimize_with_config(target, ingredients, &OptimizerConfig::default())
}

/// Like [`optimize`] with an explicit policy.
pub fn optimize_with_config(
    target: &MacroTarget,
    ingredients: &[IngredientData],
    config: &OptimizerConfig,
) -> Result<Output, OptimizeError> {
    optimize_with_rng(target, ingredients, config, &mut rand::thread_rng())
}

/// Run the multi-try schedule with an injected random source.
///
/// Attempts run in order; the first whose deviations are all within
/// `config.tolerance` is returned and later attempts are skipped. When none
/// qualifies, the error carries the deviations of the lowest-objective
/// attempt.
pub fn optimize_with_rng<R: Rng + ?Sized>(
    target: &MacroTarget,
    ingredients: &[IngredientData],
    config: &OptimizerConfig,
    rng: &mut R,
) -> Result<Output, OptimizeError> {
    target.validate().map_err(OptimizeError::InvalidTarget)?;
    for ing in ingredients {
        ing.validate().map_err(OptimizeError::InvalidIngredient)?;
    }
    if config.attempts.is_empty() {
        return Err(OptimizeError::NoAttempts);
    }

    let problem = Problem::new(target, ingredients);
    for ing in ingredients {
        debug!("ingredient {}", ing.debug_string());
    }

    if let Some(i) = first_infeasible(&problem.constraints) {
        let ing = &ingredients[i];
        warn!(
            ingredient = %ing.name,
            mandatory = problem.constraints[i].mandatory_base,
            "mandatory grams exceed available max"
        );
        return Err(OptimizeError::Infeasible {
            ingredient: ing.name.clone(),
            mandatory: problem.constraints[i].mandatory_base,
            max: ing.max.unwrap_or(f64::INFINITY),
            output: empty_infeasible(ingredients),
        });
    }

    let mut best: Option<AttemptResult> = None;

    for (attempt, cfg) in config.attempts.iter().enumerate() {
        let result = problem.run_attempt(attempt + 1, cfg, config, rng);
        let d = result.output.deviation;

        debug!(
            attempt = result.attempt,
            shuffle = cfg.shuffle,
            objective = result.objective,
            sweeps = result.sweeps,
            carbo = d.carbo,
            protein = d.protein,
            fat = d.fat,
            worst = d.max_abs(),
            "attempt finished"
        );

        let within = d.within(config.tolerance);

        if within {
            info!(
                meal = %target.name,
                attempt = result.attempt,
                "macros met within {}%",
                config.tolerance
            );
            return Ok(result.output);
        }

        if best.as_ref().is_none_or(|b| result.objective < b.objective) {
            best = Some(result);
        }
    }

    match best {
        Some(b) => {
            warn!(
                meal = %target.name,
                best_attempt = b.attempt,
                "no attempt met macros within {}%",
                config.tolerance
            );
            Err(OptimizeError::ToleranceExceeded {
                deviation: b.output.deviation,
                tolerance: config.tolerance,
            })
        }
        None => Err(OptimizeError::NoAttempts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    fn lunch() -> (MacroTarget, Vec<IngredientData>) {
        (
            MacroTarget::new("Lunch", 60.0, 30.0, 15.0),
            vec![
                IngredientData::new("Chicken breast", 0.0, 30.0, 5.0),
                IngredientData::new("Cooked rice", 28.0, 2.7, 0.3),
                IngredientData::new("Olive oil", 0.0, 0.0, 100.0).with_max(10.0),
            ],
        )
    }

    #[test]
    fn test_first_attempt_is_deterministic() {
        let (target, ings) = lunch();
        let config = OptimizerConfig::default();
        let problem = Problem::new(&target, &ings);
        let mut rng_a = StdRng::seed_from_u64(1);
        let mut rng_b = StdRng::seed_from_u64(2);
        let a = problem.run_attempt(1, &config.attempts[0], &config, &mut rng_a);
        let b = problem.run_attempt(1, &config.attempts[0], &config, &mut rng_b);
        assert_eq!(a.weights, b.weights);
        assert_eq!(a.output, b.output);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let (target, ings) = lunch();
        let config = OptimizerConfig::default().with_tolerance(0.0);
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);
        let a = optimize_with_rng(&target, &ings, &config, &mut rng_a);
        let b = optimize_with_rng(&target, &ings, &config, &mut rng_b);
        assert_eq!(format!("{:?}", a), format!("{:?}", b));
    }

    #[test]
    fn test_jitter_stays_on_grid() {
        let target = MacroTarget::new("T", 50.0, 30.0, 10.0);
        let ings = vec![
            IngredientData::new("Scoop", 5.0, 80.0, 2.0)
                .with_indivisible(30.0)
                .with_mandatory(5.0)
                .with_max(125.0),
            IngredientData::new("Fixed", 10.0, 10.0, 10.0).with_max(0.0),
        ];
        let problem = Problem::new(&target, &ings);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let mut w = vec![65.0, 0.0];
            problem.jitter(&mut w, 1.0, &mut rng);
            assert!(w[0] == 35.0 || w[0] == 95.0, "unexpected weight {}", w[0]);
            assert_eq!(w[1], 0.0);
        }
    }

    #[test]
    fn test_exhausted_run_reports_lowest_objective_attempt() {
        let (target, ings) = lunch();
        let starved = TryConfig::new(false, 1.0, 0.25, 0.10, 50.0);
        let normal = TryConfig::new(false, 1.0, 0.25, 0.10, 1e-3);
        let config = OptimizerConfig::default()
            .with_tolerance(0.0)
            .with_attempts(vec![starved, normal, starved]);

        let problem = Problem::new(&target, &ings);
        let alone = problem.run_attempt(2, &normal, &config, &mut StdRng::seed_from_u64(0));
        assert!(!alone.output.deviation.within(0.0));

        let err = optimize_with_rng(&target, &ings, &config, &mut StdRng::seed_from_u64(0));
        match err {
            Err(OptimizeError::ToleranceExceeded { deviation, tolerance }) => {
                assert_eq!(tolerance, 0.0);
                assert_eq!(deviation, alone.output.deviation);
                assert_ne!(deviation.carbo, -100.0);
            }
            other => panic!("expected tolerance error, got {:?}", other),
        }
    }

    #[test]
    fn test_first_attempt_within_tolerance_stops_the_run() {
        let (target, ings) = lunch();
        let config = OptimizerConfig::default();
        let problem = Problem::new(&target, &ings);
        let first = problem.run_attempt(1, &config.attempts[0], &config, &mut StdRng::seed_from_u64(0));
        assert!(first.output.deviation.within(config.tolerance));

        let mut rng = StdRng::seed_from_u64(11);
        let out = optimize_with_rng(&target, &ings, &config, &mut rng).unwrap();
        assert_eq!(out, first.output);

        // The shuffled attempts never ran, so no randomness was consumed.
        let mut fresh = StdRng::seed_from_u64(11);
        assert_eq!(rng.next_u64(), fresh.next_u64());
    }

    #[test]
    fn test_empty_attempt_schedule_is_rejected() {
        let (target, ings) = lunch();
        let config = OptimizerConfig::default().with_attempts(Vec::new());
        let err = optimize_with_rng(&target, &ings, &config, &mut StdRng::seed_from_u64(0));
        assert!(matches!(err, Err(OptimizeError::NoAttempts)));
    }

    #[test]
    fn test_invalid_ingredient_is_rejected() {
        let (target, mut ings) = lunch();
        ings[1].carbo_100g = -4.0;
        let err = optimize_with_rng(
            &target,
            &ings,
            &OptimizerConfig::default(),
            &mut StdRng::seed_from_u64(0),
        );
        assert!(matches!(err, Err(OptimizeError::InvalidIngredient(_))));
    }

    #[test]
    fn test_zero_target_with_no_ingredients_is_met() {
        let target = MacroTarget::new("Fast", 0.0, 0.0, 0.0);
        let out = optimize_with_rng(
            &target,
            &[],
            &OptimizerConfig::default(),
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap();
        assert!(out.ingredients.is_empty());
        assert_eq!(out.deviation.max_abs(), 0.0);
    }
}
