use crate::models::IngredientData;
use crate::optimizer::constants::DEFAULT_STEP;

/// Clamp without panicking when `lo > hi` (the lower bound wins).
#[inline]
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    value.min(hi).max(lo)
}

/// Round to the nearest multiple of `step`. Non-positive steps leave the
/// value untouched.
#[inline]
pub fn round_to_step(value: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return value;
    }
    (value / step).round() * step
}

/// Snap `y` onto the grid `lo + k * step` inside `[lo, hi]`.
pub fn project_to_feasible(y: f64, step: f64, lo: f64, hi: f64) -> f64 {
    let mut v = y;
    if step > 0.0 {
        v = round_to_step(v, step);
    }
    v = clamp(v, lo, hi);
    if step > 0.0 {
        let k = ((v - lo) / step).round();
        v = clamp(lo + k * step, lo, hi);
    }
    v
}

/// Feasible range of one ingredient, split into a fixed mandatory baseline and
/// an adjustable residual on top of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedConstraint {
    pub mandatory_base: f64,
    /// Lowest residual grams, step-aligned.
    pub residual_lo: f64,
    /// Highest residual grams, step-aligned; infinite when no max is declared.
    pub residual_hi: f64,
    pub step: f64,
    /// The raw declared max, kept for the infeasibility check.
    pub declared_max: Option<f64>,
}

impl ResolvedConstraint {
    pub fn resolve(ingredient: &IngredientData) -> Self {
        let step = match ingredient.indivisible {
            Some(s) if s > 0.0 => s,
            _ => DEFAULT_STEP,
        };
        let mandatory_base = ingredient.mandatory.unwrap_or(0.0).max(0.0);
        let min_base = ingredient.min.unwrap_or(0.0).max(0.0);
        let max_base = ingredient.max.unwrap_or(f64::INFINITY).max(0.0);

        let mut residual_lo = (min_base - mandatory_base).max(0.0);
        let mut residual_hi = (max_base - mandatory_base).max(0.0);

        if step > 0.0 {
            residual_lo = round_to_step(residual_lo, step);
            residual_hi = (residual_hi / step).floor() * step;
            residual_hi = residual_hi.max(residual_lo);
        }

        Self {
            mandatory_base,
            residual_lo,
            residual_hi,
            step,
            declared_max: ingredient.max,
        }
    }

    /// True when the mandatory floor alone already exceeds the declared max.
    pub fn is_infeasible(&self) -> bool {
        self.declared_max
            .map(|max| max < self.mandatory_base)
            .unwrap_or(false)
    }

    /// Grams moved per packing unit or local-search move (never below 1 g).
    #[inline]
    pub fn move_step(&self) -> f64 {
        self.step.max(1.0)
    }

    /// Whether the ingredient can take any grams beyond its mandatory base.
    #[inline]
    pub fn has_capacity(&self) -> bool {
        self.residual_hi > 0.0
    }

    #[inline]
    pub fn residual_in_range(&self, residual: f64) -> bool {
        residual >= self.residual_lo && residual <= self.residual_hi
    }

    /// Lowest and highest total grams.
    pub fn weight_bounds(&self) -> (f64, f64) {
        (
            self.mandatory_base + self.residual_lo,
            self.mandatory_base + self.residual_hi,
        )
    }

    /// Project a total weight onto the feasible, step-aligned range.
    pub fn project(&self, weight: f64) -> f64 {
        project_to_feasible(
            weight - self.mandatory_base,
            self.step,
            self.residual_lo,
            self.residual_hi,
        ) + self.mandatory_base
    }
}

/// Resolve every ingredient in order.
pub fn resolve_all(ingredients: &[IngredientData]) -> Vec<ResolvedConstraint> {
    ingredients.iter().map(ResolvedConstraint::resolve).collect()
}

/// Index of the first ingredient whose mandatory grams exceed its max.
pub fn first_infeasible(constraints: &[ResolvedConstraint]) -> Option<usize> {
    constraints.iter().position(ResolvedConstraint::is_infeasible)
}
