use crate::models::{kcal, MacroDensity, MacroTarget, MacroTotals};
use crate::optimizer::config::TryConfig;

/// Aggregate macros of a weight vector against per-gram densities.
///
/// Extra entries on either side are ignored.
pub fn totals(weights: &[f64], densities: &[MacroDensity]) -> MacroTotals {
    let (mut c, mut p, mut f) = (0.0, 0.0, 0.0);
    for (w, d) in weights.iter().zip(densities) {
        c += d.carbo * w;
        p += d.protein * w;
        f += d.fat * w;
    }
    MacroTotals {
        carbo: c,
        protein: p,
        fat: f,
        kcal: kcal(c, p, f),
    }
}

/// Weighted squared macro error plus an L1 penalty on grams used.
pub fn objective(totals: &MacroTotals, target: &MacroTarget, weights: &[f64], cfg: &TryConfig) -> f64 {
    let dp = totals.protein - target.protein;
    let df = totals.fat - target.fat;
    let dc = totals.carbo - target.carbo;
    let quad = cfg.weights.protein * dp * dp + cfg.weights.fat * df * df + cfg.weights.carbo * dc * dc;
    let l1 = cfg.l1 * weights.iter().map(|w| w.abs()).sum::<f64>();
    quad + l1
}

/// Percentage deviation of `total` from `target`.
///
/// A zero target yields 0 when the total is also zero and ±100 otherwise.
pub fn pct_dev(total: f64, target: f64) -> f64 {
    if target == 0.0 {
        if total == 0.0 {
            return 0.0;
        }
        return if total > 0.0 { 100.0 } else { -100.0 };
    }
    (total - target) / target * 100.0
}

/// Objective of `weights` evaluated from scratch.
pub fn score(weights: &[f64], densities: &[MacroDensity], target: &MacroTarget, cfg: &TryConfig) -> f64 {
    objective(&totals(weights, densities), target, weights, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn densities() -> Vec<MacroDensity> {
        vec![
            MacroDensity::from_per_100g(0.0, 30.0, 5.0),
            MacroDensity::from_per_100g(28.0, 2.7, 0.3),
        ]
    }

    #[test]
    fn test_totals_dot_product() {
        let t = totals(&[100.0, 200.0], &densities());
        assert_float_absolute_eq!(t.carbo, 56.0, 1e-9);
        assert_float_absolute_eq!(t.protein, 35.4, 1e-9);
        assert_float_absolute_eq!(t.fat, 5.6, 1e-9);
        assert_float_absolute_eq!(t.kcal, 4.0 * 56.0 + 4.0 * 35.4 + 9.0 * 5.6, 1e-9);
    }

    #[test]
    fn test_totals_ignores_length_mismatch() {
        let t = totals(&[100.0], &densities());
        assert_float_absolute_eq!(t.protein, 30.0, 1e-9);
    }

    #[test]
    fn test_pct_dev_conventions() {
        assert_eq!(pct_dev(0.0, 0.0), 0.0);
        assert_eq!(pct_dev(3.0, 0.0), 100.0);
        assert_eq!(pct_dev(-3.0, 0.0), -100.0);
        assert_float_absolute_eq!(pct_dev(15.0, 20.0), -25.0, 1e-12);
        assert_float_absolute_eq!(pct_dev(12.0, 10.0), 20.0, 1e-12);
    }

    #[test]
    fn test_objective_weights_and_penalty() {
        let target = MacroTarget::new("T", 10.0, 10.0, 10.0);
        let t = MacroTotals {
            carbo: 12.0,
            protein: 7.0,
            fat: 10.0,
            kcal: 0.0,
        };
        let cfg = TryConfig::new(false, 1.0, 0.5, 0.25, 0.01);
        // 1.0 * 9 + 0.5 * 0 + 0.25 * 4 + 0.01 * 300
        let obj = objective(&t, &target, &[100.0, 200.0], &cfg);
        assert_float_absolute_eq!(obj, 13.0, 1e-9);
    }

    #[test]
    fn test_objective_zero_at_target_without_penalty() {
        let target = MacroTarget::new("T", 56.0, 35.4, 5.6);
        let cfg = TryConfig::new(false, 1.0, 1.0, 1.0, 0.0);
        assert_float_absolute_eq!(score(&[100.0, 200.0], &densities(), &target, &cfg), 0.0, 1e-9);
    }
}
