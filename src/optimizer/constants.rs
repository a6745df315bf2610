/// Maximum absolute deviation (percentage points) per macro for a result to
/// be accepted.
pub const TOLERANCE: f64 = 25.0;

/// Maximum coordinate-descent sweeps per attempt.
pub const MAX_REFINE_ITERATIONS: usize = 4000;

/// A move must lower the objective by more than this to be accepted.
pub const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// Density differences within this are treated as ties when ordering sweeps.
pub const PRIORITY_EPSILON: f64 = 1e-6;

/// Chance that a shuffled attempt nudges an ingredient by one step.
pub const JITTER_PROBABILITY: f64 = 0.3;

/// Quantization step when an ingredient declares none.
pub const DEFAULT_STEP: f64 = 1.0;

// ─────────────────────────────────────────────────────────────────────────────
// Attempt schedule (weights on squared protein/fat/carb error, L1 penalty)
// ─────────────────────────────────────────────────────────────────────────────

/// (shuffle, wp, wf, wc, l1) per attempt, in order.
pub const DEFAULT_ATTEMPTS: [(bool, f64, f64, f64, f64); 4] = [
    (false, 1.0, 0.25, 0.10, 1e-3),
    (true, 1.0, 0.35, 0.12, 2e-3),
    (true, 1.0, 0.30, 0.20, 2e-3),
    (true, 1.0, 0.30, 0.15, 5e-3),
];
