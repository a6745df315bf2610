use serde::{Deserialize, Serialize};

use crate::optimizer::constants::{
    DEFAULT_ATTEMPTS, JITTER_PROBABILITY, MAX_REFINE_ITERATIONS, TOLERANCE,
};

/// Weights on the squared per-macro error terms of the objective.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadWeights {
    pub protein: f64,
    pub fat: f64,
    pub carbo: f64,
}

/// One attempt of the multi-try schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TryConfig {
    /// Shuffle the greedy seed order and jitter the packed vector.
    pub shuffle: bool,
    pub weights: QuadWeights,
    /// Penalty per gram used.
    pub l1: f64,
}

impl TryConfig {
    pub fn new(shuffle: bool, wp: f64, wf: f64, wc: f64, l1: f64) -> Self {
        Self {
            shuffle,
            weights: QuadWeights {
                protein: wp,
                fat: wf,
                carbo: wc,
            },
            l1,
        }
    }
}

/// Runtime-configurable optimizer policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Maximum absolute percentage deviation per macro.
    pub tolerance: f64,
    /// Attempts, run in order until one lands within tolerance.
    pub attempts: Vec<TryConfig>,
    pub max_refine_iterations: usize,
    pub jitter_probability: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            tolerance: TOLERANCE,
            attempts: DEFAULT_ATTEMPTS
                .iter()
                .map(|&(shuffle, wp, wf, wc, l1)| TryConfig::new(shuffle, wp, wf, wc, l1))
                .collect(),
            max_refine_iterations: MAX_REFINE_ITERATIONS,
            jitter_probability: JITTER_PROBABILITY,
        }
    }
}

impl OptimizerConfig {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_refine_iterations(mut self, iterations: usize) -> Self {
        self.max_refine_iterations = iterations;
        self
    }

    pub fn with_attempts(mut self, attempts: Vec<TryConfig>) -> Self {
        self.attempts = attempts;
        self
    }
}
