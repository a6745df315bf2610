pub mod config;
pub mod constants;
pub mod constraints;
pub mod evaluation;
pub mod greedy;
pub mod local_search;
pub mod report;
pub mod solver;

pub use config::{OptimizerConfig, QuadWeights, TryConfig};
pub use constants::*;
pub use constraints::{project_to_feasible, resolve_all, round_to_step, ResolvedConstraint};
pub use evaluation::{objective, pct_dev, totals};
pub use greedy::build_greedy;
pub use local_search::{priority_order, refine_local, Refined};
pub use report::{build_output, empty_infeasible, round1};
pub use solver::{optimize, optimize_with_config, optimize_with_rng};
