//! The knapsack/chain integer program used by the VC method to upper-bound
//! a shatter coefficient, plus the drivers that solve it.

mod brute_force;
mod builder;
mod chain_graph;
mod highs_solver;
mod problem;

pub use brute_force::BruteForceSolver;
pub use builder::{build_shatter_problem, empirical_vc_loop, log_shatter_bound, vcdim_bound, EmpiricalVcResult};
pub use chain_graph::{build_chain_graph, maximal_cliques};
pub use highs_solver::HighsSolver;
pub use problem::{Constraint, LinearExpr, Problem, Sense, Solution};

use anyhow::Result;
use std::time::Duration;

/// Solves a MILP and reports `(status, best_objective, relative_gap)`.
///
/// Implementations may return before proving optimality; the driver always
/// treats `relative_gap` as the true bound on suboptimality (§6).
pub trait Solver {
    fn solve(&self, problem: &Problem, gap: f64, time_limit: Duration) -> Result<Solution>;
}
