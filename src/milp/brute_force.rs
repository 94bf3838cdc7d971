use super::problem::{Problem, Sense, Solution};
use super::Solver;
use anyhow::{anyhow, Result};
use std::time::Duration;

/// Exhaustively enumerates all `2^k` binary assignments and returns the
/// true optimum with `relative_gap = 0.0`. Used by the test suite for small
/// instances (§9 "External solver coupling") where bringing in HiGHS would
/// be overkill.
pub struct BruteForceSolver {
    max_variables: usize,
}

impl BruteForceSolver {
    /// `max_variables` bounds the instance size this solver will accept;
    /// enumeration is `O(2^max_variables)`.
    pub fn new(max_variables: usize) -> Self {
        Self { max_variables }
    }
}

fn satisfies(problem: &Problem, assignment: &[bool]) -> bool {
    problem.constraints.iter().all(|c| {
        let value: f64 = c
            .expr
            .terms
            .iter()
            .map(|&(var, coef)| if assignment[var] { coef } else { 0.0 })
            .sum();
        match c.sense {
            Sense::Ge => value >= c.rhs - 1e-9,
            Sense::Le => value <= c.rhs + 1e-9,
        }
    })
}

fn objective_value(problem: &Problem, assignment: &[bool]) -> f64 {
    problem
        .objective
        .terms
        .iter()
        .map(|&(var, coef)| if assignment[var] { coef } else { 0.0 })
        .sum()
}

impl Solver for BruteForceSolver {
    fn solve(&self, problem: &Problem, _gap: f64, _time_limit: Duration) -> Result<Solution> {
        if problem.num_variables > self.max_variables {
            return Err(anyhow!(
                "brute-force solver: {} variables exceeds the configured ceiling of {}",
                problem.num_variables,
                self.max_variables
            ));
        }

        let mut best = 0.0_f64;
        let mut assignment = vec![false; problem.num_variables];
        for bits in 0..(1u64 << problem.num_variables) {
            for (i, slot) in assignment.iter_mut().enumerate() {
                *slot = (bits >> i) & 1 == 1;
            }
            if satisfies(problem, &assignment) {
                best = best.max(objective_value(problem, &assignment));
            }
        }

        Ok(Solution {
            status: "optimal".to_string(),
            best_objective: best,
            relative_gap: 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milp::problem::LinearExpr;

    #[test]
    fn rejects_instances_above_the_ceiling() {
        let mut problem = Problem::new();
        for _ in 0..5 {
            problem.add_variable();
        }
        let solver = BruteForceSolver::new(3);
        assert!(solver
            .solve(&problem, 0.0, Duration::from_secs(1))
            .is_err());
    }

    #[test]
    fn finds_the_true_optimum_on_a_tiny_knapsack() {
        let mut problem = Problem::new();
        let a = problem.add_variable();
        let b = problem.add_variable();
        problem.add_objective_term(a, 1.0);
        problem.add_objective_term(b, 1.0);
        problem.add_constraint(
            LinearExpr::new().term(a, 1.0).term(b, 1.0),
            Sense::Le,
            1.0,
        );
        let solver = BruteForceSolver::new(10);
        let solution = solver.solve(&problem, 0.0, Duration::from_secs(1)).unwrap();
        assert_eq!(solution.best_objective, 1.0);
    }
}
