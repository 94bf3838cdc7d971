use super::chain_graph::{build_chain_graph, maximal_cliques};
use super::problem::{LinearExpr, Problem, Sense, Solution};
use super::Solver;
use crate::itemsets::Itemset;
use crate::profile::DatasetStats;
use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// Assembles the knapsack/chain MILP (§4.4) over `itemsets`: one binary
/// variable `x_T` per itemset, one `y_a` per item appearing in any of
/// them, linkage constraints `y_a >= x_T`, a capacity constraint
/// `Σ y_a <= capacity`, and (when `chain_constraints`) a `Σ x_T <= 1`
/// constraint per maximal clique of the comparability graph over
/// `itemsets`.
pub fn build_shatter_problem(itemsets: &[Itemset], capacity: usize, chain_constraints: bool) -> Problem {
    let mut problem = Problem::new();
    let item_vars: Vec<usize> = itemsets.iter().map(|_| problem.add_variable()).collect();
    for &v in &item_vars {
        problem.add_objective_term(v, 1.0);
    }

    let mut item_to_var: HashMap<u32, usize> = HashMap::new();
    for itemset in itemsets {
        for &item in itemset.items() {
            item_to_var.entry(item).or_insert_with(|| problem.add_variable());
        }
    }

    for (itemset, &x_var) in itemsets.iter().zip(&item_vars) {
        for &item in itemset.items() {
            let y_var = item_to_var[&item];
            let expr = LinearExpr::new().term(x_var, -1.0).term(y_var, 1.0);
            problem.add_constraint(expr, Sense::Ge, 0.0);
        }
    }

    let mut capacity_expr = LinearExpr::new();
    for &y_var in item_to_var.values() {
        capacity_expr = capacity_expr.term(y_var, 1.0);
    }
    problem.add_constraint(capacity_expr, Sense::Le, capacity as f64);

    if chain_constraints {
        let graph = build_chain_graph(itemsets);
        for clique in maximal_cliques(&graph) {
            let mut expr = LinearExpr::new();
            for node in clique {
                expr = expr.term(item_vars[node.index()], 1.0);
            }
            problem.add_constraint(expr, Sense::Le, 1.0);
        }
    }

    problem
}

/// `vcdim = ⌊log2 U⌋ + 1`, capped by `⌊log2 |S|⌋` (§4.4).
pub fn vcdim_bound(upper_bound: u64, num_itemsets: usize) -> u64 {
    if upper_bound == 0 || num_itemsets == 0 {
        return 0;
    }
    let raw = (upper_bound as f64).log2().floor() as u64 + 1;
    let cap = (num_itemsets as f64).log2().floor() as u64;
    raw.min(cap)
}

/// `log_shatter_bound = min(log U, vcdim * log(e*n/vcdim))`.
pub fn log_shatter_bound(upper_bound: u64, vcdim: u64, n: u64) -> f64 {
    if vcdim == 0 || upper_bound == 0 {
        return 0.0;
    }
    let log_u = (upper_bound as f64).ln();
    let vc = vcdim as f64;
    let alt = vc * ((std::f64::consts::E * n as f64) / vc).ln();
    log_u.min(alt)
}

/// Result of the empirical-VC-dimension loop: the VC dimension estimate and
/// the MILP upper bound it was derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmpiricalVcResult {
    pub vc_dim: u64,
    pub upper_bound: u64,
}

/// The empirical-VC loop of §4.4: sweeps capacities in decreasing
/// transaction length, stopping at the smallest length whose witness count
/// (transactions at least that long) can support the emitted VC dimension.
pub fn empirical_vc_loop<S: Solver>(
    itemsets: &[Itemset],
    stats: &DatasetStats,
    gap: f64,
    time_limit: Duration,
    solver: &S,
) -> Result<EmpiricalVcResult> {
    let mut universe: HashSet<u32> = HashSet::new();
    for itemset in itemsets {
        universe.extend(itemset.items().iter().copied());
    }
    let universe_size = universe.len();

    let mut lengths: Vec<usize> = stats.lengths.keys().copied().collect();
    lengths.sort_unstable_by(|a, b| b.cmp(a));

    let mut cumulative: u64 = 0;
    let mut last = EmpiricalVcResult {
        vc_dim: 0,
        upper_bound: 0,
    };
    for length in lengths {
        cumulative += stats.lengths[&length];
        let longer_equal = cumulative;
        let capacity = length.min(universe_size.saturating_sub(1));
        let problem = build_shatter_problem(itemsets, capacity, true);
        let solution: Solution = solver.solve(&problem, gap, time_limit)?;
        let upper_bound = solution.upper_bound();
        let vc_dim = vcdim_bound(upper_bound, itemsets.len());
        last = EmpiricalVcResult { vc_dim, upper_bound };
        if vc_dim <= longer_equal {
            return Ok(last);
        }
    }
    Ok(last)
}
