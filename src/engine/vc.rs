use super::split_confidence;
use crate::io::{to_collection, ItemsetSupport};
use crate::itemsets::{closed, maximal, negative_border, Itemset, ItemsetCollection};
use crate::milp::{build_shatter_problem, empirical_vc_loop, log_shatter_bound, vcdim_bound, Solver};
use crate::profile::DatasetStats;
use crate::stats::{eps_emp_vc, eps_shatter, eps_vc};
use anyhow::Result;
use std::time::Duration;

/// Tunables for the VC-dimension TFI engine (§4.7).
#[derive(Debug, Clone, Copy)]
pub struct VcParams {
    pub delta: f64,
    pub theta: f64,
    pub gap: f64,
    pub time_limit: Duration,
    pub use_additional_knowledge: bool,
}

/// The figures this engine writes to the CSV diagnostics trailer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VcDiagnostics {
    pub epsilon_1: f64,
    pub base_set: usize,
    pub maximal_itemsets: usize,
    pub negative_border: usize,
    pub not_emp_vc_dim: u64,
    pub emp_vc_dim: u64,
    pub epsilon_2: f64,
    pub candidates: usize,
    pub removed: usize,
}

/// VC-dimension/shatter-coefficient TFI test: bounds the uniform deviation
/// over the whole range space rather than testing each itemset individually.
/// `solver` drives both the non-empirical and the empirical shatter-coefficient
/// MILPs (§4.4).
pub fn vc_tfi<S: Solver>(
    supports: &[ItemsetSupport],
    stats: &DatasetStats,
    params: &VcParams,
    solver: &S,
) -> Result<(ItemsetCollection, VcDiagnostics)> {
    let n = stats.size;
    let lower_delta = split_confidence(params.delta, 2);

    let vc_dim_param = if params.use_additional_knowledge {
        (2 * stats.maxlen as i64 - 1).max(1) as f64
    } else {
        (stats.numitems as i64 - 1).max(1) as f64
    };
    let eps_vc_dim = eps_vc(lower_delta, n, vc_dim_param);
    let eps_emp_vc_dim = eps_emp_vc(lower_delta, n, (stats.dindex.max(1)) as f64, stats.max_freq());
    let epsilon_1 = eps_vc_dim.min(eps_emp_vc_dim);

    let lower_bound_freq = params.theta - epsilon_1 - (1.0 / n as f64);
    let freq_itemsets_1 = to_collection(supports, n, lower_bound_freq);

    let upper_threshold = params.theta + epsilon_1;
    let base_set: ItemsetCollection = freq_itemsets_1
        .iter()
        .filter(|(_, freq)| *freq < upper_threshold)
        .map(|(itemset, freq)| (itemset.clone(), freq))
        .collect();
    let max_freq_base_set = base_set.max_frequency();

    let closed_itemsets = closed(&base_set);
    let maximal_collection = maximal(&closed_itemsets);
    let maximal_itemsets: Vec<Itemset> = maximal_collection.keys().cloned().collect();

    let frequent_items: Vec<u32> = freq_itemsets_1
        .keys()
        .filter(|itemset| itemset.len() == 1)
        .map(|itemset| itemset.items()[0])
        .collect();

    let border = negative_border(&freq_itemsets_1, &maximal_itemsets, &frequent_items);

    let mut family = border;
    for itemset in base_set.keys() {
        if !family.contains(itemset) {
            family.push(itemset.clone());
        }
    }

    let mut capacity = frequent_items.len().saturating_sub(1);
    if params.use_additional_knowledge && 2 * stats.maxlen < capacity {
        capacity = 2 * stats.maxlen;
    }

    let problem = build_shatter_problem(&family, capacity, true);
    let solution = solver.solve(&problem, params.gap, params.time_limit)?;
    let upper_bound = solution.upper_bound();
    let not_emp_vc_dim = vcdim_bound(upper_bound, family.len());
    let not_emp_epsilon_2 = eps_vc(lower_delta, n, (not_emp_vc_dim.max(1)) as f64);

    let empirical = empirical_vc_loop(&family, stats, params.gap, params.time_limit, solver)?;
    let bound = log_shatter_bound(empirical.upper_bound, empirical.vc_dim, n);
    let emp_epsilon_2 = eps_shatter(lower_delta, n, bound, max_freq_base_set.max(f64::MIN_POSITIVE));

    let epsilon_2 = not_emp_epsilon_2.min(emp_epsilon_2);

    let threshold = params.theta + epsilon_2;
    let mut certified = ItemsetCollection::new();
    for (itemset, freq) in freq_itemsets_1.sorted_by_frequency_desc() {
        if freq >= threshold {
            certified.insert(itemset.clone(), freq);
        } else {
            break;
        }
    }

    let diagnostics = VcDiagnostics {
        epsilon_1,
        base_set: base_set.len(),
        maximal_itemsets: maximal_itemsets.len(),
        negative_border: family.len(),
        not_emp_vc_dim,
        emp_vc_dim: empirical.vc_dim,
        epsilon_2,
        candidates: freq_itemsets_1.len(),
        removed: freq_itemsets_1.len() - certified.len(),
    };

    Ok((certified, diagnostics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milp::BruteForceSolver;
    use std::collections::{BTreeSet, HashMap};

    fn stats(size: u64, numitems: usize, maxlen: usize, maxsupp: u64, dindex: usize) -> DatasetStats {
        let mut lengths = HashMap::new();
        lengths.insert(maxlen, size);
        DatasetStats {
            size,
            items: BTreeSet::new(),
            numitems,
            maxlen,
            maxsupp,
            lengths,
            dindex,
        }
    }

    #[test]
    fn certifies_itemsets_comfortably_above_theta_plus_epsilon() {
        let ds = stats(1000, 3, 2, 900, 2);
        let supports = vec![
            ItemsetSupport { itemset: Itemset::singleton(1), support: 950 },
            ItemsetSupport { itemset: Itemset::singleton(2), support: 900 },
            ItemsetSupport { itemset: Itemset::new(vec![1, 2]), support: 880 },
        ];
        let params = VcParams {
            delta: 0.1,
            theta: 0.1,
            gap: 0.0,
            time_limit: Duration::from_secs(1),
            use_additional_knowledge: false,
        };
        let solver = BruteForceSolver::new(24);
        let (certified, diag) = vc_tfi(&supports, &ds, &params, &solver).unwrap();
        assert!(certified.contains(&Itemset::singleton(1)));
        assert!(diag.epsilon_1 > 0.0);
        assert!(diag.epsilon_2 > 0.0);
    }

    #[test]
    fn empty_supports_yield_empty_certified_set() {
        let ds = stats(1000, 3, 2, 900, 2);
        let params = VcParams {
            delta: 0.1,
            theta: 0.1,
            gap: 0.0,
            time_limit: Duration::from_secs(1),
            use_additional_knowledge: false,
        };
        let solver = BruteForceSolver::new(24);
        let (certified, _diag) = vc_tfi(&[], &ds, &params, &solver).unwrap();
        assert!(certified.is_empty());
    }
}
