use super::{binary_search_epsilon, pvalue_guarded};
use crate::io::ItemsetSupport;
use crate::itemsets::ItemsetCollection;
use crate::profile::DatasetStats;
use crate::stats::{union_bound_factor, PValueMode};

/// Tunables for the Bonferroni-corrected binomial TFI engine (§4.5).
#[derive(Debug, Clone, Copy)]
pub struct BinomialParams {
    pub delta: f64,
    pub theta: f64,
    pub mode: PValueMode,
    pub use_additional_knowledge: bool,
}

/// The figures this engine writes to the CSV diagnostics trailer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialDiagnostics {
    pub p0: f64,
    pub critical: f64,
    pub candidates: usize,
    pub removed: usize,
    pub epsilon: f64,
}

/// Bonferroni-corrected per-itemset binomial test. `supports` need not be
/// pre-sorted; this sorts a local copy in non-increasing support order.
pub fn binomial_tfi(
    supports: &[ItemsetSupport],
    stats: &DatasetStats,
    params: &BinomialParams,
) -> (ItemsetCollection, BinomialDiagnostics) {
    let n = stats.size;

    let ubf = if params.use_additional_knowledge {
        union_bound_factor(stats.numitems as u64, 2 * stats.maxlen as u64)
    } else {
        stats.numitems as f64 * 2.0_f64.ln()
    };
    let critical = params.delta.ln() - ubf;
    let p0 = ((n as f64 * params.theta).ceil() - 1.0) / n as f64;

    let mut ordered: Vec<&ItemsetSupport> = supports.iter().collect();
    ordered.sort_by(|a, b| b.support.cmp(&a.support));

    let mut certified = ItemsetCollection::new();
    let mut last_accepted_freq = 1.0_f64;
    let mut last_rejected_freq = params.theta;
    let mut rejected_at = ordered.len();

    for (idx, record) in ordered.iter().enumerate() {
        let pv = pvalue_guarded(params.mode, record.support as f64, n, p0);
        if pv <= critical {
            let freq = record.frequency(n);
            certified.insert(record.itemset.clone(), freq);
            last_accepted_freq = freq;
        } else {
            last_rejected_freq = record.frequency(n);
            rejected_at = idx;
            break;
        }
    }

    let epsilon = if certified.is_empty() && rejected_at == 0 {
        0.0
    } else {
        binary_search_epsilon(
            params.mode,
            n,
            p0,
            params.theta,
            critical,
            last_rejected_freq,
            last_accepted_freq,
        )
    };

    let diagnostics = BinomialDiagnostics {
        p0,
        critical,
        candidates: ordered.len(),
        removed: ordered.len() - certified.len(),
        epsilon,
    };

    (certified, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itemsets::Itemset;
    use std::collections::{BTreeSet, HashMap};

    fn stats(size: u64, numitems: usize, maxlen: usize) -> DatasetStats {
        DatasetStats {
            size,
            items: BTreeSet::new(),
            numitems,
            maxlen,
            maxsupp: 0,
            lengths: HashMap::new(),
            dindex: 1,
        }
    }

    #[test]
    fn scenario_from_spec_accepts_80_rejects_55() {
        let ds = stats(1000, 2, 1);
        let params = BinomialParams {
            delta: 0.05,
            theta: 0.05,
            mode: PValueMode::Chernoff,
            use_additional_knowledge: false,
        };

        let accept_input = [ItemsetSupport { itemset: Itemset::singleton(1), support: 80 }];
        let (accepted, _) = binomial_tfi(&accept_input, &ds, &params);
        assert!(accepted.contains(&Itemset::singleton(1)));

        let reject_input = [ItemsetSupport { itemset: Itemset::singleton(1), support: 55 }];
        let (rejected, _) = binomial_tfi(&reject_input, &ds, &params);
        assert!(!rejected.contains(&Itemset::singleton(1)));
    }

    #[test]
    fn stops_at_first_rejection_in_descending_support_order() {
        let ds = stats(1000, 2, 1);
        let params = BinomialParams {
            delta: 0.05,
            theta: 0.05,
            mode: PValueMode::Chernoff,
            use_additional_knowledge: false,
        };
        let input = [
            ItemsetSupport { itemset: Itemset::singleton(1), support: 80 },
            ItemsetSupport { itemset: Itemset::singleton(2), support: 55 },
            ItemsetSupport { itemset: Itemset::singleton(3), support: 200 },
        ];
        let (certified, diag) = binomial_tfi(&input, &ds, &params);
        assert!(certified.contains(&Itemset::singleton(3)));
        assert!(certified.contains(&Itemset::singleton(1)));
        assert!(!certified.contains(&Itemset::singleton(2)));
        assert_eq!(diag.candidates, 3);
    }

    #[test]
    fn empty_input_yields_empty_output_and_zero_epsilon() {
        let ds = stats(1000, 2, 1);
        let params = BinomialParams {
            delta: 0.05,
            theta: 0.05,
            mode: PValueMode::Chernoff,
            use_additional_knowledge: false,
        };
        let (certified, diag) = binomial_tfi(&[], &ds, &params);
        assert!(certified.is_empty());
        assert_eq!(diag.epsilon, 0.0);
    }
}
