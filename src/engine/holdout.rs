use super::{binary_search_epsilon, pvalue_guarded};
use crate::io::ItemsetSupport;
use crate::itemsets::{Itemset, ItemsetCollection};
use crate::stats::PValueMode;
use std::collections::HashMap;

/// Whether the exploratory half is pre-filtered before the evaluation pass,
/// and by how much. The original sources disagree on whether this should
/// be a boolean or a numeric Bonferroni offset (§9); exposing both keeps
/// every sensible caller representable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterParam {
    Off,
    /// `d`, the Bonferroni offset subtracted from `log(lowered_delta)` to
    /// get the filter's own critical value (e.g. the item universe size).
    Bonferroni(f64),
}

#[derive(Debug, Clone, Copy)]
pub struct HoldoutParams {
    pub delta: f64,
    pub theta: f64,
    pub mode: PValueMode,
    pub filter: FilterParam,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoldoutDiagnostics {
    pub p0: f64,
    pub filter_critical: f64,
    pub filter_epsilon: f64,
    pub tfis_from_exp: usize,
    pub exp_candidates: usize,
    pub exp_filtered: usize,
    pub eval_candidates: usize,
    pub intersection: usize,
    pub false_negatives: usize,
    pub critical: f64,
    pub removed: usize,
    pub epsilon: f64,
}

/// Two-phase holdout TFI test (§4.6): an optional Bonferroni pre-filter on
/// the exploratory half, then a Bonferroni test of the surviving
/// candidates' evaluation-half supports.
pub fn holdout_tfi(
    exp_supports: &[ItemsetSupport],
    eval_supports: &[ItemsetSupport],
    n_exp: u64,
    n_eval: u64,
    params: &HoldoutParams,
) -> (ItemsetCollection, HoldoutDiagnostics) {
    let orig_size = n_exp + n_eval;
    let p0 = ((orig_size as f64 * params.theta).ceil() - 1.0) / orig_size as f64;

    let mut certified = ItemsetCollection::new();
    let mut filter_critical = 0.0_f64;
    let mut filter_epsilon = 1.0_f64;
    // Candidates that did *not* get certified outright by the filter; these
    // carry forward to the intersection-with-eval phase.
    let mut carried_forward: HashMap<Itemset, u64> = HashMap::new();

    let lowered_delta = match params.filter {
        FilterParam::Bonferroni(d) => {
            let lowered_delta = 1.0 - (1.0 - params.delta).sqrt();
            filter_critical = lowered_delta.ln() - d;

            let mut last_accepted_freq = 1.0_f64;
            let mut last_rejected_freq = 0.0_f64;
            for record in exp_supports {
                let freq = record.frequency(n_exp);
                let pv = pvalue_guarded(params.mode, record.support as f64, n_exp, p0);
                if pv <= filter_critical {
                    certified.insert(record.itemset.clone(), freq);
                    last_accepted_freq = last_accepted_freq.min(freq);
                } else {
                    carried_forward.insert(record.itemset.clone(), record.support);
                    last_rejected_freq = last_rejected_freq.max(freq);
                }
            }
            filter_epsilon = binary_search_epsilon(
                params.mode,
                n_exp,
                p0,
                params.theta,
                filter_critical,
                last_rejected_freq,
                last_accepted_freq,
            );
            lowered_delta
        }
        FilterParam::Off => {
            for record in exp_supports {
                carried_forward.insert(record.itemset.clone(), record.support);
            }
            params.delta
        }
    };

    let tfis_from_exp = certified.len();
    let exp_filtered = carried_forward.len();

    if exp_filtered == 0 {
        let diagnostics = HoldoutDiagnostics {
            p0,
            filter_critical,
            filter_epsilon,
            tfis_from_exp,
            exp_candidates: exp_supports.len(),
            exp_filtered: 0,
            eval_candidates: 0,
            intersection: 0,
            false_negatives: 0,
            critical: 0.0,
            removed: 0,
            epsilon: 0.0,
        };
        return (certified, diagnostics);
    }

    let eval_supports_by_itemset: HashMap<&Itemset, u64> = eval_supports
        .iter()
        .map(|r| (&r.itemset, r.support))
        .collect();

    let mut intersection: Vec<(&Itemset, u64)> = carried_forward
        .iter()
        .filter_map(|(itemset, _)| eval_supports_by_itemset.get(itemset).map(|&s| (itemset, s)))
        .collect();
    let false_negatives = exp_filtered - intersection.len();
    intersection.sort_by(|a, b| b.1.cmp(&a.1));

    let critical = lowered_delta.ln() - (exp_filtered as f64).ln();

    let mut last_accepted_freq = 1.0_f64;
    let mut last_rejected_freq = params.theta;
    let mut accepted = 0usize;
    for &(itemset, support) in &intersection {
        let freq = support as f64 / n_eval as f64;
        let pv = pvalue_guarded(params.mode, support as f64, n_eval, p0);
        if pv <= critical {
            certified.insert(itemset.clone(), freq);
            last_accepted_freq = freq;
            accepted += 1;
        } else {
            last_rejected_freq = freq;
            break;
        }
    }

    let epsilon = binary_search_epsilon(
        params.mode,
        n_eval,
        p0,
        params.theta,
        critical,
        last_rejected_freq,
        last_accepted_freq,
    );

    let diagnostics = HoldoutDiagnostics {
        p0,
        filter_critical,
        filter_epsilon,
        tfis_from_exp,
        exp_candidates: exp_supports.len(),
        exp_filtered,
        eval_candidates: eval_supports.len(),
        intersection: intersection.len(),
        false_negatives,
        critical,
        removed: intersection.len() - accepted,
        epsilon,
    };

    (certified, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(item: u32, support: u64) -> ItemsetSupport {
        ItemsetSupport {
            itemset: Itemset::singleton(item),
            support,
        }
    }

    #[test]
    fn no_filter_intersects_exp_and_eval_and_certifies_survivors() {
        let exp = vec![record(1, 600), record(2, 400), record(3, 50)];
        let eval = vec![record(1, 580), record(2, 410)];
        let params = HoldoutParams {
            delta: 0.05,
            theta: 0.3,
            mode: PValueMode::Chernoff,
            filter: FilterParam::Off,
        };
        let (certified, diag) = holdout_tfi(&exp, &eval, 1000, 1000, &params);
        assert_eq!(diag.exp_candidates, 3);
        assert_eq!(diag.intersection, 2);
        assert!(certified.contains(&Itemset::singleton(1)));
    }

    #[test]
    fn empty_carry_forward_short_circuits_with_empty_output() {
        let exp = vec![];
        let eval = vec![record(1, 580)];
        let params = HoldoutParams {
            delta: 0.05,
            theta: 0.3,
            mode: PValueMode::Chernoff,
            filter: FilterParam::Off,
        };
        let (certified, diag) = holdout_tfi(&exp, &eval, 1000, 1000, &params);
        assert!(certified.is_empty());
        assert_eq!(diag.epsilon, 0.0);
    }

    #[test]
    fn bonferroni_filter_certifies_strong_exploratory_candidates_outright() {
        let exp = vec![record(1, 950), record(2, 310)];
        let eval = vec![record(1, 900), record(2, 320)];
        let params = HoldoutParams {
            delta: 0.05,
            theta: 0.3,
            mode: PValueMode::Chernoff,
            filter: FilterParam::Bonferroni(2.0),
        };
        let (certified, diag) = holdout_tfi(&exp, &eval, 1000, 1000, &params);
        assert!(diag.tfis_from_exp >= 1);
        assert!(certified.contains(&Itemset::singleton(1)));
    }
}
