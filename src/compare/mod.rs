//! Comparing two certified-TFI collections against each other (§4.8):
//! intersection, false negatives/positives, the Jaccard index, and
//! per-itemset frequency-error statistics over the intersection.

use crate::itemsets::{Itemset, ItemsetCollection};
use std::collections::HashSet;

/// Statistics comparing a `sample` result against an `original` one,
/// treating `original` as ground truth.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonStats {
    pub intersection: usize,
    pub false_negatives: usize,
    pub false_positives: usize,
    pub false_positives_set: Vec<Itemset>,
    pub jaccard: f64,
    pub max_absolute_error: f64,
    pub avg_absolute_error: f64,
    pub avg_relative_error: f64,
    pub wrong_eps: usize,
}

/// Compares `original` (ground truth) against `sample`, reporting itemsets
/// in `sample` not in `original` as false positives and vice versa for
/// false negatives. `epsilon` is the tolerance beyond which an
/// intersection member's absolute frequency difference counts as
/// `wrong_eps`.
pub fn compare(original: &ItemsetCollection, sample: &ItemsetCollection, epsilon: f64) -> ComparisonStats {
    let original_keys: HashSet<&Itemset> = original.keys().collect();
    let sample_keys: HashSet<&Itemset> = sample.keys().collect();

    let intersection: Vec<&Itemset> = original_keys.intersection(&sample_keys).copied().collect();
    let false_negatives = original_keys.difference(&sample_keys).count();
    let false_positives_set: Vec<Itemset> = sample_keys
        .difference(&original_keys)
        .map(|&itemset| itemset.clone())
        .collect();
    let union_len = original_keys.union(&sample_keys).count();

    let jaccard = if union_len == 0 {
        0.0
    } else {
        intersection.len() as f64 / union_len as f64
    };

    let mut max_absolute_error = 0.0_f64;
    let mut absolute_error_sum = 0.0_f64;
    let mut relative_error_sum = 0.0_f64;
    let mut wrong_eps = 0usize;

    for itemset in &intersection {
        let original_freq = original.get(itemset).expect("intersection member is in original");
        let sample_freq = sample.get(itemset).expect("intersection member is in sample");
        let absolute_error = (sample_freq - original_freq).abs();
        absolute_error_sum += absolute_error;
        if absolute_error > max_absolute_error {
            max_absolute_error = absolute_error;
        }
        if absolute_error > epsilon {
            wrong_eps += 1;
        }
        relative_error_sum += absolute_error / original_freq;
    }

    let (avg_absolute_error, avg_relative_error) = if intersection.is_empty() {
        (0.0, 0.0)
    } else {
        (
            absolute_error_sum / intersection.len() as f64,
            relative_error_sum / intersection.len() as f64,
        )
    };

    ComparisonStats {
        intersection: intersection.len(),
        false_negatives,
        false_positives: false_positives_set.len(),
        false_positives_set,
        jaccard,
        max_absolute_error,
        avg_absolute_error,
        avg_relative_error,
        wrong_eps,
    }
}
