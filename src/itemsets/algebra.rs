use super::{Itemset, ItemsetCollection};
use rayon::prelude::*;

/// The sub-collection of `itemsets` that are closed: no strict superset in
/// the collection shares the same frequency.
///
/// Processes itemsets in non-decreasing cardinality order, maintaining a
/// frontier of itemsets seen so far; inserting `x` purges any frontier
/// member that is a proper subset of `x` with `x`'s frequency.
pub fn closed(itemsets: &ItemsetCollection) -> ItemsetCollection {
    let mut ordered: Vec<(Itemset, f64)> = itemsets
        .iter()
        .map(|(k, v)| (k.clone(), v))
        .collect();
    ordered.sort_by_key(|(itemset, _)| itemset.len());

    let mut frontier: Vec<Itemset> = Vec::new();

    for (itemset, freq) in ordered {
        // `itemset` strictly contains any frontier member at equal
        // frequency: that member is not closed, drop it.
        frontier.retain(|candidate| {
            !(candidate.is_strict_subset_of(&itemset) && itemsets.get(candidate) == Some(freq))
        });
        frontier.push(itemset);
    }

    frontier
        .into_iter()
        .map(|itemset| {
            let freq = itemsets.get(&itemset).expect("frontier member came from itemsets");
            (itemset, freq)
        })
        .collect()
}

/// The sub-collection of `itemsets` that are maximal: no proper superset of
/// the itemset lies in the collection.
///
/// Processes itemsets in non-increasing cardinality order, accepting an
/// itemset iff no previously accepted itemset is a proper superset.
pub fn maximal(itemsets: &ItemsetCollection) -> ItemsetCollection {
    let mut ordered: Vec<(Itemset, f64)> = itemsets
        .iter()
        .map(|(k, v)| (k.clone(), v))
        .collect();
    ordered.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut accepted: Vec<Itemset> = Vec::new();
    let mut result = ItemsetCollection::new();
    for (itemset, freq) in ordered {
        let dominated = accepted
            .iter()
            .any(|bigger| itemset.is_strict_subset_of(bigger));
        if !dominated {
            result.insert(itemset.clone(), freq);
            accepted.push(itemset);
        }
    }
    result
}

/// The negative border of the frequent family `frequent`, given its maximal
/// itemsets and the set of individually frequent items.
///
/// For each maximal itemset `M` and each frequent item `a`, considers the
/// "sibling" `(M \ {m}) ∪ {a}` for each `m ∈ M`, and falls back to the
/// "child" `M ∪ {a}` only when the sibling for that pair was not added
/// (sibling construction subsumes the child whenever both would qualify).
/// A candidate is added only if every one of its immediate
/// `(|candidate|-1)`-subsets is itself in `frequent`.
///
/// Returns a *superset* of the true negative border: false positives here
/// only loosen the eventual shatter-coefficient upper bound, never
/// compromise soundness. Non-frequent singletons never enter the border:
/// every candidate is built from a known-frequent item, so a singleton that
/// isn't in `frequent_items` can't be produced here.
pub fn negative_border(
    frequent: &ItemsetCollection,
    maximal_itemsets: &[Itemset],
    frequent_items: &[u32],
) -> Vec<Itemset> {
    let is_frequent = |candidate: &Itemset| frequent.contains(candidate);
    let all_subsets_frequent =
        |candidate: &Itemset| candidate.immediate_subsets().all(|s| is_frequent(&s));

    let per_maximal: Vec<Vec<Itemset>> = maximal_itemsets
        .par_iter()
        .map(|maximal_itemset| {
            let mut found: Vec<Itemset> = Vec::new();
            for &m in maximal_itemset.items() {
                let reduced = maximal_itemset.without(m);
                for &a in frequent_items {
                    if maximal_itemset.contains(a) {
                        continue;
                    }
                    let sibling = reduced.with(a);
                    let mut sibling_added = false;
                    if !is_frequent(&sibling) && all_subsets_frequent(&sibling) {
                        found.push(sibling);
                        sibling_added = true;
                    }
                    if !sibling_added {
                        let child = maximal_itemset.with(a);
                        if !is_frequent(&child) && all_subsets_frequent(&child) {
                            found.push(child);
                        }
                    }
                }
            }
            found
        })
        .collect();

    let mut dedup = std::collections::HashSet::new();
    let mut border = Vec::new();
    for candidate in per_maximal.into_iter().flatten() {
        if dedup.insert(candidate.clone()) {
            border.push(candidate);
        }
    }
    border
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(pairs: &[(&[u32], f64)]) -> ItemsetCollection {
        pairs
            .iter()
            .map(|(items, freq)| (Itemset::new(items.to_vec()), *freq))
            .collect()
    }

    #[test]
    fn closed_filter_drops_equal_frequency_subsets() {
        // {1}:0.5, {1,2}:0.5, {1,2,3}:0.3 -> {{1,2}:0.5, {1,2,3}:0.3}
        let input = collection(&[(&[1], 0.5), (&[1, 2], 0.5), (&[1, 2, 3], 0.3)]);
        let result = closed(&input);
        assert_eq!(result.len(), 2);
        assert_eq!(result.get(&Itemset::new(vec![1, 2])), Some(0.5));
        assert_eq!(result.get(&Itemset::new(vec![1, 2, 3])), Some(0.3));
        assert_eq!(result.get(&Itemset::new(vec![1])), None);
    }

    #[test]
    fn maximal_filter_keeps_only_top_itemset() {
        let input = collection(&[(&[1], 0.5), (&[1, 2], 0.5), (&[1, 2, 3], 0.3)]);
        let result = maximal(&input);
        assert_eq!(result.len(), 1);
        assert_eq!(result.get(&Itemset::new(vec![1, 2, 3])), Some(0.3));
    }

    #[test]
    fn closed_is_idempotent() {
        let input = collection(&[(&[1], 0.5), (&[1, 2], 0.5), (&[1, 2, 3], 0.3)]);
        let once = closed(&input);
        let twice = closed(&once);
        assert_eq!(once.len(), twice.len());
        for key in once.keys() {
            assert_eq!(once.get(key), twice.get(key));
        }
    }

    #[test]
    fn negative_border_of_a_downward_closed_family() {
        // frequent = {1},{2},{1,2}; item universe {1,2,3}; {3} not frequent.
        // negative border should contain {1,3} and {2,3} (immediate
        // non-members whose proper subsets are all frequent) but not {3}
        // (single items are excluded by default).
        let frequent = collection(&[(&[1], 0.6), (&[2], 0.5), (&[1, 2], 0.4)]);
        let maximal_itemsets = vec![Itemset::new(vec![1, 2])];
        let frequent_items = vec![1, 2];
        let border = negative_border(&frequent, &maximal_itemsets, &frequent_items);
        assert!(border.is_empty(), "no third item known to be frequent here");

        let frequent_items_with_three = vec![1, 2, 3];
        let mut frequent_with_three = frequent.clone();
        frequent_with_three.insert(Itemset::new(vec![3]), 0.2);
        let border = negative_border(
            &frequent_with_three,
            &maximal_itemsets,
            &frequent_items_with_three,
        );
        assert!(border.contains(&Itemset::new(vec![1, 3])));
        assert!(border.contains(&Itemset::new(vec![2, 3])));
    }
}
