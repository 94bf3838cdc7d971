use super::Itemset;
use std::collections::HashMap;

/// An itemset-to-frequency mapping. All frequencies are strictly positive and
/// keys are unique by content (guaranteed by `HashMap` + `Itemset`'s
/// content-based `Eq`/`Hash`).
///
/// Used for every role named in the data model: observed supports,
/// candidates, base set, negative border, certified TFIs, maximal, closed.
#[derive(Debug, Clone, Default)]
pub struct ItemsetCollection {
    frequencies: HashMap<Itemset, f64>,
}

impl ItemsetCollection {
    pub fn new() -> Self {
        Self {
            frequencies: HashMap::new(),
        }
    }

    /// Inserts `itemset` with `frequency`. Frequencies must be strictly
    /// positive; this is a programmer contract, not user input validation,
    /// so it panics rather than returning a `Result`.
    pub fn insert(&mut self, itemset: Itemset, frequency: f64) {
        assert!(
            frequency > 0.0,
            "itemset frequency must be strictly positive, got {frequency}"
        );
        self.frequencies.insert(itemset, frequency);
    }

    pub fn get(&self, itemset: &Itemset) -> Option<f64> {
        self.frequencies.get(itemset).copied()
    }

    pub fn contains(&self, itemset: &Itemset) -> bool {
        self.frequencies.contains_key(itemset)
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Itemset, f64)> {
        self.frequencies.iter().map(|(k, v)| (k, *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Itemset> {
        self.frequencies.keys()
    }

    /// Itemsets in non-increasing order of frequency, matching the FIMI
    /// output convention (§6).
    pub fn sorted_by_frequency_desc(&self) -> Vec<(&Itemset, f64)> {
        let mut entries: Vec<_> = self.frequencies.iter().map(|(k, v)| (k, *v)).collect();
        entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
        entries
    }

    /// Largest frequency in the collection, or `0.0` if empty.
    pub fn max_frequency(&self) -> f64 {
        self.frequencies
            .values()
            .copied()
            .fold(0.0_f64, f64::max)
    }

    pub fn retain_frequency_at_least(&self, min_freq: f64) -> ItemsetCollection {
        ItemsetCollection {
            frequencies: self
                .frequencies
                .iter()
                .filter(|(_, &f)| f >= min_freq)
                .map(|(k, &v)| (k.clone(), v))
                .collect(),
        }
    }
}

impl FromIterator<(Itemset, f64)> for ItemsetCollection {
    fn from_iter<T: IntoIterator<Item = (Itemset, f64)>>(iter: T) -> Self {
        let mut out = Self::new();
        for (itemset, freq) in iter {
            out.insert(itemset, freq);
        }
        out
    }
}

impl<'a> IntoIterator for &'a ItemsetCollection {
    type Item = (&'a Itemset, f64);
    type IntoIter = std::vec::IntoIter<(&'a Itemset, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.frequencies
            .iter()
            .map(|(k, v)| (k, *v))
            .collect::<Vec<_>>()
            .into_iter()
    }
}
