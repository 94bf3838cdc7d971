//! Single-pass dataset profiling: size, item universe, per-item support,
//! transaction-length histogram, and the d-index upper bound.

use anyhow::{Context, Result};
use std::collections::{BTreeSet, HashMap};
use std::io::BufRead;

/// Immutable descriptive statistics about a transaction dataset, as produced
/// by a single pass over the file (§4.3).
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub size: u64,
    pub items: BTreeSet<u32>,
    pub numitems: usize,
    pub maxlen: usize,
    pub maxsupp: u64,
    pub lengths: HashMap<usize, u64>,
    pub dindex: usize,
}

impl DatasetStats {
    /// Maximum per-item frequency, `maxsupp / size`.
    pub fn max_freq(&self) -> f64 {
        self.maxsupp as f64 / self.size as f64
    }
}

fn parse_transaction(line: &str, lineno: usize) -> Result<BTreeSet<u32>> {
    line.split_whitespace()
        .map(|tok| {
            tok.parse::<u32>()
                .with_context(|| format!("line {lineno}: non-integer item id {tok:?}"))
        })
        .collect()
}

/// Maintains the running upper bound on the d-index: at most `dindex`
/// pairwise-incomparable transactions, sorted by length descending.
struct DIndexTracker {
    incomparable: Vec<BTreeSet<u32>>,
    dindex: usize,
}

impl DIndexTracker {
    /// The running bound always starts at 1, regardless of the first
    /// transaction's length: a single transaction of any length trivially
    /// witnesses a d-index of (at least) 1.
    fn new(first: BTreeSet<u32>) -> Self {
        Self {
            incomparable: vec![first],
            dindex: 1,
        }
    }

    fn observe(&mut self, t: &BTreeSet<u32>) {
        if t.len() <= self.dindex {
            return;
        }
        let dominated = self.incomparable.iter().any(|p| t.is_subset(p));
        if dominated {
            return;
        }
        self.incomparable.push(t.clone());
        self.incomparable.sort_by_key(|p| std::cmp::Reverse(p.len()));
        let mut d = 0;
        for p in &self.incomparable {
            if p.len() <= d {
                break;
            }
            d += 1;
        }
        self.dindex = d;
        self.incomparable.truncate(self.dindex);
    }
}

/// Scans `reader` once, computing the full dataset-statistics record.
///
/// Errors if the file is empty or any line contains a non-integer token.
pub fn profile_dataset<R: BufRead>(reader: R) -> Result<DatasetStats> {
    let mut lines = reader.lines();
    let first_line = lines
        .next()
        .context("empty dataset file")?
        .context("failed to read first line")?;
    let first = parse_transaction(&first_line, 1)?;

    let mut size: u64 = 1;
    let mut maxlen = first.len();
    let mut items: BTreeSet<u32> = first.iter().copied().collect();
    let mut item_supp: HashMap<u32, u64> = HashMap::new();
    for &item in &first {
        item_supp.insert(item, 1);
    }
    let mut lengths: HashMap<usize, u64> = HashMap::new();
    lengths.insert(first.len(), 1);

    let mut tracker = DIndexTracker::new(first);

    for (idx, line) in lines.enumerate() {
        let lineno = idx + 2;
        let line = line.with_context(|| format!("failed to read line {lineno}"))?;
        let t = parse_transaction(&line, lineno)?;
        size += 1;
        *lengths.entry(t.len()).or_insert(0) += 1;
        for &item in &t {
            *item_supp.entry(item).or_insert(0) += 1;
        }
        tracker.observe(&t);
        maxlen = maxlen.max(t.len());
        items.extend(t);
    }

    let maxsupp = item_supp.values().copied().max().unwrap_or(0);
    Ok(DatasetStats {
        size,
        numitems: items.len(),
        items,
        maxlen,
        maxsupp,
        lengths,
        dindex: tracker.dindex,
    })
}
