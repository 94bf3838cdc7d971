use anyhow::{Context, Result};
use std::io::BufRead;

/// Reads a whole transaction file into memory: one `Vec<u32>` per line.
///
/// The dataset profiler (`tfi::profile`) reads the same format in a single
/// streaming pass; this eager variant is for the sampling and splitting
/// utilities, which need random access to line boundaries.
pub fn read_transactions<R: BufRead>(reader: R) -> Result<Vec<Vec<u32>>> {
    reader
        .lines()
        .enumerate()
        .map(|(idx, line)| {
            let lineno = idx + 1;
            let line = line.with_context(|| format!("failed to read line {lineno}"))?;
            line.split_whitespace()
                .map(|tok| {
                    tok.parse::<u32>()
                        .with_context(|| format!("line {lineno}: non-integer item id {tok:?}"))
                })
                .collect()
        })
        .collect()
}
