use crate::itemsets::{Itemset, ItemsetCollection};
use anyhow::{anyhow, Context, Result};
use std::io::{BufRead, Write};

/// One parsed record from an itemset-support file: the itemset and its raw
/// support count (not yet divided by the dataset size).
#[derive(Debug, Clone, PartialEq)]
pub struct ItemsetSupport {
    pub itemset: Itemset,
    pub support: u64,
}

impl ItemsetSupport {
    pub fn frequency(&self, size: u64) -> f64 {
        self.support as f64 / size as f64
    }
}

/// Converts parsed records into a frequency-keyed collection, dropping
/// anything below `min_freq`.
pub fn to_collection(records: &[ItemsetSupport], size: u64, min_freq: f64) -> ItemsetCollection {
    records
        .iter()
        .filter_map(|r| {
            let freq = r.frequency(size);
            (freq >= min_freq).then(|| (r.itemset.clone(), freq))
        })
        .collect()
}

/// Inverse of [`to_collection`]: recovers raw supports from a
/// frequency-keyed collection, for writing results back out in FIMI form.
pub fn from_collection(collection: &ItemsetCollection, size: u64) -> Vec<ItemsetSupport> {
    collection
        .iter()
        .map(|(itemset, freq)| ItemsetSupport {
            itemset: itemset.clone(),
            support: (freq * size as f64).round() as u64,
        })
        .collect()
}

fn parse_size_header(line: &str) -> Result<u64> {
    let trimmed = line.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| anyhow!("malformed size header, expected \"(N)\", got {line:?}"))?;
    inner
        .parse::<u64>()
        .with_context(|| format!("malformed size header: {inner:?} is not an integer"))
}

fn parse_record(line: &str, lineno: usize) -> Result<ItemsetSupport> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (support_tok, item_toks) = tokens
        .split_last()
        .ok_or_else(|| anyhow!("line {lineno}: empty record"))?;
    let support_str = support_tok
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| anyhow!("line {lineno}: expected \"(support)\", got {support_tok:?}"))?;
    let support = support_str
        .parse::<u64>()
        .with_context(|| format!("line {lineno}: support {support_str:?} is not an integer"))?;
    let items = item_toks
        .iter()
        .map(|tok| {
            tok.parse::<u32>()
                .with_context(|| format!("line {lineno}: item id {tok:?} is not an integer"))
        })
        .collect::<Result<Vec<u32>>>()?;
    if items.is_empty() {
        return Err(anyhow!("line {lineno}: record has no items"));
    }
    Ok(ItemsetSupport {
        itemset: Itemset::new(items),
        support,
    })
}

/// Reads an itemset-support file, returning the declared dataset size and
/// the parsed records in file order.
///
/// Fails if the size header is malformed, a record is malformed, or
/// supports are not in non-increasing order.
pub fn read_itemsets<R: BufRead>(reader: R) -> Result<(u64, Vec<ItemsetSupport>)> {
    let mut lines = reader.lines();
    let header = lines
        .next()
        .context("empty itemset-support file: missing size header")?
        .context("failed to read size header")?;
    let size = parse_size_header(&header)?;

    let mut records = Vec::new();
    let mut prev_support: Option<u64> = None;
    for (idx, line) in lines.enumerate() {
        let lineno = idx + 2;
        let line = line.with_context(|| format!("failed to read line {lineno}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let record = parse_record(&line, lineno)?;
        if let Some(prev) = prev_support {
            if record.support > prev {
                return Err(anyhow!(
                    "line {lineno}: support {} exceeds previous line's support {prev}; file must be sorted non-increasing",
                    record.support
                ));
            }
        }
        prev_support = Some(record.support);
        records.push(record);
    }
    Ok((size, records))
}

/// Writes `records` (support descending) in the itemset-support file
/// format, sorting defensively so callers never need to pre-sort.
pub fn write_itemsets<W: Write>(writer: &mut W, size: u64, records: &[ItemsetSupport]) -> Result<()> {
    writeln!(writer, " ({size})")?;
    let mut sorted: Vec<&ItemsetSupport> = records.iter().collect();
    sorted.sort_by(|a, b| b.support.cmp(&a.support));
    for record in sorted {
        writeln!(writer, "{} ({})", record.itemset, record.support)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_scenario_from_spec() {
        let data = " (100)\n1 2 (60)\n1 (50)\n2 (40)\n3 (5)\n";
        let (size, records) = read_itemsets(Cursor::new(data)).unwrap();
        assert_eq!(size, 100);
        assert_eq!(records.len(), 4);
        let collection = to_collection(&records, size, 0.3);
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.get(&Itemset::new(vec![1, 2])), Some(0.60));
        assert_eq!(collection.get(&Itemset::new(vec![1])), Some(0.50));
        assert_eq!(collection.get(&Itemset::new(vec![2])), Some(0.40));
        assert_eq!(collection.get(&Itemset::new(vec![3])), None);
    }

    #[test]
    fn rejects_out_of_order_supports() {
        let data = " (100)\n1 (10)\n2 (20)\n";
        assert!(read_itemsets(Cursor::new(data)).is_err());
    }

    #[test]
    fn rejects_malformed_header() {
        let data = "100\n1 (10)\n";
        assert!(read_itemsets(Cursor::new(data)).is_err());
    }

    #[test]
    fn from_collection_recovers_integer_supports() {
        let mut collection = ItemsetCollection::new();
        collection.insert(Itemset::new(vec![1]), 0.5);
        collection.insert(Itemset::new(vec![1, 2]), 0.6);
        let mut records = from_collection(&collection, 100);
        records.sort_by(|a, b| b.support.cmp(&a.support));
        assert_eq!(records[0].support, 60);
        assert_eq!(records[1].support, 50);
    }

    #[test]
    fn round_trips_through_write_and_read() {
        let records = vec![
            ItemsetSupport { itemset: Itemset::new(vec![1]), support: 50 },
            ItemsetSupport { itemset: Itemset::new(vec![1, 2]), support: 60 },
        ];
        let mut buf = Vec::new();
        write_itemsets(&mut buf, 100, &records).unwrap();
        let (size, parsed) = read_itemsets(Cursor::new(buf)).unwrap();
        assert_eq!(size, 100);
        assert_eq!(parsed[0].support, 60);
        assert_eq!(parsed[1].support, 50);
    }
}
