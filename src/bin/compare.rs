//! Compares two FIMI-format itemset-support files against each other (§4.8).

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tfi::compare::compare;
use tfi::io::{read_itemsets, to_collection};

#[derive(Parser)]
#[command(author, version, about = "Compare two itemset-support files")]
struct Args {
    /// Ground-truth (original) results file.
    #[arg(long)]
    original: PathBuf,

    /// Results file to compare against the original.
    #[arg(long)]
    sample: PathBuf,

    /// Minimum frequency both files are filtered to before comparing.
    #[arg(long, default_value_t = 0.0)]
    min_freq: f64,

    /// Tolerance beyond which an intersecting itemset's frequency drift
    /// counts toward `wrong_eps`.
    #[arg(long, default_value_t = 1.0)]
    epsilon: f64,
}

fn main() -> Result<()> {
    tfi::init_logging();
    let args = Args::parse();

    let original_file = File::open(&args.original).with_context(|| format!("opening {:?}", args.original))?;
    let (original_size, original_records) = read_itemsets(BufReader::new(original_file))?;
    let original = to_collection(&original_records, original_size, args.min_freq);

    let sample_file = File::open(&args.sample).with_context(|| format!("opening {:?}", args.sample))?;
    let (sample_size, sample_records) = read_itemsets(BufReader::new(sample_file))?;
    let sample = to_collection(&sample_records, sample_size, args.min_freq);

    let stats = compare(&original, &sample, args.epsilon);

    log::info!(
        "original={},sample={},min_freq={},epsilon={},original_fis={}",
        args.original.display(),
        args.sample.display(),
        args.min_freq,
        args.epsilon,
        original.len(),
    );
    log::info!(
        "intersection={},false_negatives={},false_positives={},jaccard={:.6}",
        stats.intersection, stats.false_negatives, stats.false_positives, stats.jaccard,
    );
    log::info!(
        "wrong_eps={},max_abs_err={:.6},avg_abs_err={:.6},avg_rel_err={:.6}",
        stats.wrong_eps, stats.max_absolute_error, stats.avg_absolute_error, stats.avg_relative_error,
    );
    for itemset in &stats.false_positives_set {
        log::warn!("false positive: {itemset}");
    }

    Ok(())
}
