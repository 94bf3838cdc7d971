//! Partitions a dataset into two roughly-equal halves, an exploratory half
//! and an evaluation half, by randomly assigning each transaction line to
//! one or the other (§9 "sample and split utilities").

use anyhow::{Context, Result};
use clap::Parser;
use rand::seq::index::sample;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tfi::io::DatasetStatsCache;

#[derive(Parser)]
#[command(author, version, about = "Split a dataset into exploratory and evaluation halves")]
struct Args {
    /// Transaction dataset to split.
    dataset: PathBuf,

    /// Output file for the exploratory half.
    #[arg(long)]
    exploratory: PathBuf,

    /// Output file for the evaluation half.
    #[arg(long)]
    evaluation: PathBuf,
}

fn main() -> Result<()> {
    tfi::init_logging();
    let args = Args::parse();

    let cache = DatasetStatsCache::new();
    let stats = cache.get_or_compute(&args.dataset)?;
    let dataset_size = stats.size as usize;

    let mut rng = rand::rng();
    let exploratory_lines: HashSet<usize> = sample(&mut rng, dataset_size, dataset_size / 2)
        .iter()
        .collect();

    let file = File::open(&args.dataset).with_context(|| format!("opening {:?}", args.dataset))?;
    let reader = BufReader::new(file);
    let mut exploratory_writer = BufWriter::new(
        File::create(&args.exploratory).with_context(|| format!("creating {:?}", args.exploratory))?,
    );
    let mut evaluation_writer = BufWriter::new(
        File::create(&args.evaluation).with_context(|| format!("creating {:?}", args.evaluation))?,
    );

    let mut exploratory_count = 0usize;
    let mut evaluation_count = 0usize;
    for (line_idx, line) in reader.lines().enumerate() {
        let line = line?;
        if exploratory_lines.contains(&line_idx) {
            writeln!(exploratory_writer, "{line}")?;
            exploratory_count += 1;
        } else {
            writeln!(evaluation_writer, "{line}")?;
            evaluation_count += 1;
        }
    }

    log::info!(
        "split {:?} into {} exploratory and {} evaluation transactions",
        args.dataset,
        exploratory_count,
        evaluation_count
    );
    Ok(())
}
