//! Draws a sample-with-replacement of transactions from a dataset (§9
//! "sample and split utilities"), writing the sampled lines to stdout in
//! file order, duplicating any line drawn more than once.

use anyhow::{Context, Result};
use clap::Parser;
use rand::Rng;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tfi::io::DatasetStatsCache;

#[derive(Parser)]
#[command(author, version, about = "Draw a sample-with-replacement of transactions")]
struct Args {
    /// Transaction dataset to sample from.
    dataset: PathBuf,

    /// Number of transactions to draw.
    #[arg(long)]
    sample_size: usize,
}

fn main() -> Result<()> {
    tfi::init_logging();
    let args = Args::parse();

    let cache = DatasetStatsCache::new();
    let stats = cache.get_or_compute(&args.dataset)?;
    let population_size = stats.size as usize;

    let mut rng = rand::rng();
    let mut sample_lines: Vec<usize> = (0..args.sample_size)
        .map(|_| rng.random_range(0..population_size))
        .collect();
    sample_lines.sort_unstable();

    let file = File::open(&args.dataset).with_context(|| format!("opening {:?}", args.dataset))?;
    let reader = BufReader::new(file);
    let stdout = std::io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    let mut sample_idx = 0usize;
    for (line_idx, line) in reader.lines().enumerate() {
        let line = line?;
        while sample_idx < sample_lines.len() && sample_lines[sample_idx] == line_idx {
            writeln!(writer, "{line}")?;
            sample_idx += 1;
        }
        if sample_idx >= sample_lines.len() {
            break;
        }
    }

    log::info!("sampled {} of {} transactions", args.sample_size, population_size);
    Ok(())
}
