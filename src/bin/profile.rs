//! Single-pass dataset profiling (§4.3): size, item universe, per-item
//! support, transaction-length histogram, and the d-index upper bound.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tfi::profile::profile_dataset;

#[derive(Parser)]
#[command(author, version, about = "Profile a transaction dataset")]
struct Args {
    /// Transaction dataset, one transaction of whitespace-separated item
    /// ids per line.
    dataset: PathBuf,
}

fn main() -> Result<()> {
    tfi::init_logging();
    let args = Args::parse();

    let file = File::open(&args.dataset).with_context(|| format!("opening {:?}", args.dataset))?;
    let stats = profile_dataset(BufReader::new(file))?;

    println!("size={}", stats.size);
    println!("numitems={}", stats.numitems);
    println!("maxlen={}", stats.maxlen);
    println!("maxsupp={}", stats.maxsupp);
    println!("maxfreq={:.6}", stats.max_freq());
    println!("dindex={}", stats.dindex);

    log::info!(
        "profiled {:?}: size={} numitems={} maxlen={} maxsupp={} dindex={}",
        args.dataset,
        stats.size,
        stats.numitems,
        stats.maxlen,
        stats.maxsupp,
        stats.dindex,
    );

    Ok(())
}
