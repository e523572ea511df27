//! `wavelut-explore`: Prints a cached accuracy report.
//!
//! Never recomputes: a missing report is an error.
//!
//! **Usage:**
//! ```
//! wavelut-explore <name> [--data-dir data]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use wavelut::ReportCache;

/// Print one cached report.
#[derive(Parser)]
#[command(name = "wavelut-explore", about = "Print a cached accuracy report")]
struct Args {
    /// Function name, e.g. `Sigmoid`.
    name: String,

    /// Report cache directory.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
}

fn main() -> Result<()> {
    wavelut_clients::init_logging();
    let args = Args::parse();

    let cache = ReportCache::new(&args.data_dir);
    let report = cache
        .load(&args.name)
        .with_context(|| format!("no report for {}", args.name))?;

    println!("{} ({})", report.function().name, report.format());
    println!(
        "{:>5} {:>17} {:>14} {:>24} {:>24}",
        "", "Compression Depth", "dwt_type", "Mean Error", "Max Error"
    );
    for (i, r) in report.iter().enumerate() {
        println!(
            "{i:>5} {:>17} {:>14} {:>24} {:>24}",
            r.compression_depth,
            r.mode.label(),
            r.mean_error,
            r.max_error
        );
    }
    Ok(())
}
