//! `wavelut-csv`: Exports cached accuracy reports as CSV.
//!
//! Writes `csv<Name>.csv` into the output directory for every catalog
//! function (or the ones named), with a leading row-index column.
//!
//! **Usage:**
//! ```
//! wavelut-csv [-f Sigmoid ...] [--data-dir data] [--out .]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use wavelut::{FunctionSpec, ReportCache};

/// Export cached reports to CSV.
#[derive(Parser)]
#[command(name = "wavelut-csv", about = "Export cached accuracy reports as CSV")]
struct Args {
    /// Functions to export (repeatable; default: the whole catalog).
    #[arg(short = 'f', long = "function")]
    functions: Vec<String>,

    /// Report cache directory.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Directory for the CSV files.
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

fn main() -> Result<()> {
    wavelut_clients::init_logging();
    let args = Args::parse();

    let names: Vec<String> = if args.functions.is_empty() {
        FunctionSpec::catalog().into_iter().map(|f| f.name).collect()
    } else {
        args.functions
    };

    let cache = ReportCache::new(&args.data_dir);
    for name in &names {
        let report = cache
            .load(name)
            .with_context(|| format!("no report for {name}"))?;
        let path = args.out.join(format!("csv{name}.csv"));
        let file = File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
        report
            .write_csv(BufWriter::new(file))
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("{}", path.display());
    }
    Ok(())
}
