//! `wavelut-sweep`: Measures reconstruction error across compression depths.
//!
//! For every selected function, in parallel, sweeps each mode over retained
//! table widths `1 ..= bit_width - 1` on the function's default domain and stores the
//! report under the data directory. Reports already on disk for the same
//! parameters are reused unless `--overwrite` is given.
//!
//! **Usage:**
//! ```
//! wavelut-sweep [--config sweep.toml] [-f Sigmoid -f GeLU] [-p 12] [--data-dir data] [--overwrite] [-j 8]
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
use wavelut::{AccuracyReport, ReportCache, SweepSettings};

/// Run the accuracy sweep.
#[derive(Parser)]
#[command(name = "wavelut-sweep", about = "Measure LUT compression error across depths and modes")]
struct Args {
    /// TOML settings file. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Restrict the sweep to these functions (repeatable).
    #[arg(short = 'f', long = "function")]
    functions: Vec<String>,

    /// Fractional bits of every default domain.
    #[arg(short = 'p', long)]
    precision: Option<u32>,

    /// Report cache directory.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Recompute reports even when cached.
    #[arg(long)]
    overwrite: bool,

    /// Worker threads (default: one per core).
    #[arg(short = 'j', long)]
    threads: Option<usize>,
}

fn main() -> Result<()> {
    wavelut_clients::init_logging();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => SweepSettings::from_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => SweepSettings::default(),
    };
    if let Some(precision) = args.precision {
        settings.precision = precision;
    }
    if let Some(dir) = args.data_dir {
        settings.data_dir = dir;
    }
    settings.overwrite |= args.overwrite;
    settings.select(&args.functions).context("invalid function selection")?;
    settings.validate().context("invalid sweep settings")?;

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure worker threads")?;
    }

    let cache = ReportCache::new(&settings.data_dir);
    let reports = cache
        .load_or_compute_all(&settings.functions, settings.precision, &settings.modes, settings.overwrite)
        .context("sweep failed")?;
    for report in &reports {
        print_summary(report);
    }

    println!();
    println!("Reports in {}", cache.dir().display());
    Ok(())
}

/// One line per mode: best and worst mean error over the swept widths.
fn print_summary(report: &AccuracyReport) {
    println!("{} ({})", report.function().name, report.format());
    for &mode in report.modes() {
        let means: Vec<f64> = report.by_mode(mode).map(|r| r.mean_error).collect();
        let best = means.iter().copied().fold(f64::INFINITY, f64::min);
        let worst = means.iter().copied().fold(0.0, f64::max);
        println!("  {:<14} mean error {best:.3e} .. {worst:.3e}", mode.label());
    }
}
