//! `wavelut-merge`: Merges per-peer runtime logs into `.dat` matrices.
//!
//! For each of `haar` and `bior`, reads
//! `<dir>/n_<n>_J_<J>_<name>_peer{0,1}.log`, averages the `<name>_time_ms`
//! rows of each peer and then the two peers, and writes `<dir>/<name>.dat`.
//!
//! **Usage:**
//! ```
//! wavelut-merge --nmin 8 --nmax 16 --jmin 1 --jmax 6 --dir logs
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use wavelut::timing::TimingMatrix;

/// Schemes whose runtimes are merged.
const SCHEMES: [&str; 2] = ["haar", "bior"];

/// Merge local run logs.
#[derive(Parser)]
#[command(name = "wavelut-merge", about = "Merge the outputs of local runs")]
struct Args {
    /// Smallest input size.
    #[arg(long)]
    nmin: u32,

    /// Largest input size.
    #[arg(long)]
    nmax: u32,

    /// Smallest depth.
    #[arg(long)]
    jmin: u32,

    /// Largest depth.
    #[arg(long)]
    jmax: u32,

    /// Directory holding the logs; the `.dat` files land here too.
    #[arg(long)]
    dir: PathBuf,
}

fn main() -> Result<()> {
    wavelut_clients::init_logging();
    let args = Args::parse();
    ensure!(args.nmin <= args.nmax, "--nmin must not exceed --nmax");
    ensure!(args.jmin <= args.jmax, "--jmin must not exceed --jmax");

    for name in SCHEMES {
        let matrix = TimingMatrix::collect(&args.dir, name, args.nmin..=args.nmax, args.jmin..=args.jmax)
            .with_context(|| format!("failed to read {name} logs in {}", args.dir.display()))?;
        let path = matrix
            .write_to(&args.dir, name)
            .with_context(|| format!("failed to write {name}.dat"))?;
        println!("{}", path.display());
    }
    Ok(())
}
