//! `wavelut-gen`: Builds one compressed LUT and writes its binary layout.
//!
//! The input domain is `Q<size>.<precision>`: `size` integer bits and
//! `precision` fractional bits, unsigned unless `--negative` is given.
//! Coefficients are written as `ceil(bit_width / 8)` little-endian bytes each.
//!
//! **Usage:**
//! ```
//! wavelut-gen -f silu [-w bior2.2] [-d 4] [-n 4] [-p 16] [-l 64] [--negative] [--trim] [--file lut]
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
use wavelut::serialize::write_lut;
use wavelut::{compress, Activation, CompressionConfig, FixedDomain, FixedPointFormat, FunctionSpec, Mode};

/// Generate a compressed lookup table.
#[derive(Parser)]
#[command(name = "wavelut-gen", about = "Generate a compressed fixed-point lookup table")]
struct Args {
    /// Function to tabulate.
    #[arg(short = 'f', long)]
    function: Activation,

    /// Domain is centered on zero instead of starting at it.
    #[arg(long)]
    negative: bool,

    /// Output entry width in bits.
    #[arg(short = 'l', long = "bit-width", default_value_t = 64)]
    bit_width: u32,

    /// Integer bits of the input domain.
    #[arg(short = 'n', long, default_value_t = 4)]
    size: u32,

    /// Fractional bits of inputs and outputs.
    #[arg(short = 'p', long, default_value_t = 16)]
    precision: u32,

    /// Compression mode: quant, haar, bior2.2 or db2.
    #[arg(short = 'w', long, default_value = "quant")]
    wave: Mode,

    /// Low-order input bits folded into each table entry.
    #[arg(short = 'd', long, default_value_t = 0)]
    depth: u32,

    /// Destination of the LUT bytes.
    #[arg(long, default_value = "lut")]
    file: PathBuf,

    /// Write only the nominal `2^(n + p - d)` entries, dropping the
    /// trailing neighbors bior2.2 and db2 tables carry.
    #[arg(long)]
    trim: bool,
}

fn main() -> Result<()> {
    wavelut_clients::init_logging();
    let args = Args::parse();

    let format = FixedPointFormat::new(args.size + args.precision, args.precision)
        .context("invalid input format")?;
    let domain = FixedDomain::with_sign(format, args.negative);
    let config = CompressionConfig::new(format, args.wave, args.depth).context("invalid compression depth")?;
    let function = FunctionSpec::plain(args.function);

    let lut = compress(&function, &domain, config)
        .with_context(|| format!("failed to compress {} at depth {}", function.name, args.depth))?;
    let table = if args.trim { lut.table() } else { lut.coefficients() };

    println!("{table:?}");
    let written = write_lut(&args.file, table, args.bit_width)
        .with_context(|| format!("failed to write {}", args.file.display()))?;
    println!("{written}");

    tracing::info!(
        function = %function.name,
        format = %format,
        mode = %args.wave,
        entries = table.len(),
        bytes = written,
        path = %args.file.display(),
        "wrote LUT"
    );
    Ok(())
}
