//! Merging of per-peer runtime logs from the two-party evaluation runs.
//!
//! Each run `(n, J)` leaves one log per peer at
//! `<dir>/n_<n>_J_<J>_<name>_peer<p>.log`, a headerless CSV of `tag,value`
//! rows. The merge averages the `<name>_time_ms` rows of each peer, averages
//! the two peers, and lays the results out as a matrix with one column per
//! `n` and one row per `J`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{LutError, Result};

/// Peers participating in each run.
pub const PEERS: [u32; 2] = [0, 1];

/// Path of one peer's log.
#[must_use]
pub fn log_path(dir: &Path, n: u32, depth: u32, name: &str, peer: u32) -> PathBuf {
    dir.join(format!("n_{n}_J_{depth}_{name}_peer{peer}.log"))
}

/// Mean value of the `<name>_time_ms` rows in one log.
///
/// # Errors
///
/// Returns an I/O or CSV error if the log cannot be read,
/// [`LutError::BadTiming`] for a tagged row whose value is not a number, or
/// [`LutError::MissingTiming`] if it has no matching rows.
pub fn mean_time(path: &Path, name: &str) -> Result<f64> {
    let tag = format!("{name}_time_ms");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    let (mut count, mut total) = (0usize, 0.0);
    for record in reader.records() {
        let record = record?;
        if record.get(0) != Some(tag.as_str()) {
            continue;
        }
        let value = record.get(1).unwrap_or_default().trim();
        total += value.parse::<f64>().map_err(|_| LutError::BadTiming {
            path: path.to_path_buf(),
            value: value.to_string(),
        })?;
        count += 1;
    }
    if count == 0 {
        return Err(LutError::MissingTiming {
            tag,
            path: path.to_path_buf(),
        });
    }
    Ok(total / count as f64)
}

/// Averaged runtimes indexed by `(J, n)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingMatrix {
    ns: Vec<u32>,
    depths: Vec<u32>,
    /// `values[j][i]` is the runtime for `depths[j]`, `ns[i]`.
    values: Vec<Vec<f64>>,
}

impl TimingMatrix {
    /// Reads every peer log for `name` over the given ranges.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`mean_time`].
    pub fn collect(dir: &Path, name: &str, ns: RangeInclusive<u32>, depths: RangeInclusive<u32>) -> Result<Self> {
        let ns: Vec<u32> = ns.collect();
        let depths: Vec<u32> = depths.collect();
        let mut values = vec![Vec::with_capacity(ns.len()); depths.len()];
        for &n in &ns {
            for (row, &depth) in values.iter_mut().zip(&depths) {
                let mut sum = 0.0;
                for peer in PEERS {
                    let t = mean_time(&log_path(dir, n, depth, name, peer), name)?;
                    debug!(n, depth, peer, runtime_ms = t, "peer runtime");
                    sum += t;
                }
                row.push(sum / PEERS.len() as f64);
            }
        }
        Ok(Self { ns, depths, values })
    }

    /// Runtime for `(n, J)`, if inside the matrix.
    #[must_use]
    pub fn get(&self, n: u32, depth: u32) -> Option<f64> {
        let i = self.ns.iter().position(|&x| x == n)?;
        let j = self.depths.iter().position(|&x| x == depth)?;
        Some(self.values[j][i])
    }

    /// Writes the space-delimited matrix: a header `n <ns...>` followed by
    /// one `J <runtimes...>` row per depth, runtimes rounded to integers.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing fails.
    pub fn write_dat<W: Write>(&self, mut out: W) -> Result<()> {
        let header: Vec<String> = std::iter::once("n".to_string())
            .chain(self.ns.iter().map(u32::to_string))
            .collect();
        writeln!(out, "{}", header.join(" "))?;
        for (depth, row) in self.depths.iter().zip(&self.values) {
            let cells: Vec<String> = std::iter::once(depth.to_string())
                .chain(row.iter().map(|v| format!("{v:.0}")))
                .collect();
            writeln!(out, "{}", cells.join(" "))?;
        }
        Ok(())
    }

    /// Writes the matrix to `<dir>/<name>.dat`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub fn write_to(&self, dir: &Path, name: &str) -> Result<PathBuf> {
        let path = dir.join(format!("{name}.dat"));
        let mut writer = BufWriter::new(File::create(&path)?);
        self.write_dat(&mut writer)?;
        writer.flush()?;
        Ok(path)
    }
}
