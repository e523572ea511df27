//! Accuracy of compressed tables across compression depths.
//!
//! A sweep evaluates every `(depth, mode)` cell for one function: compress,
//! reconstruct the whole domain, and reduce `|f(x) - approx(x)|` to its mean
//! and maximum. Cells are independent and run on the rayon pool; the report
//! lists them mode-major, then by increasing retained table width.
//!
//! ```
//! use wavelut::function::FunctionSpec;
//! use wavelut::fixed::FixedPointFormat;
//! use wavelut::config::Mode;
//! use wavelut::sweep::sweep;
//!
//! let f = FunctionSpec::from_catalog("Tanh").unwrap();
//! let format = FixedPointFormat::new(8, 4).unwrap();
//! let report = sweep(&f, format, &Mode::SWEPT).unwrap();
//! assert_eq!(report.records().len(), 3 * 7);
//! ```

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::compress::{compress_sampled, sample};
use crate::config::{CompressionConfig, Mode};
use crate::domain::FixedDomain;
use crate::error::Result;
use crate::fixed::FixedPointFormat;
use crate::function::FunctionSpec;
use crate::reconstruct::Reconstructor;

/// Mean and maximum absolute error of one table over its domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorStats {
    /// Mean of `|f(x) - approx(x)|`.
    pub mean: f64,
    /// Maximum of `|f(x) - approx(x)|`.
    pub max: f64,
}

impl ErrorStats {
    /// Reduces paired reference and approximate values.
    #[must_use]
    pub fn between(reference: &[f64], approx: &[f64]) -> Self {
        let mut sum = 0.0;
        let mut max = 0.0f64;
        for (&f, &y) in reference.iter().zip(approx) {
            let diff = (f - y).abs();
            sum += diff;
            max = max.max(diff);
        }
        let n = reference.len().min(approx.len()).max(1);
        Self {
            mean: sum / n as f64,
            max,
        }
    }
}

/// One row of an [`AccuracyReport`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyRecord {
    /// Retained table address width, `bit_width - J`.
    #[serde(rename = "Compression Depth")]
    pub compression_depth: u32,
    /// Discarded low-order bits, `J`.
    pub depth: u32,
    /// Compression mode.
    #[serde(rename = "dwt_type")]
    pub mode: Mode,
    /// Mean absolute error over the domain.
    #[serde(rename = "Mean Error")]
    pub mean_error: f64,
    /// Maximum absolute error over the domain.
    #[serde(rename = "Max Error")]
    pub max_error: f64,
}

/// Accuracy of every swept cell for one function and format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    function: FunctionSpec,
    format: FixedPointFormat,
    modes: Vec<Mode>,
    records: Vec<AccuracyRecord>,
}

impl AccuracyReport {
    /// Function the report measures.
    #[must_use]
    pub fn function(&self) -> &FunctionSpec {
        &self.function
    }

    /// Input format of the swept domain.
    #[must_use]
    pub fn format(&self) -> FixedPointFormat {
        self.format
    }

    /// Modes included in the sweep.
    #[must_use]
    pub fn modes(&self) -> &[Mode] {
        &self.modes
    }

    /// Rows in report order.
    #[must_use]
    pub fn records(&self) -> &[AccuracyRecord] {
        &self.records
    }

    /// Iterates over rows.
    pub fn iter(&self) -> std::slice::Iter<'_, AccuracyRecord> {
        self.records.iter()
    }

    /// Rows of a single mode, in increasing retained width.
    pub fn by_mode(&self, mode: Mode) -> impl Iterator<Item = &AccuracyRecord> + '_ {
        self.records.iter().filter(move |r| r.mode == mode)
    }

    /// `Compression Depth` column.
    #[must_use]
    pub fn compression_depths(&self) -> Vec<u32> {
        self.records.iter().map(|r| r.compression_depth).collect()
    }

    /// `dwt_type` column.
    #[must_use]
    pub fn dwt_types(&self) -> Vec<Mode> {
        self.records.iter().map(|r| r.mode).collect()
    }

    /// `Mean Error` column.
    #[must_use]
    pub fn mean_errors(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.mean_error).collect()
    }

    /// `Max Error` column.
    #[must_use]
    pub fn max_errors(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.max_error).collect()
    }

    /// True if this report was produced for exactly these parameters.
    #[must_use]
    pub fn matches(&self, function: &FunctionSpec, format: FixedPointFormat, modes: &[Mode]) -> bool {
        self.function == *function && self.format == format && self.modes == modes
    }

    /// Writes the report as CSV with a leading row-index column.
    ///
    /// # Errors
    ///
    /// Returns [`LutError::Csv`](crate::LutError::Csv) if writing fails.
    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["", "Compression Depth", "dwt_type", "Mean Error", "Max Error"])?;
        for (i, r) in self.records.iter().enumerate() {
            wtr.write_record([
                i.to_string(),
                r.compression_depth.to_string(),
                r.mode.label().to_string(),
                r.mean_error.to_string(),
                r.max_error.to_string(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a AccuracyReport {
    type Item = &'a AccuracyRecord;
    type IntoIter = std::slice::Iter<'a, AccuracyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Measures one `(mode, depth)` cell against precomputed reference samples.
///
/// # Errors
///
/// Returns a configuration error if `depth` leaves no address bits.
pub fn measure_cell(
    function: &FunctionSpec,
    reference: &[f64],
    domain: &FixedDomain,
    mode: Mode,
    depth: u32,
) -> Result<ErrorStats> {
    let format = domain.format();
    let config = CompressionConfig::new(format, mode, depth)?;
    let lut = compress_sampled(function, reference, domain, config)?;
    let approx: Vec<f64> = Reconstructor::new(&lut)
        .reconstruct_domain()?
        .into_iter()
        .map(|y| format.to_real(y))
        .collect();
    let stats = ErrorStats::between(reference, &approx);
    debug!(
        function = %function.name,
        mode = %mode,
        depth,
        mean = stats.mean,
        max = stats.max,
        "measured cell"
    );
    Ok(stats)
}

/// Measures one configuration over an arbitrary domain.
///
/// # Errors
///
/// Returns a configuration error if `depth` leaves no address bits.
pub fn measure(function: &FunctionSpec, domain: &FixedDomain, mode: Mode, depth: u32) -> Result<ErrorStats> {
    let reference = sample(function, domain);
    measure_cell(function, &reference, domain, mode, depth)
}

/// Sweeps `J = bit_width - 1 .. 1` (retained width 1 ..= bit_width - 1)
/// for each mode over the unsigned domain of `format`.
///
/// # Errors
///
/// Returns the first error raised by any cell.
pub fn sweep(function: &FunctionSpec, format: FixedPointFormat, modes: &[Mode]) -> Result<AccuracyReport> {
    let domain = FixedDomain::unsigned(format);
    let reference = sample(function, &domain);
    let bit_width = format.bit_width();

    let cells: Vec<(Mode, u32)> = modes
        .iter()
        .flat_map(|&mode| (1..bit_width).map(move |table_bits| (mode, table_bits)))
        .collect();

    let records = cells
        .par_iter()
        .map(|&(mode, table_bits)| {
            let depth = bit_width - table_bits;
            let stats = measure_cell(function, &reference, &domain, mode, depth)?;
            Ok(AccuracyRecord {
                compression_depth: table_bits,
                depth,
                mode,
                mean_error: stats.mean,
                max_error: stats.max,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    info!(
        function = %function.name,
        format = %format,
        cells = records.len(),
        "sweep complete"
    );
    Ok(AccuracyReport {
        function: function.clone(),
        format,
        modes: modes.to_vec(),
        records,
    })
}
