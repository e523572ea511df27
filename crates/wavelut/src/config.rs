//! Compression modes and per-table configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LutError, Result};
use crate::fixed::FixedPointFormat;
use crate::wavelet::Wavelet;

/// How a table is derived from the reference function.
///
/// Each variant fixes a scale compensation (applied to real coefficients
/// before encoding) and a reconstruction rule (see
/// [`Reconstructor`](crate::reconstruct::Reconstructor)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Sample the function at each interval's left endpoint.
    #[serde(rename = "Quantization")]
    Quant,
    /// Haar approximation, looked up piecewise-constant.
    #[serde(rename = "Haar")]
    Haar,
    /// Biorthogonal (5,3) approximation, linearly interpolated.
    #[serde(rename = "Bior-2.2")]
    Bior22,
    /// Daubechies-2 approximation, reconstructed by upsampling.
    #[serde(rename = "Daubechies-2")]
    Db2,
}

impl Mode {
    /// Every mode.
    pub const ALL: [Mode; 4] = [Mode::Quant, Mode::Haar, Mode::Bior22, Mode::Db2];

    /// Modes compared by the accuracy sweep.
    pub const SWEPT: [Mode; 3] = [Mode::Quant, Mode::Haar, Mode::Bior22];

    /// Command-line token (`quant`, `haar`, `bior2.2`, `db2`).
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Mode::Quant => "quant",
            Mode::Haar => "haar",
            Mode::Bior22 => "bior2.2",
            Mode::Db2 => "db2",
        }
    }

    /// Report label (`Quantization`, `Haar`, `Bior-2.2`, `Daubechies-2`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Mode::Quant => "Quantization",
            Mode::Haar => "Haar",
            Mode::Bior22 => "Bior-2.2",
            Mode::Db2 => "Daubechies-2",
        }
    }

    /// Filter bank used by wavelet modes.
    #[must_use]
    pub const fn wavelet(self) -> Option<Wavelet> {
        match self {
            Mode::Quant => None,
            Mode::Haar => Some(Wavelet::Haar),
            Mode::Bior22 => Some(Wavelet::Bior22),
            Mode::Db2 => Some(Wavelet::Db2),
        }
    }

    /// Factor applied to real coefficients before fixed-point encoding.
    ///
    /// Haar coefficients carry a `2^(J/2)` gain that is divided out, so a
    /// coefficient is the interval mean. Bior2.2 coefficients are multiplied
    /// by a further `2^(J/2)`, leaving a total gain of `2^J` that the
    /// interpolation divides out.
    #[must_use]
    pub fn compensation(self, depth: u32) -> f64 {
        let half = f64::from(depth) / 2.0;
        match self {
            Mode::Haar => libm::pow(2.0, -half),
            Mode::Bior22 => libm::pow(2.0, half),
            Mode::Quant | Mode::Db2 => 1.0,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Mode {
    type Err = LutError;

    /// Accepts command-line tokens and report labels, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self> {
        Mode::ALL
            .into_iter()
            .find(|m| m.token().eq_ignore_ascii_case(s) || m.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| LutError::UnknownMode(s.to_string()))
    }
}

/// Mode and depth of one table, partitioned against an input format.
///
/// Invariant: `table_bits + depth == bit_width` of the governing format and
/// `table_bits >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompressionConfig {
    mode: Mode,
    depth: u32,
    table_bits: u32,
}

impl CompressionConfig {
    /// Partitions `format`'s input bits into `depth` discarded bits and the
    /// remaining address bits.
    ///
    /// # Errors
    ///
    /// Returns [`LutError::InvalidConfig`] if `depth >= format.bit_width()`.
    pub fn new(format: FixedPointFormat, mode: Mode, depth: u32) -> Result<Self> {
        if depth >= format.bit_width() {
            return Err(LutError::config(
                "depth",
                format!(
                    "depth {depth} leaves no address bits in a {}-bit input",
                    format.bit_width()
                ),
            ));
        }
        Ok(Self {
            mode,
            depth,
            table_bits: format.bit_width() - depth,
        })
    }

    /// Builds a config from the number of retained address bits.
    ///
    /// # Errors
    ///
    /// Returns [`LutError::InvalidConfig`] unless `1 <= table_bits <= bit_width`.
    pub fn with_table_bits(format: FixedPointFormat, mode: Mode, table_bits: u32) -> Result<Self> {
        if table_bits == 0 || table_bits > format.bit_width() {
            return Err(LutError::config(
                "table_bits",
                format!("must be in 1..={}", format.bit_width()),
            ));
        }
        Self::new(format, mode, format.bit_width() - table_bits)
    }

    /// Compression mode.
    #[inline]
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Discarded low-order bits, `J`.
    #[inline]
    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Retained address bits.
    #[inline]
    #[must_use]
    pub const fn table_bits(&self) -> u32 {
        self.table_bits
    }

    /// Nominal table size, `2^table_bits`.
    #[inline]
    #[must_use]
    pub const fn table_len(&self) -> usize {
        1usize << self.table_bits
    }
}
