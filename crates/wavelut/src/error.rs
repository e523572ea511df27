//! Error type shared by every stage of table construction.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, LutError>;

/// Errors raised while building, reconstructing, sweeping or persisting tables.
///
/// Configuration variants are raised by constructors before any computation
/// runs. Non-finite function values are never reported here: quantized tables
/// saturate them to zero and wavelet tables carry them through unchanged.
#[derive(Debug, Error)]
pub enum LutError {
    /// A fixed-point format violates `bit_width > fractional_bits`.
    #[error("invalid fixed-point format {bit_width}.{fractional_bits}: {reason}")]
    InvalidFormat {
        /// Total input bit width.
        bit_width: u32,
        /// Fractional bits.
        fractional_bits: u32,
        /// What was wrong.
        reason: &'static str,
    },

    /// A compression or sweep parameter is out of range.
    #[error("invalid configuration field '{field}': {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// What was wrong.
        reason: String,
    },

    /// A mode name did not match any compression mode.
    #[error("unknown compression mode '{0}' (expected quant, haar, bior2.2 or db2)")]
    UnknownMode(String),

    /// A function name did not match the activation catalog.
    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    /// The serialized entry width is outside `1..=64`.
    #[error("output width {0} bits is outside 1..=64")]
    OutputWidth(u32),

    /// A serialized byte stream is not a whole number of entries.
    #[error("{len} bytes is not a multiple of the {entry_bytes}-byte entry size")]
    TruncatedTable {
        /// Length of the byte stream.
        len: usize,
        /// Bytes per entry.
        entry_bytes: usize,
    },

    /// A reconstruction address falls outside the table's domain.
    #[error("address {x} lies outside the reconstructed domain")]
    AddressOutOfRange {
        /// The fixed-point input that was requested.
        x: i64,
    },

    /// No cached report exists for the requested function.
    #[error("no cached report for '{name}' at {}", path.display())]
    CacheMiss {
        /// Function name used as the cache key.
        name: String,
        /// Path that was probed.
        path: PathBuf,
    },

    /// A peer runtime log contained no rows with the requested tag.
    #[error("no '{tag}' rows in {}", path.display())]
    MissingTiming {
        /// The `<name>_time_ms` tag searched for.
        tag: String,
        /// Log file that was read.
        path: PathBuf,
    },

    /// A tagged row in a peer runtime log has a value that is not a number.
    #[error("runtime '{value}' in {} is not a number", path.display())]
    BadTiming {
        /// Log file that was read.
        path: PathBuf,
        /// The offending field.
        value: String,
    },
    /// Underlying file system failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Report (de)serialization failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// CSV read or write failure.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Settings file could not be parsed.
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl LutError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
