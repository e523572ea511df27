//! wavelut - compact fixed-point lookup tables for nonlinear functions
//!
//! Evaluators where table size drives cost (secret-shared lookups, small
//! hardware ROMs) cannot afford a `2^bit_width`-entry table per activation.
//! This crate derives a `2^(bit_width - J)`-entry table instead, by
//! quantization or by wavelet approximation, and reconstructs approximate
//! outputs from it with integer arithmetic.
//!
//! # Pipeline
//!
//! ```text
//! FunctionSpec --sample--> f(x) --compress(mode, J)--> Lut (i64 coefficients)
//!                                                       |
//!        x_fixed --split(J)--> (msb, lsb) --reconstruct-+--> y_fixed
//!                                                       |
//!                                        pack(W) -------+--> LUT bytes
//! ```
//!
//! | Module | Role |
//! |--------|------|
//! | [`fixed`] | `floor(x · 2^f)` encoding and decoding |
//! | [`split`] | `msb = x >> J`, `lsb = x mod 2^J` |
//! | [`compress`] | quant / haar / bior2.2 / db2 coefficient tables |
//! | [`reconstruct`] | lookup, integer interpolation, wavelet upsampling |
//! | [`sweep`] | mean/max error across depths and modes |
//! | [`serialize`] | little-endian fixed-width byte layout |
//!
//! # Example
//!
//! ```
//! use wavelut::{compress, CompressionConfig, FixedDomain, FixedPointFormat, FunctionSpec, Mode, Reconstructor};
//!
//! let format = FixedPointFormat::new(16, 12).unwrap();
//! let domain = FixedDomain::unsigned(format);
//! let sigmoid = FunctionSpec::from_catalog("Sigmoid").unwrap();
//!
//! let config = CompressionConfig::new(format, Mode::Bior22, 6).unwrap();
//! let lut = compress(&sigmoid, &domain, config).unwrap();
//! assert_eq!(lut.table().len(), 1024);
//!
//! let y = Reconstructor::new(&lut).evaluate(format.to_fixed(15.0)).unwrap();
//! let exact = sigmoid.evaluate(15.0);
//! assert!((format.to_real(y) - exact).abs() < 2e-3);
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod cache;
pub mod compress;
pub mod config;
pub mod domain;
pub mod error;
pub mod fixed;
pub mod function;
pub mod reconstruct;
pub mod serialize;
pub mod settings;
pub mod split;
pub mod sweep;
pub mod timing;
pub mod wavelet;

pub use cache::ReportCache;
pub use compress::{compress, Lut};
pub use config::{CompressionConfig, Mode};
pub use domain::FixedDomain;
pub use error::{LutError, Result};
pub use fixed::FixedPointFormat;
pub use function::{Activation, FunctionSpec};
pub use reconstruct::Reconstructor;
pub use settings::SweepSettings;
pub use split::{split, Address};
pub use sweep::{sweep, AccuracyRecord, AccuracyReport, ErrorStats};
