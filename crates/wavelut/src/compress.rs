//! Derivation of reduced coefficient tables.
//!
//! [`compress`] samples a [`FunctionSpec`] over a [`FixedDomain`] and reduces
//! it to a coefficient table according to the [`CompressionConfig`]:
//!
//! | Mode | Coefficients | Compensation | Length |
//! |------|--------------|--------------|--------|
//! | quant | `f` at each interval's left endpoint | none | `2^table_bits` |
//! | haar | `J`-level Haar approximation | `2^(-J/2)` | `2^table_bits` |
//! | bior2.2 | `J`-level bior2.2 approximation | `2^(J/2)` | at least `2^table_bits + 3` |
//! | db2 | `J`-level db2 approximation | none | filter-dependent |
//!
//! Every mode ends by encoding the compensated real coefficients at the
//! domain's fractional precision.
//!
//! Non-finite function values are zeroed in quant mode only. Wavelet modes
//! pass them straight into the transform; the encoded coefficients then
//! carry the saturated cast of whatever the filter produced.

use tracing::debug;

use crate::config::{CompressionConfig, Mode};
use crate::domain::FixedDomain;
use crate::error::{LutError, Result};
use crate::fixed::to_fixed;
use crate::function::FunctionSpec;
use crate::wavelet::{downcoef, downcoef_padded};

/// Entries a bior2.2 buffer keeps past `2^table_bits`, so the last row's
/// right neighbor never wraps to the start.
pub const BIOR_TAIL: usize = 3;

/// A compressed coefficient table and the parameters it was built for.
#[derive(Debug, Clone, PartialEq)]
pub struct Lut {
    domain: FixedDomain,
    config: CompressionConfig,
    coeffs: Vec<i64>,
}

impl Lut {
    /// Wraps precomputed coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`LutError::InvalidConfig`] if `config` was not partitioned
    /// against `domain`'s format.
    pub fn from_parts(domain: FixedDomain, config: CompressionConfig, coeffs: Vec<i64>) -> Result<Self> {
        if config.depth() + config.table_bits() != domain.format().bit_width() {
            return Err(LutError::config(
                "table_bits",
                "config does not partition the domain's bit width",
            ));
        }
        Ok(Self {
            domain,
            config,
            coeffs,
        })
    }

    /// Domain the table approximates.
    #[inline]
    #[must_use]
    pub const fn domain(&self) -> &FixedDomain {
        &self.domain
    }

    /// Mode and depth.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &CompressionConfig {
        &self.config
    }

    /// Full working buffer, including any trailing neighbor entries.
    #[inline]
    #[must_use]
    pub fn coefficients(&self) -> &[i64] {
        &self.coeffs
    }

    /// The nominal `2^table_bits` window, or the whole buffer if shorter.
    #[must_use]
    pub fn table(&self) -> &[i64] {
        let n = self.config.table_len().min(self.coeffs.len());
        &self.coeffs[..n]
    }

    /// Table address of the domain's first interval, `start >> J`.
    #[inline]
    #[must_use]
    pub const fn base_msb(&self) -> i64 {
        self.domain.start() >> self.config.depth()
    }
}

/// Reference samples `f(x)` for every input of `domain`, in domain order.
#[must_use]
pub fn sample(function: &FunctionSpec, domain: &FixedDomain) -> Vec<f64> {
    domain.reals().into_iter().map(|x| function.evaluate(x)).collect()
}

/// Builds the coefficient table for `function` over `domain`.
///
/// # Errors
///
/// Returns [`LutError::InvalidConfig`] if `config` does not partition the
/// domain's bit width.
pub fn compress(function: &FunctionSpec, domain: &FixedDomain, config: CompressionConfig) -> Result<Lut> {
    let reference = match config.mode() {
        Mode::Quant => Vec::new(),
        _ => sample(function, domain),
    };
    compress_sampled(function, &reference, domain, config)
}

/// Like [`compress`], reusing precomputed reference samples.
///
/// `reference` must be [`sample`]`(function, domain)`; quant mode ignores it
/// and evaluates only the interval endpoints.
///
/// # Errors
///
/// Returns [`LutError::InvalidConfig`] if `config` does not partition the
/// domain's bit width.
pub fn compress_sampled(
    function: &FunctionSpec,
    reference: &[f64],
    domain: &FixedDomain,
    config: CompressionConfig,
) -> Result<Lut> {
    let format = domain.format();
    let depth = config.depth();
    let real_coeffs = match (config.mode(), config.mode().wavelet()) {
        (_, None) => breakpoints(function, domain, depth),
        (Mode::Bior22, Some(wavelet)) => {
            downcoef_padded(reference, wavelet, depth, config.table_len() + BIOR_TAIL)
        }
        (_, Some(wavelet)) => downcoef(reference, wavelet, depth),
    };
    let scale = config.mode().compensation(depth);
    let scaled: Vec<f64> = real_coeffs.into_iter().map(|c| c * scale).collect();
    let coeffs = to_fixed(&scaled, format.fractional_bits());

    debug!(
        function = %function.name,
        mode = %config.mode(),
        depth,
        table_bits = config.table_bits(),
        entries = coeffs.len(),
        "compressed table"
    );
    Lut::from_parts(*domain, config, coeffs)
}

/// `f` at the left endpoint of every width-`2^J` interval, with non-finite
/// results saturated to zero.
fn breakpoints(function: &FunctionSpec, domain: &FixedDomain, depth: u32) -> Vec<f64> {
    let format = domain.format();
    let first = domain.start() >> depth;
    let last = (domain.end() - 1) >> depth;
    (first..=last)
        .map(|msb| {
            let y = function.evaluate(format.to_real(msb << depth));
            if y.is_finite() {
                y
            } else {
                0.0
            }
        })
        .collect()
}
