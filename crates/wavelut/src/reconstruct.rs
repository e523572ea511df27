//! Approximate evaluation from compressed tables.
//!
//! | Mode | Rule |
//! |------|------|
//! | quant, haar | `coeffs[msb]` |
//! | bior2.2 | `(lut0[msb]·(2^J − lsb) + lut1[msb]·lsb) div 2^(2J)` |
//! | db2 | full `J`-level upsampling back to the domain, re-encoded |
//!
//! For bior2.2, `lut0` and `lut1` are the working buffer rotated left by two
//! and three entries and truncated to `2^table_bits`. The blend is exact
//! integer arithmetic with floor division, so a negative sum rounds toward
//! negative infinity.

use crate::compress::Lut;
use crate::config::Mode;
use crate::error::{LutError, Result};
use crate::fixed::{to_fixed, to_real};
use crate::split::{split, Address};
use crate::wavelet::upcoef;

/// Evaluates a [`Lut`] at fixed-point inputs.
///
/// Building a reconstructor for a db2 table runs the full upsampling once;
/// lookups afterwards are constant time for every mode.
#[derive(Debug, Clone)]
pub struct Reconstructor<'a> {
    lut: &'a Lut,
    upsampled: Vec<i64>,
}

impl<'a> Reconstructor<'a> {
    /// Prepares `lut` for evaluation.
    #[must_use]
    pub fn new(lut: &'a Lut) -> Self {
        let upsampled = match lut.config().mode() {
            Mode::Db2 => upsample(lut),
            Mode::Quant | Mode::Haar | Mode::Bior22 => Vec::new(),
        };
        Self { lut, upsampled }
    }

    /// Approximate fixed-point output for a split input.
    ///
    /// # Errors
    ///
    /// Returns [`LutError::AddressOutOfRange`] if the address does not fall
    /// inside the table's domain.
    pub fn reconstruct(&self, addr: Address) -> Result<i64> {
        let config = self.lut.config();
        let depth = config.depth();
        let out_of_range = || LutError::AddressOutOfRange { x: addr.join(depth) };
        match config.mode() {
            Mode::Quant | Mode::Haar => {
                let idx = self.index(addr.msb).ok_or_else(out_of_range)?;
                self.lut.coefficients().get(idx).copied().ok_or_else(out_of_range)
            }
            Mode::Bior22 => {
                let idx = self.index(addr.msb).ok_or_else(out_of_range)?;
                let (lut0, lut1) = self.bior_window(idx).ok_or_else(out_of_range)?;
                Ok(interpolate(lut0, lut1, addr.lsb, depth))
            }
            Mode::Db2 => {
                let offset = self
                    .lut
                    .domain()
                    .offset_of(addr.join(depth))
                    .ok_or_else(out_of_range)?;
                self.upsampled.get(offset).copied().ok_or_else(out_of_range)
            }
        }
    }

    /// Splits `x_fixed` at the table's depth and reconstructs it.
    ///
    /// # Errors
    ///
    /// Returns [`LutError::AddressOutOfRange`] if `x_fixed` lies outside the
    /// table's domain.
    pub fn evaluate(&self, x_fixed: i64) -> Result<i64> {
        self.reconstruct(split(x_fixed, self.lut.config().depth()))
    }

    /// Reconstructs every input of the table's domain, in order.
    ///
    /// # Errors
    ///
    /// Returns [`LutError::AddressOutOfRange`] if the table is too short to
    /// cover its own domain.
    pub fn reconstruct_domain(&self) -> Result<Vec<i64>> {
        self.lut.domain().points().map(|x| self.evaluate(x)).collect()
    }

    /// Row of `msb` in the coefficient buffer, if it is within the nominal table.
    fn index(&self, msb: i64) -> Option<usize> {
        let row = usize::try_from(msb - self.lut.base_msb()).ok()?;
        (row < self.lut.config().table_len()).then_some(row)
    }

    /// `(lut0[idx], lut1[idx])`: entries two and three past `idx`. Only a
    /// buffer shorter than `table_len + 3`, built through `Lut::from_parts`, wraps.
    fn bior_window(&self, idx: usize) -> Option<(i64, i64)> {
        let coeffs = self.lut.coefficients();
        if coeffs.is_empty() {
            return None;
        }
        let n = coeffs.len();
        Some((coeffs[(idx + 2) % n], coeffs[(idx + 3) % n]))
    }
}

/// Integer linear blend of two bior2.2 neighbors at fraction `lsb / 2^J`.
///
/// Both neighbors carry a `2^J` gain, so the weighted sum is divided by
/// `2^(2J)` with floor semantics.
#[inline]
#[must_use]
pub fn interpolate(lut0: i64, lut1: i64, lsb: i64, depth: u32) -> i64 {
    let span = 1i128 << depth;
    let lsb = i128::from(lsb);
    let blended = i128::from(lut0) * (span - lsb) + i128::from(lut1) * lsb;
    blended.div_euclid(span * span) as i64
}

/// Upsamples db2 coefficients to the domain length and re-encodes them.
fn upsample(lut: &Lut) -> Vec<i64> {
    let fractional_bits = lut.domain().format().fractional_bits();
    let real = to_real(lut.coefficients(), fractional_bits);
    let samples = upcoef(&real, crate::wavelet::Wavelet::Db2, lut.config().depth(), lut.domain().len());
    to_fixed(&samples, fractional_bits)
}
