//! Approximation-branch discrete wavelet transforms.
//!
//! Only the low-pass half of each filter bank is needed: [`downcoef`]
//! repeatedly convolves with the decomposition low-pass filter and keeps every
//! second sample, [`upcoef`] repeatedly upsamples and convolves with the
//! reconstruction low-pass filter. Signal edges use smooth padding, a
//! first-order linear extrapolation from the two outermost samples.
//!
//! Output lengths follow the full-convolution convention: one level maps `n`
//! samples to `(n + F - 1) / 2` coefficients for a filter of length `F`, and
//! reconstruction maps `n` coefficients to `2n + F - 2` samples.

use serde::{Deserialize, Serialize};

const HAAR_LO: [f64; 2] = [0.707_106_781_186_547_6, 0.707_106_781_186_547_6];

const BIOR22_DEC_LO: [f64; 6] = [
    0.0,
    -0.176_776_695_296_636_9,
    0.353_553_390_593_273_8,
    1.060_660_171_779_821_4,
    0.353_553_390_593_273_8,
    -0.176_776_695_296_636_9,
];

const BIOR22_REC_LO: [f64; 6] = [
    0.0,
    0.353_553_390_593_273_8,
    0.707_106_781_186_547_6,
    0.353_553_390_593_273_8,
    0.0,
    0.0,
];

const DB2_DEC_LO: [f64; 4] = [
    -0.129_409_522_551_260_37,
    0.224_143_868_042_013_4,
    0.836_516_303_737_807_9,
    0.482_962_913_144_534_16,
];

const DB2_REC_LO: [f64; 4] = [
    0.482_962_913_144_534_16,
    0.836_516_303_737_807_9,
    0.224_143_868_042_013_4,
    -0.129_409_522_551_260_37,
];

/// Supported filter banks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wavelet {
    /// Two-tap orthonormal Haar wavelet.
    Haar,
    /// Biorthogonal (5,3) spline wavelet.
    Bior22,
    /// Daubechies wavelet with two vanishing moments.
    Db2,
}

impl Wavelet {
    /// Decomposition low-pass filter.
    #[must_use]
    pub const fn dec_lo(self) -> &'static [f64] {
        match self {
            Wavelet::Haar => &HAAR_LO,
            Wavelet::Bior22 => &BIOR22_DEC_LO,
            Wavelet::Db2 => &DB2_DEC_LO,
        }
    }

    /// Reconstruction low-pass filter.
    #[must_use]
    pub const fn rec_lo(self) -> &'static [f64] {
        match self {
            Wavelet::Haar => &HAAR_LO,
            Wavelet::Bior22 => &BIOR22_REC_LO,
            Wavelet::Db2 => &DB2_REC_LO,
        }
    }

    /// Shared filter length of the bank.
    #[must_use]
    pub const fn filter_len(self) -> usize {
        self.dec_lo().len()
    }
}

/// Coefficient count after one decomposition level of `n` samples.
#[inline]
#[must_use]
pub const fn coeff_len(n: usize, filter_len: usize) -> usize {
    (n + filter_len - 1) / 2
}

/// Sample count after one reconstruction level of `n` coefficients.
#[inline]
#[must_use]
pub const fn rec_len(n: usize, filter_len: usize) -> usize {
    2 * n + filter_len - 2
}

/// Reads `input[idx]`, extrapolating linearly past either edge.
#[inline]
fn smooth_at(input: &[f64], idx: isize) -> f64 {
    let n = input.len() as isize;
    if n == 1 {
        return input[0];
    }
    if idx < 0 {
        let k = -idx as f64;
        input[0] + k * (input[0] - input[1])
    } else if idx >= n {
        let last = (n - 1) as usize;
        let k = (idx - n + 1) as f64;
        input[last] + k * (input[last] - input[last - 1])
    } else {
        input[idx as usize]
    }
}

/// One level of smooth-padded convolution followed by decimation by two.
///
/// Output `o` is `Σ_j filter[j] · x[2o + 1 - j]`, summed in ascending `j`.
fn downsample_smooth(input: &[f64], filter: &[f64]) -> Vec<f64> {
    downsample_smooth_to(input, filter, coeff_len(input.len(), filter.len()))
}

/// [`downsample_smooth`] evaluated for `out_len` outputs; outputs past the
/// natural length read further into the smooth extension.
fn downsample_smooth_to(input: &[f64], filter: &[f64], out_len: usize) -> Vec<f64> {
    (0..out_len)
        .map(|o| {
            let i = (2 * o + 1) as isize;
            filter
                .iter()
                .enumerate()
                .fold(0.0, |sum, (j, &h)| sum + h * smooth_at(input, i - j as isize))
        })
        .collect()
}

/// One level of zero-upsampling followed by a full convolution.
fn upsample_full(input: &[f64], filter: &[f64]) -> Vec<f64> {
    let n = input.len();
    let half = filter.len() / 2;
    let mut out = vec![0.0; rec_len(n, filter.len())];
    for t in 0..(n + half - 1) {
        let lo = t.saturating_sub(n - 1);
        let hi = t.min(half - 1);
        let (mut even, mut odd) = (0.0, 0.0);
        for j in lo..=hi {
            even += filter[2 * j] * input[t - j];
            odd += filter[2 * j + 1] * input[t - j];
        }
        out[2 * t] = even;
        out[2 * t + 1] = odd;
    }
    out
}

/// Approximation coefficients of `data` after `level` decomposition levels.
///
/// `level == 0` returns the input unchanged.
#[must_use]
pub fn downcoef(data: &[f64], wavelet: Wavelet, level: u32) -> Vec<f64> {
    let filter = wavelet.dec_lo();
    let mut coeffs = data.to_vec();
    for _ in 0..level {
        if coeffs.is_empty() {
            break;
        }
        coeffs = downsample_smooth(&coeffs, filter);
    }
    coeffs
}

/// Like [`downcoef`], but the last level produces at least `min_len`
/// coefficients by continuing the convolution into the smooth extension.
///
/// Coefficients within the natural length are identical to [`downcoef`]'s.
#[must_use]
pub fn downcoef_padded(data: &[f64], wavelet: Wavelet, level: u32, min_len: usize) -> Vec<f64> {
    if data.is_empty() {
        return Vec::new();
    }
    if level == 0 {
        let n = data.len().max(min_len);
        return (0..n).map(|i| smooth_at(data, i as isize)).collect();
    }
    let filter = wavelet.dec_lo();
    let coarse = downcoef(data, wavelet, level - 1);
    let out_len = coeff_len(coarse.len(), filter.len()).max(min_len);
    downsample_smooth_to(&coarse, filter, out_len)
}

/// Reconstructs a signal from approximation coefficients alone.
///
/// After `level` reconstruction levels, when `take > 0` and the result is
/// longer than `take`, the central `take` samples are kept; an odd surplus
/// trims one more sample from the right.
#[must_use]
pub fn upcoef(coeffs: &[f64], wavelet: Wavelet, level: u32, take: usize) -> Vec<f64> {
    let filter = wavelet.rec_lo();
    let mut rec = coeffs.to_vec();
    for _ in 0..level {
        if rec.is_empty() {
            break;
        }
        rec = upsample_full(&rec, filter);
    }
    if take > 0 && take < rec.len() {
        let surplus = rec.len() - take;
        let left = surplus / 2;
        rec.drain(..left);
        rec.truncate(take);
    }
    rec
}
