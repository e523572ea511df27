//! Fixed-point encoding of real values.
//!
//! A value `x` is stored as `floor(x · 2^f)` where `f` is the number of
//! fractional bits. Decoding divides by `2^f`. The pair is lossy: encoding
//! rounds toward negative infinity, so `to_real(to_fixed(x)) <= x`.
//!
//! # Example
//!
//! ```
//! use wavelut::fixed::{to_fixed, to_real};
//!
//! assert_eq!(to_fixed(&[1.5, -0.1], 4), vec![24, -2]);
//! assert_eq!(to_real(&[24, -2], 4), vec![1.5, -0.125]);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{LutError, Result};

/// Largest input bit width whose full domain may be materialized.
pub const MAX_DOMAIN_BITS: u32 = 30;

/// Exact `2^exp` as an `f64`.
#[inline]
pub(crate) fn pow2(exp: i32) -> f64 {
    libm::ldexp(1.0, exp)
}

/// Encodes one real value at `fractional_bits` of precision.
///
/// Non-finite inputs follow Rust's saturating float-to-int cast: `NaN`
/// becomes 0 and infinities clamp to `i64::MIN`/`i64::MAX`.
#[inline]
#[must_use]
pub fn encode(value: f64, fractional_bits: u32) -> i64 {
    (value * pow2(fractional_bits as i32)).floor() as i64
}

/// Decodes one fixed-point value at `fractional_bits` of precision.
#[inline]
#[must_use]
pub fn decode(value: i64, fractional_bits: u32) -> f64 {
    value as f64 / pow2(fractional_bits as i32)
}

/// Applies [`encode`] element-wise.
#[must_use]
pub fn to_fixed(values: &[f64], fractional_bits: u32) -> Vec<i64> {
    values.iter().map(|&v| encode(v, fractional_bits)).collect()
}

/// Applies [`decode`] element-wise.
#[must_use]
pub fn to_real(values: &[i64], fractional_bits: u32) -> Vec<f64> {
    values.iter().map(|&v| decode(v, fractional_bits)).collect()
}

/// Input width and precision of a fixed-point domain.
///
/// Invariant: `bit_width > fractional_bits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixedPointFormat {
    bit_width: u32,
    fractional_bits: u32,
}

impl FixedPointFormat {
    /// Creates a validated format.
    ///
    /// # Errors
    ///
    /// Returns [`LutError::InvalidFormat`] if `bit_width <= fractional_bits`
    /// or `bit_width` exceeds [`MAX_DOMAIN_BITS`].
    pub fn new(bit_width: u32, fractional_bits: u32) -> Result<Self> {
        let reason = if bit_width <= fractional_bits {
            Some("bit width must exceed fractional bits")
        } else if bit_width > MAX_DOMAIN_BITS {
            Some("bit width exceeds the 30-bit domain limit")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(LutError::InvalidFormat {
                bit_width,
                fractional_bits,
                reason,
            }),
            None => Ok(Self {
                bit_width,
                fractional_bits,
            }),
        }
    }

    /// Total input bits.
    #[inline]
    #[must_use]
    pub const fn bit_width(&self) -> u32 {
        self.bit_width
    }

    /// Fractional bits.
    #[inline]
    #[must_use]
    pub const fn fractional_bits(&self) -> u32 {
        self.fractional_bits
    }

    /// Number of representable inputs, `2^bit_width`.
    #[inline]
    #[must_use]
    pub const fn domain_len(&self) -> usize {
        1usize << self.bit_width
    }

    /// Encodes a real value in this format.
    #[inline]
    #[must_use]
    pub fn to_fixed(&self, value: f64) -> i64 {
        encode(value, self.fractional_bits)
    }

    /// Decodes a fixed-point value in this format.
    #[inline]
    #[must_use]
    pub fn to_real(&self, value: i64) -> f64 {
        decode(value, self.fractional_bits)
    }
}

impl std::fmt::Display for FixedPointFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Q{}.{}", self.bit_width - self.fractional_bits, self.fractional_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_rounds_toward_negative_infinity() {
        assert_eq!(encode(0.99, 0), 0);
        assert_eq!(encode(-0.01, 0), -1);
        assert_eq!(encode(-1.0, 0), -1);
        // 0.3 * 8 = 2.4
        assert_eq!(encode(0.3, 3), 2);
        assert_eq!(encode(-0.3, 3), -3);
    }

    #[test]
    fn test_round_trip_is_lossy_downward() {
        let x = 0.123_456_789;
        let back = decode(encode(x, 12), 12);
        assert!(back <= x);
        assert!(x - back < pow2(-12));
        assert_ne!(back, x);
    }

    #[test]
    fn test_exact_grid_points_survive() {
        let grid: Vec<i64> = (-64..64).collect();
        assert_eq!(to_fixed(&to_real(&grid, 5), 5), grid);
    }

    #[test]
    fn test_non_finite_saturates_in_cast() {
        assert_eq!(encode(f64::NAN, 8), 0);
        assert_eq!(encode(f64::INFINITY, 8), i64::MAX);
        assert_eq!(encode(f64::NEG_INFINITY, 8), i64::MIN);
    }

    #[test]
    fn test_format_validation() {
        assert!(FixedPointFormat::new(16, 12).is_ok());
        assert!(FixedPointFormat::new(12, 12).is_err());
        assert!(FixedPointFormat::new(4, 8).is_err());
        assert!(FixedPointFormat::new(31, 12).is_err());
    }

    #[test]
    fn test_format_accessors() {
        let fmt = FixedPointFormat::new(16, 12).unwrap();
        assert_eq!(fmt.domain_len(), 65536);
        assert_eq!(fmt.to_fixed(1.0), 4096);
        assert_eq!(fmt.to_real(2048), 0.5);
        assert_eq!(fmt.to_string(), "Q4.12");
    }
}
