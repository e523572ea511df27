//! Contiguous fixed-point input domains.

use serde::{Deserialize, Serialize};

use crate::fixed::FixedPointFormat;

/// Every fixed-point input of a format, as a contiguous integer range.
///
/// Unsigned domains cover `[0, 2^bit_width)`; signed domains cover
/// `[-2^(bit_width-1), 2^(bit_width-1))`. In real terms these are
/// `[0, 2^(bit_width-f))` and `[-2^(bit_width-1-f), 2^(bit_width-1-f))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixedDomain {
    format: FixedPointFormat,
    start: i64,
}

impl FixedDomain {
    /// Non-negative domain `[0, 2^bit_width)`.
    #[must_use]
    pub const fn unsigned(format: FixedPointFormat) -> Self {
        Self { format, start: 0 }
    }

    /// Two's complement domain `[-2^(bit_width-1), 2^(bit_width-1))`.
    #[must_use]
    pub const fn signed(format: FixedPointFormat) -> Self {
        Self {
            format,
            start: -(1i64 << (format.bit_width() - 1)),
        }
    }

    /// Picks [`signed`](Self::signed) or [`unsigned`](Self::unsigned).
    #[must_use]
    pub const fn with_sign(format: FixedPointFormat, negative: bool) -> Self {
        if negative {
            Self::signed(format)
        } else {
            Self::unsigned(format)
        }
    }

    /// Governing format.
    #[inline]
    #[must_use]
    pub const fn format(&self) -> FixedPointFormat {
        self.format
    }

    /// First fixed-point input.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> i64 {
        self.start
    }

    /// Number of inputs, `2^bit_width`.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.format.domain_len()
    }

    /// Always false; a valid format has at least two inputs.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// One past the last fixed-point input.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> i64 {
        self.start + self.len() as i64
    }

    /// Position of `x` within the domain, if it belongs to it.
    #[inline]
    #[must_use]
    pub fn offset_of(&self, x: i64) -> Option<usize> {
        if x >= self.start && x < self.end() {
            Some((x - self.start) as usize)
        } else {
            None
        }
    }

    /// Fixed-point inputs in ascending order.
    pub fn points(&self) -> impl Iterator<Item = i64> {
        self.start..self.end()
    }

    /// Real values of every input, in domain order.
    #[must_use]
    pub fn reals(&self) -> Vec<f64> {
        let format = self.format;
        self.points().map(|x| format.to_real(x)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsigned_domain_bounds() {
        let fmt = FixedPointFormat::new(6, 2).unwrap();
        let d = FixedDomain::unsigned(fmt);
        assert_eq!(d.start(), 0);
        assert_eq!(d.end(), 64);
        let reals = d.reals();
        assert_eq!(reals[0], 0.0);
        assert_eq!(reals[63], 16.0 - 0.25);
    }

    #[test]
    fn test_signed_domain_bounds() {
        let fmt = FixedPointFormat::new(6, 2).unwrap();
        let d = FixedDomain::signed(fmt);
        assert_eq!(d.start(), -32);
        assert_eq!(d.end(), 32);
        let reals = d.reals();
        assert_eq!(reals[0], -8.0);
        assert_eq!(reals[63], 8.0 - 0.25);
    }

    #[test]
    fn test_offset_of() {
        let fmt = FixedPointFormat::new(4, 0).unwrap();
        let d = FixedDomain::signed(fmt);
        assert_eq!(d.offset_of(-8), Some(0));
        assert_eq!(d.offset_of(7), Some(15));
        assert_eq!(d.offset_of(8), None);
        assert_eq!(d.offset_of(-9), None);
    }
}
