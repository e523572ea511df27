//! Address/fraction decomposition of fixed-point inputs.
//!
//! Splitting at depth `J` turns an input `x` into a table address
//! `msb = x >> J` and an interpolation fraction `lsb = x mod 2^J`, so that a
//! table of `2^(bit_width - J)` entries can stand in for one of `2^bit_width`.
//!
//! ```
//! use wavelut::split::{split, Address};
//!
//! assert_eq!(split(0b1011_0110, 4), Address { msb: 0b1011, lsb: 0b0110 });
//! // Negative inputs use floor semantics: -1 = -1 * 16 + 15
//! assert_eq!(split(-1, 4), Address { msb: -1, lsb: 15 });
//! ```

/// Most/least significant parts of a fixed-point input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    /// Table address, `x >> J` (sign-extending).
    pub msb: i64,
    /// Fraction within the interval, in `[0, 2^J)`.
    pub lsb: i64,
}

impl Address {
    /// Recombines the parts: `msb · 2^J + lsb`.
    #[inline]
    #[must_use]
    pub const fn join(self, depth: u32) -> i64 {
        (self.msb << depth) + self.lsb
    }
}

/// Splits `x_fixed` at `depth` bits.
///
/// `depth` must be below 63; callers validate it through
/// [`CompressionConfig`](crate::config::CompressionConfig).
#[inline]
#[must_use]
pub const fn split(x_fixed: i64, depth: u32) -> Address {
    Address {
        msb: x_fixed >> depth,
        // Two's complement masking is floor-mod for a power-of-two divisor.
        lsb: x_fixed & ((1i64 << depth) - 1),
    }
}
