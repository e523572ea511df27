//! Property-based tests for the fixed-point codec, splitter and serializer.
//!
//! Uses proptest to check the encoding laws hold for arbitrary inputs.

use proptest::prelude::*;
use wavelut::fixed::{decode, encode, to_fixed, to_real};
use wavelut::reconstruct::interpolate;
use wavelut::serialize::{pack, unpack};
use wavelut::split::split;

// =============================================================================
// Fixed-point Encoding
// =============================================================================

proptest! {
    /// to_fixed(x) <= x · 2^f < to_fixed(x) + 1
    #[test]
    fn prop_encode_is_floor(x in -1.0e6f64..1.0e6, f in 0u32..20) {
        let scaled = x * f64::from(1u32 << f);
        let v = encode(x, f) as f64;
        prop_assert!(v <= scaled);
        prop_assert!(scaled < v + 1.0);
    }

    /// Decoding never overshoots the original value.
    #[test]
    fn prop_round_trip_rounds_down(x in -1.0e3f64..1.0e3, f in 0u32..24) {
        let back = decode(encode(x, f), f);
        prop_assert!(back <= x);
        prop_assert!(x - back < 1.0 / f64::from(1u32 << f) + 1e-12);
    }

    /// Integers on the grid survive decode-then-encode exactly.
    #[test]
    fn prop_grid_values_are_fixed_points(v in proptest::collection::vec(-1i64 << 40..1i64 << 40, 0..32), f in 0u32..12) {
        prop_assert_eq!(to_fixed(&to_real(&v, f), f), v);
    }
}

// =============================================================================
// Domain Splitting
// =============================================================================

proptest! {
    /// msb · 2^J + lsb = v and 0 <= lsb < 2^J
    #[test]
    fn prop_split_recombines(v in -(1i64 << 40)..(1i64 << 40), depth in 0u32..40) {
        let a = split(v, depth);
        prop_assert_eq!(a.msb * (1i64 << depth) + a.lsb, v);
        prop_assert!(a.lsb >= 0);
        prop_assert!(a.lsb < 1i64 << depth);
    }

    /// msb is floor division by 2^J.
    #[test]
    fn prop_split_msb_is_floor_div(v in -(1i64 << 40)..(1i64 << 40), depth in 0u32..40) {
        prop_assert_eq!(split(v, depth).msb, v.div_euclid(1i64 << depth));
    }
}

// =============================================================================
// Serialization
// =============================================================================

fn width() -> impl Strategy<Value = u32> {
    prop_oneof![Just(8u32), Just(16), Just(24), Just(32), Just(48), Just(64)]
}

proptest! {
    /// Signed values within the width survive pack then unpack.
    #[test]
    fn prop_pack_unpack_round_trip(w in width(), seed in proptest::collection::vec(any::<i64>(), 0..64)) {
        let half = 1i128 << (w - 1);
        let table: Vec<i64> = seed
            .iter()
            .map(|&s| (i128::from(s).rem_euclid(2 * half) - half) as i64)
            .collect();
        let bytes = pack(&table, w).unwrap();
        prop_assert_eq!(bytes.len(), table.len() * (w as usize / 8));
        prop_assert_eq!(unpack(&bytes, w).unwrap(), table);
    }

    /// Each entry is its value mod 2^W, least significant byte first.
    #[test]
    fn prop_pack_is_little_endian_mod(w in width(), v in any::<i64>()) {
        let bytes = pack(&[v], w).unwrap();
        let mut le = [0u8; 8];
        le[..bytes.len()].copy_from_slice(&bytes);
        let expected = i128::from(v).rem_euclid(1i128 << w);
        prop_assert_eq!(i128::from(u64::from_le_bytes(le)), expected);
    }
}

// =============================================================================
// Interpolation
// =============================================================================

proptest! {
    /// The blend of a constant pair is the constant scaled down by 2^J.
    #[test]
    fn prop_interpolate_constant(c in -(1i64 << 30)..(1i64 << 30), depth in 0u32..12, frac in 0i64..4096) {
        let lsb = frac % (1i64 << depth);
        prop_assert_eq!(interpolate(c, c, lsb, depth), c.div_euclid(1i64 << depth));
    }

    /// The blend lies between the two scaled endpoints.
    #[test]
    fn prop_interpolate_bounded(a in -(1i64 << 30)..(1i64 << 30), b in -(1i64 << 30)..(1i64 << 30), depth in 0u32..12, frac in 0i64..4096) {
        let span = 1i64 << depth;
        let lsb = frac % span;
        let y = interpolate(a, b, lsb, depth);
        let lo = a.min(b).div_euclid(span);
        let hi = a.max(b).div_euclid(span);
        prop_assert!(lo <= y && y <= hi);
    }
}
