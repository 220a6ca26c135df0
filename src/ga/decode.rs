//! Decoding bit vectors into numbers.
//!
//! These helpers are for fitness evaluators; the engine itself never
//! interprets genes. Bit `i` carries weight `2^i` (little-endian).

/// Widest genotype [`decode_int`] can represent.
pub const MAX_DECODE_BITS: usize = 64;

/// Interprets `genes` as an unsigned little-endian integer.
///
/// The result lies in `[0, 2^L - 1]` where `L = genes.len()`. Returns `None`
/// when `L` exceeds [`MAX_DECODE_BITS`] and the value does not fit a `u64`.
///
/// ```
/// use u_bitga::ga::decode_int;
///
/// assert_eq!(decode_int(&[true, false, true]), Some(5));
/// assert_eq!(decode_int(&[]), Some(0));
/// assert_eq!(decode_int(&[false; 65]), None);
/// ```
pub fn decode_int(genes: &[bool]) -> Option<u64> {
    if genes.len() > MAX_DECODE_BITS {
        return None;
    }
    Some(
        genes
            .iter()
            .enumerate()
            .filter(|&(_, &bit)| bit)
            .fold(0u64, |acc, (i, _)| acc | (1u64 << i)),
    )
}

/// Interprets `genes` as a little-endian integer reduced modulo `modulus`.
///
/// Equal to `decode_int(genes) % modulus` wherever that is defined, and
/// defined for any genotype length.
///
/// # Panics
/// Panics if `modulus` is zero.
pub fn decode_mod(genes: &[bool], modulus: u64) -> u64 {
    assert!(modulus > 0, "modulus must be positive");
    let m = u128::from(modulus);
    let value = genes
        .iter()
        .rev()
        .fold(0u128, |acc, &bit| (acc * 2 + u128::from(bit)) % m);
    value as u64
}

/// Maps `genes` linearly onto `[min, max]`.
///
/// Computes `decode_int(genes) / (2^L - 1)` and scales it, so the zero
/// vector maps to `min`, the all-ones vector to `max`, and the step between
/// neighbouring values is `(max - min) / (2^L - 1)`. The ratio is built in
/// `f64` directly, so any `L` is accepted; beyond 53 bits the low-order
/// bits fall below `f64` precision.
///
/// An empty gene vector has a single representable value and maps to `min`.
///
/// ```
/// use u_bitga::ga::decode_float;
///
/// assert_eq!(decode_float(&[false, false], -1.0, 2.0), -1.0);
/// assert_eq!(decode_float(&[true, true], -1.0, 2.0), 2.0);
/// assert!(decode_float(&[true, false], -1.0, 2.0).abs() < 1e-12);
/// assert_eq!(decode_float(&[true; 80], 0.0, 1.0), 1.0);
/// ```
pub fn decode_float(genes: &[bool], min: f64, max: f64) -> f64 {
    if genes.is_empty() {
        return min;
    }
    // value / 2^L, accumulated from the least significant bit
    let fraction = genes
        .iter()
        .fold(0.0f64, |acc, &bit| (acc + f64::from(u8::from(bit))) * 0.5);
    // (2^L - 1) / 2^L
    let full_scale = 1.0 - (-(genes.len() as f64)).exp2();
    let normalized = fraction / full_scale;
    min + normalized * (max - min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bits_of(value: u64, len: usize) -> Vec<bool> {
        (0..len).map(|i| (value >> i) & 1 == 1).collect()
    }

    fn mask(len: usize) -> u64 {
        if len == 0 {
            0
        } else {
            u64::MAX >> (MAX_DECODE_BITS - len)
        }
    }

    // ---- decode_int ----

    #[test]
    fn test_decode_int_little_endian() {
        assert_eq!(decode_int(&[true]), Some(1));
        assert_eq!(decode_int(&[false, true]), Some(2));
        assert_eq!(decode_int(&[true, true, true]), Some(7));
        assert_eq!(decode_int(&[false, false, false, true]), Some(8));
    }

    #[test]
    fn test_decode_int_full_width() {
        assert_eq!(decode_int(&[true; 64]), Some(u64::MAX));
    }

    #[test]
    fn test_decode_int_too_wide_is_none() {
        assert_eq!(decode_int(&[false; 65]), None);
        assert_eq!(decode_int(&[true; 200]), None);
    }

    // ---- decode_mod ----

    #[test]
    fn test_decode_mod_wide_genotype() {
        // 2^70 - 1 = (2^70 - 1) mod 3 = 0, since 2^even = 1 mod 3
        assert_eq!(decode_mod(&[true; 70], 3), 0);
        // 2^80 mod 7: 2^3 = 1 mod 7, 80 = 3*26 + 2 -> 4
        let mut genes = vec![false; 81];
        genes[80] = true;
        assert_eq!(decode_mod(&genes, 7), 4);
    }

    #[test]
    fn test_decode_mod_empty() {
        assert_eq!(decode_mod(&[], 5), 0);
    }

    // ---- decode_float ----

    #[test]
    fn test_decode_float_endpoints() {
        for len in [1, 3, 16, 20, 64, 80, 2000] {
            assert_eq!(decode_float(&vec![false; len], 2.7, 7.5), 2.7);
            let top = decode_float(&vec![true; len], 2.7, 7.5);
            assert!((top - 7.5).abs() < 1e-12, "len {len}: {top}");
        }
    }

    #[test]
    fn test_decode_float_quantization_step() {
        // 3 bits -> 7 steps over [0, 7]
        for v in 0..8u64 {
            let x = decode_float(&bits_of(v, 3), 0.0, 7.0);
            assert!((x - v as f64).abs() < 1e-12, "{v} decoded to {x}");
        }
    }

    #[test]
    fn test_decode_float_beyond_64_bits() {
        // only the top bit set: 2^79 / (2^80 - 1) ~ 0.5
        let mut genes = vec![false; 80];
        genes[79] = true;
        let x = decode_float(&genes, 0.0, 1.0);
        assert!((x - 0.5).abs() < 1e-12, "got {x}");
        assert!(x.is_finite());
    }

    #[test]
    fn test_decode_float_empty_is_min() {
        assert_eq!(decode_float(&[], -3.0, 3.0), -3.0);
    }

    proptest! {
        #[test]
        fn prop_decode_int_inverts_bits(len in 1usize..=64, raw in any::<u64>()) {
            let value = raw & mask(len);
            prop_assert_eq!(decode_int(&bits_of(value, len)), Some(value));
        }

        #[test]
        fn prop_decode_mod_matches_remainder(len in 0usize..=64, raw in any::<u64>(), m in 1u64..10_000) {
            let genes = bits_of(raw & mask(len), len);
            prop_assert_eq!(Some(decode_mod(&genes, m)), decode_int(&genes).map(|v| v % m));
        }

        #[test]
        fn prop_decode_float_matches_integer_ratio(len in 1usize..=20, raw in any::<u64>()) {
            let value = raw & mask(len);
            let x = decode_float(&bits_of(value, len), 0.0, 1.0);
            prop_assert!((x - value as f64 / mask(len) as f64).abs() < 1e-12);
        }

        #[test]
        fn prop_decode_float_monotonic(len in 1usize..=20, a in any::<u64>(), b in any::<u64>()) {
            let (a, b) = (a & mask(len), b & mask(len));
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let x_lo = decode_float(&bits_of(lo, len), -5.0, 5.0);
            let x_hi = decode_float(&bits_of(hi, len), -5.0, 5.0);
            prop_assert!(x_lo <= x_hi);
            prop_assert!((-5.0..=5.0).contains(&x_lo));
            prop_assert!((-5.0..=5.0).contains(&x_hi));
        }
    }
}
