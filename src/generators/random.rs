//! Seeded pseudo-random sampling.
//!
//! Every draw is a pure function of its seed: there is no generator object
//! and no hidden state, so two calls with the same seed agree in any process
//! and in any order. Not suitable for anything security related.

const MULTIPLIER: u64 = 1_664_525;
const INCREMENT: u64 = 1_013_904_223;
const MODULUS: u64 = 1 << 32;

/// One linear-congruential step, `(a * seed + c) mod 2^32`, scaled into `[0, 1)`.
///
/// Negative seeds are reduced with Euclidean semantics, so the result is in
/// range for every `i64`.
pub fn seeded_random(seed: i64) -> f64 {
    // Two's-complement wrapping is congruent mod 2^64, hence mod 2^32.
    let state = MULTIPLIER
        .wrapping_mul(seed as u64)
        .wrapping_add(INCREMENT)
        & (MODULUS - 1);
    state as f64 / MODULUS as f64
}

/// `floor(seeded_random(seed) * bound)`, always within `0..bound`.
pub fn sample_below(seed: i64, bound: u32) -> u32 {
    let scaled = (seeded_random(seed) * f64::from(bound)).floor() as u32;
    scaled.min(bound.saturating_sub(1))
}

/// Derives a per-record seed as `id * multiplier + offset`.
///
/// Only the low 32 bits of a seed influence the draw, so wrapping is exact.
pub fn derive_seed(id: u64, multiplier: i64, offset: i64) -> i64 {
    (id as i64).wrapping_mul(multiplier).wrapping_add(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        assert_eq!(seeded_random(0), 1_013_904_223.0 / 4_294_967_296.0);
        assert_eq!(seeded_random(1), 0.23645552527159452);
        assert_eq!(seeded_random(42), 0.2523451747838408);
        assert_eq!(seeded_random(12345), 0.02040268573909998);
    }

    #[test]
    fn negative_seeds_stay_in_range() {
        assert_eq!(seeded_random(-1), 0.2356804204173386);
        let value = seeded_random(i64::MIN);
        assert!((0.0..1.0).contains(&value));
    }

    #[test]
    fn seeds_congruent_mod_2_pow_32_agree() {
        let base = 987_654;
        assert_eq!(seeded_random(base), seeded_random(base + (1 << 32)));
        assert_eq!(seeded_random(base), seeded_random(base - (1 << 32)));
    }

    #[test]
    fn sample_below_respects_bound() {
        for seed in 0..1_000 {
            assert!(sample_below(seed, 5) < 5);
            assert!(sample_below(seed, 24) < 24);
        }
    }

    #[test]
    fn derive_seed_matches_plain_arithmetic_for_small_ids() {
        assert_eq!(derive_seed(3, 9_301, 49_297), 3 * 9_301 + 49_297);
        assert_eq!(derive_seed(80_000, 73_939_133, 17), 80_000 * 73_939_133 + 17);
    }
}
