//! Optimal parameter calculation for Bloom filters.
//!
//! # Mathematical Background
//!
//! Given:
//! - `n`: Expected number of elements
//! - `p`: Target false positive rate
//!
//! Optimal parameters:
//! - `m = ceil(-n × ln(p) / (ln 2)²)`, at least 1 (bits in filter)
//! - `k = round((m/n) × ln 2)`, at least 1 (number of hash functions)
//!
//! Expected false positive rate after `n` insertions:
//! - `p = (1 - e^(-kn/m))^k`
//!
//! Clamping keeps tiny `n` or `p` close to 1 from producing a zero-sized structure:
//! `p = 1` yields a single bit checked by a single hash function.
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/Time Trade-offs in Hash Coding with Allowable Errors"

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

use crate::error::{Result, SeedBloomError};
use std::f64::consts::LN_2;

/// (ln 2)² ≈ 0.4804530139182014
const LN2_SQUARED: f64 = LN_2 * LN_2;

/// Smallest bit array a filter can own.
pub const MIN_FILTER_BITS: usize = 1;

/// Largest bit array a filter can own.
///
/// Hash values are masked to 31 bits before reduction, so bits at or past `2^31 - 1`
/// could never be addressed.
pub const MAX_FILTER_BITS: usize = i32::MAX as usize;

/// Minimum number of hash functions.
pub const MIN_HASH_FUNCTIONS: usize = 1;

/// Check the `(n, p)` pair a filter is constructed from.
///
/// # Errors
///
/// - [`SeedBloomError::InvalidItemCount`] if `n <= 0`
/// - [`SeedBloomError::FalsePositiveRateOutOfBounds`] if `p` is NaN or not in `(0, 1]`
///
/// # Examples
///
/// ```
/// use seedbloom::core::params::validate_inputs;
///
/// assert!(validate_inputs(100, 0.01).is_ok());
/// assert!(validate_inputs(100, 1.0).is_ok());
/// assert!(validate_inputs(-42, 0.01).is_err());
/// assert!(validate_inputs(100, 1.01).is_err());
/// assert!(validate_inputs(100, f64::NAN).is_err());
/// ```
pub fn validate_inputs(n: i64, fp_rate: f64) -> Result<()> {
    if n <= 0 {
        return Err(SeedBloomError::invalid_item_count(n));
    }

    // Written so that NaN fails the range test.
    if !(fp_rate > 0.0 && fp_rate <= 1.0) {
        return Err(SeedBloomError::fp_rate_out_of_bounds(fp_rate));
    }

    Ok(())
}

/// Calculate the number of bits for `n` items at false positive rate `fp_rate`.
///
/// Implements `m = ceil(-n × ln(p) / (ln 2)²)`, clamped to at least [`MIN_FILTER_BITS`].
///
/// # Errors
///
/// - Any error from [`validate_inputs`]
/// - [`SeedBloomError::InvalidFilterSize`] if the result exceeds [`MAX_FILTER_BITS`]
///
/// # Examples
///
/// ```
/// use seedbloom::core::params::optimal_bit_count;
///
/// assert_eq!(optimal_bit_count(1000, 0.01).unwrap(), 9586);
/// assert_eq!(optimal_bit_count(100, 0.8).unwrap(), 47);
/// assert_eq!(optimal_bit_count(100, 1.0).unwrap(), 1);
/// ```
pub fn optimal_bit_count(n: i64, fp_rate: f64) -> Result<usize> {
    validate_inputs(n, fp_rate)?;

    let m = (-(n as f64) * fp_rate.ln() / LN2_SQUARED).ceil();

    if m > MAX_FILTER_BITS as f64 {
        // `as` saturates, which is what we want to report here.
        return Err(SeedBloomError::invalid_filter_size(m as usize));
    }

    Ok((m as usize).max(MIN_FILTER_BITS))
}

/// Calculate the number of hash functions for an `m`-bit filter holding `n` items.
///
/// Implements `k = round((m/n) × ln 2)`, clamped to at least [`MIN_HASH_FUNCTIONS`].
/// Rounding is to nearest with halves away from zero; `k` is never truncated.
///
/// # Errors
///
/// - [`SeedBloomError::InvalidFilterSize`] if `m == 0`
/// - [`SeedBloomError::InvalidItemCount`] if `n <= 0`
///
/// # Examples
///
/// ```
/// use seedbloom::core::params::optimal_hash_count;
///
/// assert_eq!(optimal_hash_count(9586, 1000).unwrap(), 7);
/// assert_eq!(optimal_hash_count(47, 100).unwrap(), 1);
/// ```
pub fn optimal_hash_count(m: usize, n: i64) -> Result<usize> {
    if m == 0 {
        return Err(SeedBloomError::invalid_filter_size(m));
    }

    if n <= 0 {
        return Err(SeedBloomError::invalid_item_count(n));
    }

    let k = ((m as f64 / n as f64) * LN_2).round() as usize;

    Ok(k.max(MIN_HASH_FUNCTIONS))
}

/// Calculate `(m, k)` for `n` items at false positive rate `fp_rate`.
///
/// # Errors
///
/// See [`optimal_bit_count`].
///
/// # Examples
///
/// ```
/// use seedbloom::core::params::calculate_filter_params;
///
/// assert_eq!(calculate_filter_params(1000, 0.01).unwrap(), (9586, 7));
/// ```
pub fn calculate_filter_params(n: i64, fp_rate: f64) -> Result<(usize, usize)> {
    let m = optimal_bit_count(n, fp_rate)?;
    let k = optimal_hash_count(m, n)?;
    Ok((m, k))
}

/// Theoretical false positive rate after inserting `n` items.
///
/// Implements `p = (1 - e^(-kn/m))^k`. An empty filter has rate 0.
///
/// # Errors
///
/// - [`SeedBloomError::InvalidFilterSize`] if `m == 0`
/// - [`SeedBloomError::InvalidHashCount`] if `k == 0`
///
/// # Examples
///
/// ```
/// use seedbloom::core::params::expected_fp_rate;
///
/// let fp = expected_fp_rate(9586, 1000, 7).unwrap();
/// assert!((fp - 0.01).abs() < 0.001);
/// ```
pub fn expected_fp_rate(m: usize, n: usize, k: usize) -> Result<f64> {
    if m == 0 {
        return Err(SeedBloomError::invalid_filter_size(m));
    }

    if k == 0 {
        return Err(SeedBloomError::invalid_hash_count(k));
    }

    if n == 0 {
        return Ok(0.0);
    }

    let k_f64 = k as f64;
    let prob_bit_one = 1.0 - (-(k_f64 * n as f64) / m as f64).exp();

    Ok(prob_bit_one.powf(k_f64).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ln2_squared_constant() {
        let expected = 0.480_453_013_918_201_4;
        assert!((LN2_SQUARED - expected).abs() < 1e-10);
    }

    #[test]
    fn test_reference_shape_1000_items_1_percent() {
        assert_eq!(optimal_bit_count(1000, 0.01).unwrap(), 9586);
        assert_eq!(optimal_hash_count(9586, 1000).unwrap(), 7);
    }

    #[test]
    fn test_hash_count_clamped_to_one() {
        let (m, k) = calculate_filter_params(100, 0.8).unwrap();
        assert_eq!(m, 47);
        assert_eq!(k, 1);
    }

    #[test]
    fn test_fp_rate_one_gives_single_bit() {
        assert_eq!(calculate_filter_params(1, 1.0).unwrap(), (1, 1));
        assert_eq!(calculate_filter_params(1_000_000, 1.0).unwrap(), (1, 1));
    }

    #[test]
    fn test_various_fp_rates() {
        let test_cases = vec![
            (1000, 0.1, 4793, 3),
            (1000, 0.01, 9586, 7),
            (1000, 0.001, 14378, 10),
        ];

        for (n, fp, expected_m, expected_k) in test_cases {
            let (m, k) = calculate_filter_params(n, fp).unwrap();
            assert_eq!(m, expected_m, "n={}, fp={}", n, fp);
            assert_eq!(k, expected_k, "n={}, fp={}", n, fp);
        }
    }

    #[test]
    fn test_zero_and_negative_items_rejected() {
        for n in [0, -1, -42, i64::MIN] {
            let err = optimal_bit_count(n, 0.01).unwrap_err();
            assert_eq!(err, SeedBloomError::InvalidItemCount { count: n });
        }
    }

    #[test]
    fn test_fp_rate_out_of_range_rejected() {
        for p in [0.0, -1.0, 1.01, 2.0, f64::INFINITY, f64::NEG_INFINITY] {
            let err = optimal_bit_count(100, p).unwrap_err();
            assert!(
                matches!(err, SeedBloomError::FalsePositiveRateOutOfBounds { .. }),
                "p={} should be rejected",
                p
            );
        }
        assert!(optimal_bit_count(100, f64::NAN).is_err());
    }

    #[test]
    fn test_bit_count_beyond_hash_range_rejected() {
        let err = optimal_bit_count(i64::MAX, 0.01).unwrap_err();
        assert!(matches!(err, SeedBloomError::InvalidFilterSize { .. }));
    }

    #[test]
    fn test_largest_addressable_filter_allowed() {
        // ~9.59 bits per item at 1%, so this lands just below the cap.
        let n = (MAX_FILTER_BITS as f64 / 9.6) as i64;
        let m = optimal_bit_count(n, 0.01).unwrap();
        assert!(m <= MAX_FILTER_BITS);
    }

    #[test]
    fn test_optimal_hash_count_invalid_inputs() {
        assert!(optimal_hash_count(0, 1000).is_err());
        assert!(optimal_hash_count(1000, 0).is_err());
        assert!(optimal_hash_count(1000, -5).is_err());
    }

    #[test]
    fn test_optimal_hash_count_rounds_to_nearest() {
        // 1000/100 × ln2 = 6.93 → 7, 500/100 × ln2 = 3.47 → 3
        assert_eq!(optimal_hash_count(1000, 100).unwrap(), 7);
        assert_eq!(optimal_hash_count(500, 100).unwrap(), 3);
        // 2000/100 × ln2 = 13.86 → 14, truncation would give 13
        assert_eq!(optimal_hash_count(2000, 100).unwrap(), 14);
    }

    #[test]
    fn test_no_upper_clamp_on_hash_count() {
        let k = optimal_hash_count(100_000, 10).unwrap();
        assert_eq!(k, 6931);
    }

    #[test]
    fn test_expected_fp_rate_matches_target() {
        let (m, k) = calculate_filter_params(1000, 0.01).unwrap();
        let actual = expected_fp_rate(m, 1000, k).unwrap();
        assert!((actual - 0.01).abs() / 0.01 < 0.1);
    }

    #[test]
    fn test_expected_fp_rate_edges() {
        assert_eq!(expected_fp_rate(1000, 0, 7).unwrap(), 0.0);
        assert!(expected_fp_rate(1000, 1000, 7).unwrap() > 0.5);
        assert!(expected_fp_rate(0, 10, 7).is_err());
        assert!(expected_fp_rate(1000, 10, 0).is_err());
    }
}
