//! Error types for seedbloom operations.
//!
//! Every fallible operation in the crate returns [`Result<T>`], whose error type is
//! [`SeedBloomError`]. Errors fall into three families:
//!
//! - **Invalid parameters**: bad `n`, `p`, `m` or `k` at construction time. These are always
//!   detected before any allocation, so a filter is never left partially constructed.
//! - **Encoding**: a value has no canonical byte form (for example a NaN float).
//! - **Corrupt data**: raw parts or persisted bytes do not describe a valid filter.
//!
//! None of them are transient. Retrying the same call with the same input fails the same way.
//!
//! # Error Propagation
//!
//! ```
//! use seedbloom::{Result, SeedBloomError};
//! use seedbloom::core::params::{optimal_bit_count, optimal_hash_count};
//!
//! fn filter_shape(n: i64, p: f64) -> Result<(usize, usize)> {
//!     let m = optimal_bit_count(n, p)?;
//!     let k = optimal_hash_count(m, n)?;
//!     Ok((m, k))
//! }
//! # assert_eq!(filter_shape(1000, 0.01).unwrap(), (9586, 7));
//! # assert!(filter_shape(0, 0.01).unwrap_err().is_invalid_parameter());
//! ```

#![allow(clippy::module_name_repetitions)]

use std::fmt;

/// Result type alias for seedbloom operations.
pub type Result<T> = std::result::Result<T, SeedBloomError>;

/// Errors that can occur while building, feeding or restoring a Bloom filter.
///
/// `Clone` and `PartialEq` are derived so tests can compare errors directly.
#[derive(Debug, Clone, PartialEq)]
pub enum SeedBloomError {
    /// Expected item count `n` is not positive.
    InvalidItemCount {
        /// The count that was provided.
        count: i64,
    },

    /// False positive rate is NaN or outside `(0, 1]`.
    FalsePositiveRateOutOfBounds {
        /// The rate that was provided.
        fp_rate: f64,
    },

    /// Bit array size is zero or larger than the hash family can address.
    InvalidFilterSize {
        /// The size in bits.
        size: usize,
    },

    /// Number of hash functions is zero.
    InvalidHashCount {
        /// The count that was provided.
        count: usize,
    },

    /// A value could not be converted to its canonical byte form.
    EncodingError {
        /// Why the value was rejected.
        message: String,
    },

    /// Raw parts or serialized bytes do not describe a valid filter.
    CorruptData {
        /// What failed validation.
        message: String,
    },
}

impl fmt::Display for SeedBloomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidItemCount { count } => {
                write!(
                    f,
                    "Invalid item count: {}. Expected items must be greater than 0.",
                    count
                )
            }
            Self::FalsePositiveRateOutOfBounds { fp_rate } => {
                write!(
                    f,
                    "False positive rate {} is out of bounds. Must be in range (0, 1].",
                    fp_rate
                )
            }
            Self::InvalidFilterSize { size } => {
                write!(
                    f,
                    "Invalid filter size: {} bits. Must be in range [1, {}].",
                    size,
                    crate::core::params::MAX_FILTER_BITS
                )
            }
            Self::InvalidHashCount { count } => {
                write!(
                    f,
                    "Invalid hash function count: {}. At least one hash function is required.",
                    count
                )
            }
            Self::EncodingError { message } => {
                write!(f, "Value cannot be encoded: {}.", message)
            }
            Self::CorruptData { message } => {
                write!(f, "Corrupt filter data: {}.", message)
            }
        }
    }
}

impl std::error::Error for SeedBloomError {}

impl SeedBloomError {
    /// Create an `InvalidItemCount` error.
    #[must_use]
    pub fn invalid_item_count(count: i64) -> Self {
        Self::InvalidItemCount { count }
    }

    /// Create a `FalsePositiveRateOutOfBounds` error.
    #[must_use]
    pub fn fp_rate_out_of_bounds(fp_rate: f64) -> Self {
        Self::FalsePositiveRateOutOfBounds { fp_rate }
    }

    /// Create an `InvalidFilterSize` error.
    #[must_use]
    pub fn invalid_filter_size(size: usize) -> Self {
        Self::InvalidFilterSize { size }
    }

    /// Create an `InvalidHashCount` error.
    #[must_use]
    pub fn invalid_hash_count(count: usize) -> Self {
        Self::InvalidHashCount { count }
    }

    /// Create an `EncodingError`.
    #[must_use]
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::EncodingError {
            message: message.into(),
        }
    }

    /// Create a `CorruptData` error.
    #[must_use]
    pub fn corrupt_data(message: impl Into<String>) -> Self {
        Self::CorruptData {
            message: message.into(),
        }
    }

    /// Whether this error rejects a construction parameter (`n`, `p`, `m` or `k`).
    ///
    /// ```
    /// use seedbloom::BloomFilter;
    ///
    /// let err = BloomFilter::new(100, 1.01).unwrap_err();
    /// assert!(err.is_invalid_parameter());
    /// ```
    #[must_use]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            Self::InvalidItemCount { .. }
                | Self::FalsePositiveRateOutOfBounds { .. }
                | Self::InvalidFilterSize { .. }
                | Self::InvalidHashCount { .. }
        )
    }

    /// Whether this error was raised while encoding a value.
    #[must_use]
    pub fn is_encoding_error(&self) -> bool {
        matches!(self, Self::EncodingError { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_item_count() {
        let err = SeedBloomError::invalid_item_count(-42);
        let display = format!("{err}");
        assert!(display.contains("-42"));
        assert!(display.contains("greater than 0"));
    }

    #[test]
    fn test_error_display_fp_rate_out_of_bounds() {
        let err = SeedBloomError::fp_rate_out_of_bounds(1.5);
        let display = format!("{err}");
        assert!(display.contains("1.5"));
        assert!(display.contains("(0, 1]"));
    }

    #[test]
    fn test_error_display_invalid_filter_size() {
        let err = SeedBloomError::invalid_filter_size(0);
        let display = format!("{err}");
        assert!(display.contains("0 bits"));
        assert!(display.contains(&crate::core::params::MAX_FILTER_BITS.to_string()));
    }

    #[test]
    fn test_error_display_encoding() {
        let err = SeedBloomError::encoding("NaN has no canonical form");
        let display = format!("{err}");
        assert!(display.contains("cannot be encoded"));
        assert!(display.contains("NaN"));
    }

    #[test]
    fn test_error_display_corrupt_data() {
        let err = SeedBloomError::corrupt_data("seed 3 at position 2");
        assert!(format!("{err}").contains("seed 3 at position 2"));
    }

    #[test]
    fn test_error_classification() {
        assert!(SeedBloomError::invalid_item_count(0).is_invalid_parameter());
        assert!(SeedBloomError::fp_rate_out_of_bounds(0.0).is_invalid_parameter());
        assert!(SeedBloomError::invalid_filter_size(0).is_invalid_parameter());
        assert!(SeedBloomError::invalid_hash_count(0).is_invalid_parameter());

        assert!(!SeedBloomError::encoding("x").is_invalid_parameter());
        assert!(SeedBloomError::encoding("x").is_encoding_error());
        assert!(!SeedBloomError::corrupt_data("x").is_invalid_parameter());
        assert!(!SeedBloomError::corrupt_data("x").is_encoding_error());
    }

    #[test]
    fn test_error_implements_std_error() {
        let _err: Box<dyn std::error::Error> = Box::new(SeedBloomError::encoding("test"));
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn inner() -> Result<()> {
            Err(SeedBloomError::invalid_item_count(0))
        }

        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }

        assert_eq!(outer(), Err(SeedBloomError::InvalidItemCount { count: 0 }));
    }
}
