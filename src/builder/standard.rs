//! Builder for [`BloomFilter`].
//!
//! # Type-State Pattern
//!
//! Both sizing inputs are required, and the builder only offers `build` once they are set:
//!
//! ```text
//! Initial → WithItems → Complete → BloomFilter
//!     ↓         ↓           ↓
//!   .expected_items()  .false_positive_rate()  .build()
//! ```
//!
//! # Examples
//!
//! ```
//! use seedbloom::builder::BloomFilterBuilder;
//!
//! let filter = BloomFilterBuilder::new()
//!     .expected_items(10_000)
//!     .false_positive_rate(0.01)
//!     .build()
//!     .unwrap();
//!
//! assert!(filter.is_empty());
//! ```
//!
//! Forgetting a required input is a compile error:
//!
//! ```compile_fail
//! use seedbloom::builder::BloomFilterBuilder;
//!
//! let filter = BloomFilterBuilder::new()
//!     .expected_items(10_000)
//!     .build();
//! ```

#![allow(clippy::cast_precision_loss)]

use crate::core::params;
use crate::error::Result;
use crate::filter::BloomFilter;
use std::marker::PhantomData;

/// Type-state marker: no parameters set.
pub struct Initial;

/// Type-state marker: item count is set.
pub struct WithItems;

/// Type-state marker: all required parameters set.
pub struct Complete;

/// Builder for [`BloomFilter`] with type-state guarantees.
///
/// Values are validated by `build`, not by the setters, so every rejection surfaces as the
/// same error [`BloomFilter::new`] would return.
pub struct BloomFilterBuilder<State> {
    expected_items: i64,
    fp_rate: f64,
    _state: PhantomData<State>,
}

impl BloomFilterBuilder<Initial> {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            expected_items: 0,
            fp_rate: 0.0,
            _state: PhantomData,
        }
    }

    /// Set the expected number of items, `n`. Must be positive.
    #[must_use]
    pub fn expected_items(self, items: i64) -> BloomFilterBuilder<WithItems> {
        BloomFilterBuilder {
            expected_items: items,
            fp_rate: self.fp_rate,
            _state: PhantomData,
        }
    }
}

impl BloomFilterBuilder<WithItems> {
    /// Set the target false positive rate, `p`. Must be in `(0, 1]`.
    #[must_use]
    pub fn false_positive_rate(self, fp_rate: f64) -> BloomFilterBuilder<Complete> {
        BloomFilterBuilder {
            expected_items: self.expected_items,
            fp_rate,
            _state: PhantomData,
        }
    }
}

impl BloomFilterBuilder<Complete> {
    /// Build the filter.
    ///
    /// # Errors
    ///
    /// Same as [`BloomFilter::new`].
    pub fn build(self) -> Result<BloomFilter> {
        BloomFilter::new(self.expected_items, self.fp_rate)
    }

    /// Build the filter and report the shape that was chosen for it.
    ///
    /// # Errors
    ///
    /// Same as [`BloomFilter::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// use seedbloom::builder::BloomFilterBuilder;
    ///
    /// let (filter, metadata) = BloomFilterBuilder::new()
    ///     .expected_items(1000)
    ///     .false_positive_rate(0.01)
    ///     .build_with_metadata()
    ///     .unwrap();
    ///
    /// assert_eq!(metadata.filter_size, 9586);
    /// assert_eq!(metadata.num_hashes, 7);
    /// assert_eq!(filter.size_bits(), metadata.filter_size);
    /// ```
    pub fn build_with_metadata(self) -> Result<(BloomFilter, FilterMetadata)> {
        let filter = self.build()?;

        let expected_items = filter.expected_items();
        let filter_size = filter.size_bits();
        let num_hashes = filter.hash_count();

        let metadata = FilterMetadata {
            expected_items,
            fp_rate: filter.target_fpr(),
            filter_size,
            num_hashes,
            expected_fp_rate: params::expected_fp_rate(filter_size, expected_items, num_hashes)?,
            bytes_per_item: filter_size as f64 / 8.0 / expected_items as f64,
        };

        Ok((filter, metadata))
    }
}

impl Default for BloomFilterBuilder<Initial> {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters a filter was built with, for sizing decisions and monitoring.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterMetadata {
    /// Expected number of items, `n`.
    pub expected_items: usize,
    /// Requested false positive rate, `p`.
    pub fp_rate: f64,
    /// Filter size in bits, `m`.
    pub filter_size: usize,
    /// Number of hash functions, `k`.
    pub num_hashes: usize,
    /// False positive rate predicted for `n` insertions with the rounded `m` and `k`.
    pub expected_fp_rate: f64,
    /// Bit array bytes per expected item.
    pub bytes_per_item: f64,
}

impl FilterMetadata {
    /// Size of the bit array in bytes.
    #[must_use]
    pub fn memory_bytes(&self) -> usize {
        self.filter_size.div_ceil(8)
    }

    /// Size of the bit array in kilobytes.
    #[must_use]
    pub fn memory_kb(&self) -> f64 {
        self.memory_bytes() as f64 / 1024.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SeedBloomError;

    #[test]
    fn test_builder_minimal() {
        let filter = BloomFilterBuilder::new()
            .expected_items(10_000)
            .false_positive_rate(0.01)
            .build()
            .unwrap();

        assert!(filter.is_empty());
        assert_eq!(filter.expected_items(), 10_000);
    }

    #[test]
    fn test_builder_matches_new() {
        let built = BloomFilterBuilder::new()
            .expected_items(1000)
            .false_positive_rate(0.01)
            .build()
            .unwrap();
        let direct = BloomFilter::new(1000, 0.01).unwrap();

        assert_eq!(built, direct);
    }

    #[test]
    fn test_builder_with_metadata() {
        let (filter, metadata) = BloomFilterBuilder::new()
            .expected_items(1000)
            .false_positive_rate(0.01)
            .build_with_metadata()
            .unwrap();

        assert!(filter.is_empty());
        assert_eq!(metadata.expected_items, 1000);
        assert_eq!(metadata.fp_rate, 0.01);
        assert_eq!(metadata.filter_size, 9586);
        assert_eq!(metadata.num_hashes, 7);
        assert!((metadata.expected_fp_rate - 0.01).abs() < 0.001);
        assert!((metadata.bytes_per_item - 9586.0 / 8000.0).abs() < 1e-9);
    }

    #[test]
    fn test_builder_invalid_items() {
        for n in [0, -42] {
            let err = BloomFilterBuilder::new()
                .expected_items(n)
                .false_positive_rate(0.01)
                .build()
                .unwrap_err();
            assert_eq!(err, SeedBloomError::InvalidItemCount { count: n });
        }
    }

    #[test]
    fn test_builder_invalid_fp_rate() {
        for p in [0.0, -1.0, 1.01, f64::NAN] {
            let result = BloomFilterBuilder::new()
                .expected_items(100)
                .false_positive_rate(p)
                .build_with_metadata();
            assert!(result.unwrap_err().is_invalid_parameter(), "p={}", p);
        }
    }

    #[test]
    fn test_builder_accepts_fp_rate_one() {
        let (filter, metadata) = BloomFilterBuilder::new()
            .expected_items(100)
            .false_positive_rate(1.0)
            .build_with_metadata()
            .unwrap();

        assert_eq!(filter.size_bits(), 1);
        assert_eq!(metadata.memory_bytes(), 1);
    }

    #[test]
    fn test_metadata_memory_calculations() {
        let (_, metadata) = BloomFilterBuilder::default()
            .expected_items(10_000)
            .false_positive_rate(0.01)
            .build_with_metadata()
            .unwrap();

        let bytes = metadata.memory_bytes();
        assert_eq!(bytes, metadata.filter_size.div_ceil(8));
        assert!((metadata.memory_kb() - bytes as f64 / 1024.0).abs() < 1e-9);
    }

    #[test]
    fn test_built_filter_works() {
        let filter = BloomFilterBuilder::new()
            .expected_items(1_000)
            .false_positive_rate(0.01)
            .build()
            .unwrap();

        filter.add("hello").unwrap();
        filter.add(&12345).unwrap();

        assert!(filter.contains("hello").unwrap());
        assert!(filter.contains(&12345).unwrap());
        assert!(!filter.contains("missing").unwrap());
    }
}
