//! Builder pattern for filter construction.
//!
//! [`BloomFilterBuilder`] uses the type-state pattern: `build` only exists once both the
//! expected item count and the false positive rate have been supplied. Missing parameters are
//! compile-time errors; out-of-range values are runtime errors from `build`.
//!
//! # Examples
//!
//! ```
//! use seedbloom::builder::BloomFilterBuilder;
//!
//! let (filter, metadata) = BloomFilterBuilder::new()
//!     .expected_items(100)
//!     .false_positive_rate(0.8)
//!     .build_with_metadata()
//!     .unwrap();
//!
//! assert_eq!(metadata.filter_size, 47);
//! assert_eq!(filter.hash_count(), 1);
//! ```

#![allow(clippy::module_name_repetitions)]

pub mod standard;

pub use standard::{BloomFilterBuilder, FilterMetadata};
