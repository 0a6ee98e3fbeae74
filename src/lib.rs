//! seedbloom: a Bloom filter over a seeded MurmurHash3 hash family.
//!
//! A Bloom filter is a space-efficient probabilistic set. It can produce:
//! - **False positives**: it may report a value as present when it was never added
//! - **Zero false negatives**: if it reports a value as absent, it was never added
//!
//! Values of any supported kind are first turned into a canonical, kind-tagged byte form
//! ([`encode`]), then hashed by `k` independent [`SeededHasher`]s into an `m`-bit array.
//!
//! # Quick Start
//!
//! ```
//! use seedbloom::BloomFilter;
//!
//! // 1000 expected items at a 1% false positive rate
//! let filter = BloomFilter::new(1000, 0.01).unwrap();
//! assert_eq!((filter.size_bits(), filter.hash_count()), (9586, 7));
//!
//! filter.add("hello").unwrap();
//! filter.add(&12u32).unwrap();
//!
//! assert!(filter.contains("hello").unwrap());     // added
//! assert!(filter.contains(&12u32).unwrap());      // added
//! assert!(!filter.contains("goodbye").unwrap());  // definitely never added
//! ```
//!
//! # Concurrency
//!
//! Bits are atomic and only ever set, so `add` and `contains` take `&self` and a filter can
//! be shared through an `Arc` as is:
//!
//! ```
//! use seedbloom::BloomFilter;
//! use std::sync::Arc;
//!
//! let filter = Arc::new(BloomFilter::new(10_000, 0.01).unwrap());
//!
//! let clone = Arc::clone(&filter);
//! std::thread::spawn(move || clone.add("from a thread").unwrap())
//!     .join()
//!     .unwrap();
//!
//! assert!(filter.contains("from a thread").unwrap());
//! ```
//!
//! [`sync::LockedBloomFilter`] additionally makes each insertion atomic with respect to
//! queries.
//!
//! # Using the Builder
//!
//! ```
//! use seedbloom::builder::BloomFilterBuilder;
//!
//! let filter = BloomFilterBuilder::new()
//!     .expected_items(10_000)
//!     .false_positive_rate(0.01)
//!     .build()
//!     .unwrap();
//! assert!(filter.is_empty());
//! ```
//!
//! # Features
//!
//! - `serde` (default) - `Serialize`/`Deserialize` for [`BloomFilter`]. The compact
//!   [`serde_support::binary`] format is always available.
//! - `trace` - `tracing` events for construction, insertion, queries and rejected data

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

/// Bit storage and parameter calculation
pub mod core;

/// Error types and result aliases
pub mod error;

/// Canonical value encoding
pub mod encode;

/// The Bloom filter
pub mod filter;

/// Seeded hash family
pub mod hash;

/// Synchronized wrappers
pub mod sync;

/// Type-state builder
pub mod builder;

/// Persistence formats
pub mod serde_support;

pub use builder::{BloomFilterBuilder, FilterMetadata};
pub use encode::{encode, ByteEncode, RawBytes};
pub use error::{Result, SeedBloomError};
pub use filter::BloomFilter;
pub use hash::SeededHasher;
pub use sync::LockedBloomFilter;

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```
/// use seedbloom::prelude::*;
///
/// let filter = BloomFilter::new(1000, 0.01).unwrap();
/// filter.add("hello").unwrap();
/// assert!(filter.contains("hello").unwrap());
/// ```
pub mod prelude {
    pub use crate::builder::{BloomFilterBuilder, FilterMetadata};
    pub use crate::encode::{encode, ByteEncode, RawBytes};
    pub use crate::error::{Result, SeedBloomError};
    pub use crate::filter::BloomFilter;
    pub use crate::hash::SeededHasher;
    pub use crate::sync::LockedBloomFilter;
}
