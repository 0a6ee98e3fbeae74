//! Persistence for filters.
//!
//! # Formats
//!
//! ## serde
//!
//! With the `serde` feature (on by default), [`BloomFilter`](crate::BloomFilter) implements
//! `Serialize` and `Deserialize` through a versioned intermediate record (see `standard`).
//! Use it with any serde format; the sizing inputs `(n, p)` survive the round trip.
//!
//! ## Binary
//!
//! [`binary`] is a fixed little-endian layout of `(m, k, seeds, bits)` behind a magic tag and
//! version. It is the smallest representation, needs no serde format crate and is available
//! without any feature.
//!
//! Both formats validate on the way in: truncated, inconsistent or tampered data is rejected
//! with [`SeedBloomError::CorruptData`](crate::SeedBloomError::CorruptData) rather than
//! producing a filter that could return false negatives.
//!
//! # Examples
//!
//! ```
//! use seedbloom::BloomFilter;
//! use seedbloom::serde_support::binary;
//!
//! let filter = BloomFilter::new(1000, 0.01).unwrap();
//! filter.add(&42u64).unwrap();
//!
//! let restored = binary::from_bytes(&binary::to_bytes(&filter)).unwrap();
//! assert!(restored.contains(&42u64).unwrap());
//! ```

pub mod binary;

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub mod standard;

pub use binary::CodecError;
