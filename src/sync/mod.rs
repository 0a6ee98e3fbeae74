//! Synchronized wrappers.
//!
//! - [`LockedBloomFilter`] - `RwLock` wrapper that makes each insertion atomic with respect
//!   to queries
//!
//! A plain [`BloomFilter`](crate::BloomFilter) can already be shared through an `Arc`
//! without any lock. Reach for the locked wrapper only when a reader must never observe an
//! insertion that has set some but not all of its bits.

pub mod locked;

pub use locked::LockedBloomFilter;
