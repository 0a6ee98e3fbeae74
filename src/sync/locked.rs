//! Reader/writer-locked filter.
//!
//! [`BloomFilter`] is already safe to share: its bits are atomic and `add` takes `&self`.
//! What it does not give is insertion atomicity. An `add` sets `k` bits one at a time, so a
//! concurrent `contains` for the same value can observe some of them and report `false`
//! while the insertion is still in flight.
//!
//! [`LockedBloomFilter`] closes that window. `add` holds the write lock for the whole
//! insertion and `contains` holds the read lock, so a query sees either none or all of an
//! insertion's bits. Queries still run in parallel with each other.
//!
//! `parking_lot::RwLock` is used for its writer fairness and because it cannot be poisoned.
//!
//! # Examples
//!
//! ```
//! use seedbloom::sync::LockedBloomFilter;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let filter = Arc::new(LockedBloomFilter::new(10_000, 0.01).unwrap());
//!
//! let handles: Vec<_> = (0..4u32)
//!     .map(|t| {
//!         let filter = Arc::clone(&filter);
//!         thread::spawn(move || {
//!             for i in 0..100u32 {
//!                 filter.add(&(t, i)).unwrap();
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert!(filter.contains(&(3u32, 99u32)).unwrap());
//! ```

use crate::encode::{encode, ByteEncode};
use crate::error::Result;
use crate::filter::BloomFilter;
use parking_lot::RwLock;

/// A [`BloomFilter`] whose insertions are atomic with respect to queries.
#[derive(Debug)]
pub struct LockedBloomFilter {
    inner: RwLock<BloomFilter>,
}

impl LockedBloomFilter {
    /// Create a filter sized for `n` items at false positive rate `p`.
    ///
    /// # Errors
    ///
    /// Same as [`BloomFilter::new`].
    pub fn new(n: i64, p: f64) -> Result<Self> {
        Ok(Self::from_filter(BloomFilter::new(n, p)?))
    }

    /// Wrap an existing filter.
    #[must_use]
    pub fn from_filter(filter: BloomFilter) -> Self {
        Self {
            inner: RwLock::new(filter),
        }
    }

    /// Add a value under the write lock.
    ///
    /// Encoding happens before the lock is taken.
    ///
    /// # Errors
    ///
    /// [`SeedBloomError::EncodingError`](crate::SeedBloomError::EncodingError) if the value
    /// has no canonical form.
    pub fn add<V: ByteEncode + ?Sized>(&self, value: &V) -> Result<()> {
        let bytes = encode(value)?;
        self.add_bytes(&bytes);
        Ok(())
    }

    /// Add an already-encoded byte sequence under the write lock.
    pub fn add_bytes(&self, bytes: &[u8]) {
        self.inner.write().add_bytes(bytes);
    }

    /// Test a value under the read lock.
    ///
    /// # Errors
    ///
    /// [`SeedBloomError::EncodingError`](crate::SeedBloomError::EncodingError) if the value
    /// has no canonical form.
    pub fn contains<V: ByteEncode + ?Sized>(&self, value: &V) -> Result<bool> {
        let bytes = encode(value)?;
        Ok(self.contains_bytes(&bytes))
    }

    /// Test an already-encoded byte sequence under the read lock.
    #[must_use]
    pub fn contains_bytes(&self, bytes: &[u8]) -> bool {
        self.inner.read().contains_bytes(bytes)
    }

    /// Number of bits (m).
    #[must_use]
    pub fn size_bits(&self) -> usize {
        self.inner.read().size_bits()
    }

    /// Number of hash functions (k).
    #[must_use]
    pub fn hash_count(&self) -> usize {
        self.inner.read().hash_count()
    }

    /// Consistent copy of the current filter state.
    ///
    /// Taken under the read lock, so it never contains a partial insertion.
    #[must_use]
    pub fn snapshot(&self) -> BloomFilter {
        self.inner.read().clone()
    }

    /// Unwrap the filter.
    #[must_use]
    pub fn into_inner(self) -> BloomFilter {
        self.inner.into_inner()
    }
}

impl From<BloomFilter> for LockedBloomFilter {
    fn from(filter: BloomFilter) -> Self {
        Self::from_filter(filter)
    }
}
