//! The Bloom filter.
//!
//! A [`BloomFilter`] answers approximate set-membership queries with one-sided error: if a
//! value was added, [`contains`](BloomFilter::contains) always reports `true`; if it was not,
//! it reports `false` except with roughly the configured false positive probability.
//!
//! # Structure
//!
//! The filter owns an `m`-bit array and `k` [`SeededHasher`]s seeded `0..k`. Adding a value
//! encodes it canonically (see [`crate::encode`]), hashes the bytes with each hasher and sets
//! the resulting bits. A query checks the same bits and stops at the first unset one.
//!
//! ```text
//! value ──encode──> bytes ──┬─ hasher[0] ──> bit i₀
//!                           ├─ hasher[1] ──> bit i₁
//!                           └─ hasher[k-1] > bit iₖ₋₁
//! ```
//!
//! # Sizing
//!
//! For `n` expected items at false positive rate `p`:
//!
//! - `m = ceil(-n × ln(p) / (ln 2)²)`, at least 1
//! - `k = round((m / n) × ln 2)`, at least 1
//!
//! # Thread Safety
//!
//! Bits live in atomic words and are only ever set, so `add` and `contains` both take `&self`
//! and the filter can be shared through an `Arc` without a lock. A query running concurrently
//! with an `add` of the same value may see only some of its bits; once `add` returns, every
//! later `contains` sees all of them. Use [`crate::sync::LockedBloomFilter`] when readers must
//! never observe a partially inserted value.
//!
//! # Examples
//!
//! ```
//! use seedbloom::BloomFilter;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let filter = BloomFilter::new(1000, 0.01)?;
//! assert_eq!(filter.size_bits(), 9586);
//! assert_eq!(filter.hash_count(), 7);
//!
//! filter.add("alice")?;
//! filter.add(&42u64)?;
//!
//! assert!(filter.contains("alice")?);
//! assert!(filter.contains(&42u64)?);
//! assert!(!filter.contains(&12u8)?);
//! # Ok(())
//! # }
//! ```

#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use crate::core::params::{calculate_filter_params, MAX_FILTER_BITS, MIN_FILTER_BITS};
use crate::core::BitVec;
use crate::encode::{encode, ByteEncode};
use crate::error::{Result, SeedBloomError};
use crate::hash::SeededHasher;
use std::fmt;

/// Space-efficient probabilistic set with no false negatives.
///
/// See the [module documentation](self) for the algorithm and concurrency model.
#[derive(Clone, PartialEq)]
pub struct BloomFilter {
    /// The m-bit array.
    bits: BitVec,

    /// Exactly k hashers; hasher `i` has seed `i`.
    hashers: Box<[SeededHasher]>,

    /// Construction input n, or 0 when rebuilt from raw parts.
    expected_items: usize,

    /// Construction input p, or 0.0 when rebuilt from raw parts.
    target_fpr: f64,
}

impl BloomFilter {
    /// Create a filter sized for `n` items at false positive rate `p`.
    ///
    /// # Errors
    ///
    /// - [`SeedBloomError::InvalidItemCount`] if `n <= 0`
    /// - [`SeedBloomError::FalsePositiveRateOutOfBounds`] if `p` is NaN or not in `(0, 1]`
    /// - [`SeedBloomError::InvalidFilterSize`] if the required bit array is larger than
    ///   [`MAX_FILTER_BITS`]
    ///
    /// Inputs are validated before anything is allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use seedbloom::BloomFilter;
    ///
    /// let filter = BloomFilter::new(100, 0.8).unwrap();
    /// assert_eq!(filter.size_bits(), 47);
    /// assert_eq!(filter.hash_count(), 1);
    ///
    /// assert!(BloomFilter::new(0, 0.01).is_err());
    /// assert!(BloomFilter::new(100, 1.01).is_err());
    /// ```
    pub fn new(n: i64, p: f64) -> Result<Self> {
        let (m, k) = calculate_filter_params(n, p)?;
        let mut filter = Self::with_params(m, k)?;
        filter.expected_items = usize::try_from(n).unwrap_or(usize::MAX);
        filter.target_fpr = p;

        #[cfg(feature = "trace")]
        tracing::debug!(n, p, m, k, "BloomFilter::new");

        Ok(filter)
    }

    /// Create a filter with an explicit shape: `m` bits and `k` hash functions.
    ///
    /// # Errors
    ///
    /// - [`SeedBloomError::InvalidFilterSize`] if `m == 0` or `m > MAX_FILTER_BITS`
    /// - [`SeedBloomError::InvalidHashCount`] if `k == 0` or `k` exceeds the seed range
    ///
    /// # Examples
    ///
    /// ```
    /// use seedbloom::BloomFilter;
    ///
    /// let filter = BloomFilter::with_params(1024, 4).unwrap();
    /// assert_eq!(filter.seeds(), vec![0, 1, 2, 3]);
    /// ```
    pub fn with_params(m: usize, k: usize) -> Result<Self> {
        if !(MIN_FILTER_BITS..=MAX_FILTER_BITS).contains(&m) {
            return Err(SeedBloomError::invalid_filter_size(m));
        }

        if k == 0 || u32::try_from(k - 1).is_err() {
            return Err(SeedBloomError::invalid_hash_count(k));
        }

        let hashers = (0..k)
            .map(|i| SeededHasher::new(m, i as u32))
            .collect::<Result<Box<[_]>>>()?;

        Ok(Self {
            bits: BitVec::new(m)?,
            hashers,
            expected_items: 0,
            target_fpr: 0.0,
        })
    }

    /// Rebuild a filter from its minimal persisted form.
    ///
    /// `seeds` must be exactly `[0, 1, .., k-1]` and `bit_bytes` must be the output of
    /// [`to_bit_bytes`](Self::to_bit_bytes) for an `m`-bit filter. The rebuilt filter answers
    /// every query exactly as the original did; its construction inputs read as `0` and `0.0`.
    ///
    /// # Errors
    ///
    /// [`SeedBloomError::CorruptData`] if any part is out of range or inconsistent.
    ///
    /// # Examples
    ///
    /// ```
    /// use seedbloom::BloomFilter;
    ///
    /// let original = BloomFilter::new(100, 0.01).unwrap();
    /// original.add("alice").unwrap();
    ///
    /// let restored = BloomFilter::from_parts(
    ///     original.size_bits(),
    ///     original.hash_count(),
    ///     &original.seeds(),
    ///     &original.to_bit_bytes(),
    /// ).unwrap();
    /// assert!(restored.contains("alice").unwrap());
    /// ```
    pub fn from_parts(m: usize, k: usize, seeds: &[u32], bit_bytes: &[u8]) -> Result<Self> {
        let filter = Self::validate_parts(m, k, seeds, bit_bytes).map_err(|err| {
            #[cfg(feature = "trace")]
            tracing::warn!(m, k, error = %err, "rejected filter parts");
            err
        })?;

        #[cfg(feature = "trace")]
        tracing::debug!(m, k, set_bits = filter.count_set_bits(), "BloomFilter::from_parts");

        Ok(filter)
    }

    fn validate_parts(m: usize, k: usize, seeds: &[u32], bit_bytes: &[u8]) -> Result<Self> {
        if !(MIN_FILTER_BITS..=MAX_FILTER_BITS).contains(&m) {
            return Err(SeedBloomError::corrupt_data(format!(
                "bit count {} outside [{}, {}]",
                m, MIN_FILTER_BITS, MAX_FILTER_BITS
            )));
        }

        if k == 0 {
            return Err(SeedBloomError::corrupt_data("hash count is zero"));
        }

        if seeds.len() != k {
            return Err(SeedBloomError::corrupt_data(format!(
                "expected {} seeds, got {}",
                k,
                seeds.len()
            )));
        }

        if let Some((pos, seed)) = seeds
            .iter()
            .enumerate()
            .find(|&(pos, &seed)| seed as usize != pos)
        {
            return Err(SeedBloomError::corrupt_data(format!(
                "seed {} at position {}",
                seed, pos
            )));
        }

        let bits = BitVec::from_bytes(bit_bytes, m)?;
        let hashers = seeds
            .iter()
            .map(|&seed| SeededHasher::new(m, seed))
            .collect::<Result<Box<[_]>>>()?;

        Ok(Self {
            bits,
            hashers,
            expected_items: 0,
            target_fpr: 0.0,
        })
    }

    /// Attach the `(n, p)` a rebuilt filter was originally sized for.
    #[cfg_attr(not(feature = "serde"), allow(dead_code))]
    pub(crate) fn with_construction_inputs(mut self, expected_items: usize, target_fpr: f64) -> Self {
        self.expected_items = expected_items;
        self.target_fpr = target_fpr;
        self
    }

    /// Add a value.
    ///
    /// Adding the same value again changes nothing. Safe to call concurrently with other
    /// adds and queries.
    ///
    /// # Errors
    ///
    /// [`SeedBloomError::EncodingError`] if the value has no canonical form (for example a
    /// NaN float). The filter is unchanged in that case.
    #[inline]
    pub fn add<V: ByteEncode + ?Sized>(&self, value: &V) -> Result<()> {
        let bytes = encode(value)?;
        self.add_bytes(&bytes);
        Ok(())
    }

    /// Add an already-encoded byte sequence, hashed exactly as given.
    #[inline]
    pub fn add_bytes(&self, bytes: &[u8]) {
        #[cfg(feature = "trace")]
        tracing::trace!(len = bytes.len(), "BloomFilter::add");

        for hasher in self.hashers.iter() {
            self.bits.set(hasher.hash(bytes));
        }
    }

    /// Test whether a value might have been added.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: the value might be in the set (or this is a false positive)
    /// - `Ok(false)`: the value was definitely never added
    ///
    /// # Errors
    ///
    /// [`SeedBloomError::EncodingError`] if the value has no canonical form.
    #[inline]
    pub fn contains<V: ByteEncode + ?Sized>(&self, value: &V) -> Result<bool> {
        let bytes = encode(value)?;
        Ok(self.contains_bytes(&bytes))
    }

    /// Test an already-encoded byte sequence.
    #[must_use]
    #[inline]
    pub fn contains_bytes(&self, bytes: &[u8]) -> bool {
        #[cfg(feature = "trace")]
        tracing::trace!(len = bytes.len(), "BloomFilter::contains");

        self.hashers
            .iter()
            .all(|hasher| self.bits.get(hasher.hash(bytes)))
    }

    /// Add every value of `items`.
    ///
    /// All values are encoded before any bit is set, so an encoding failure leaves the filter
    /// unchanged.
    ///
    /// # Errors
    ///
    /// The first [`SeedBloomError::EncodingError`] encountered.
    ///
    /// # Examples
    ///
    /// ```
    /// use seedbloom::BloomFilter;
    ///
    /// let filter = BloomFilter::new(100, 0.01).unwrap();
    /// filter.add_all(["a", "b", "c"]).unwrap();
    /// assert!(filter.add_all([1.0, f64::NAN]).is_err());
    /// assert!(!filter.contains(&1.0).unwrap());
    /// ```
    pub fn add_all<I>(&self, items: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: ByteEncode,
    {
        let encoded = items
            .into_iter()
            .map(|item| encode(&item))
            .collect::<Result<Vec<_>>>()?;

        for bytes in &encoded {
            self.add_bytes(bytes);
        }
        Ok(())
    }

    /// Query every value of `items`, in order.
    ///
    /// # Errors
    ///
    /// The first [`SeedBloomError::EncodingError`] encountered.
    pub fn contains_all<I>(&self, items: I) -> Result<Vec<bool>>
    where
        I: IntoIterator,
        I::Item: ByteEncode,
    {
        items
            .into_iter()
            .map(|item| self.contains(&item))
            .collect()
    }

    /// Number of bits (m).
    #[must_use]
    #[inline]
    pub fn size_bits(&self) -> usize {
        self.bits.len()
    }

    /// Number of hash functions (k).
    #[must_use]
    #[inline]
    pub fn hash_count(&self) -> usize {
        self.hashers.len()
    }

    /// The hash-function family, in seed order.
    #[must_use]
    pub fn hashers(&self) -> &[SeededHasher] {
        &self.hashers
    }

    /// Seeds of the hash-function family: always `0..k`.
    #[must_use]
    pub fn seeds(&self) -> Vec<u32> {
        self.hashers.iter().map(SeededHasher::seed).collect()
    }

    /// Read a single bit.
    ///
    /// # Panics
    ///
    /// Panics if `index >= size_bits()`.
    #[must_use]
    #[inline]
    pub fn bit(&self, index: usize) -> bool {
        self.bits.get(index)
    }

    /// The underlying bit array.
    #[must_use]
    pub fn bits(&self) -> &BitVec {
        &self.bits
    }

    /// The `n` the filter was sized for.
    #[must_use]
    #[inline]
    pub fn expected_items(&self) -> usize {
        self.expected_items
    }

    /// The `p` the filter was sized for.
    #[must_use]
    #[inline]
    pub fn target_fpr(&self) -> f64 {
        self.target_fpr
    }

    /// Bit array as bytes, least significant bit first.
    #[must_use]
    pub fn to_bit_bytes(&self) -> Vec<u8> {
        self.bits.to_bytes()
    }

    /// Number of bits currently set.
    #[must_use]
    pub fn count_set_bits(&self) -> usize {
        self.bits.count_ones()
    }

    /// Fraction of bits set, in `[0, 1]`.
    #[must_use]
    pub fn fill_rate(&self) -> f64 {
        self.count_set_bits() as f64 / self.size_bits() as f64
    }

    /// `true` if nothing has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count_set_bits() == 0
    }

    /// Estimate the number of distinct values added.
    ///
    /// Uses `n ≈ -(m/k) × ln(1 - X/m)` where `X` is the number of set bits. Returns
    /// `usize::MAX` once every bit is set, since the estimate diverges there.
    #[must_use]
    pub fn estimate_cardinality(&self) -> usize {
        let set_bits = self.count_set_bits();
        if set_bits == 0 {
            return 0;
        }

        if set_bits >= self.size_bits() {
            return usize::MAX;
        }

        let m = self.size_bits() as f64;
        let k = self.hash_count() as f64;
        let estimated_n = -(m / k) * (1.0 - set_bits as f64 / m).ln();

        estimated_n.round().max(0.0) as usize
    }

    /// Estimate the current false positive rate from the fill rate.
    ///
    /// Estimates `n` as in [`estimate_cardinality`](Self::estimate_cardinality), then
    /// evaluates `(1 - e^(-k×n/m))^k`.
    #[must_use]
    pub fn estimated_fp_rate(&self) -> f64 {
        let fill_rate = self.fill_rate();
        if fill_rate == 0.0 {
            return 0.0;
        }
        if fill_rate >= 1.0 {
            return 1.0;
        }

        let m = self.size_bits() as f64;
        let k = self.hash_count() as f64;
        let estimated_n = -(m / k) * (1.0 - fill_rate).ln();

        (1.0 - (-k * estimated_n / m).exp()).powf(k)
    }

    /// Approximate memory footprint in bytes.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.bits.memory_usage()
            + std::mem::size_of_val(&*self.hashers)
            + std::mem::size_of::<usize>() // expected_items
            + std::mem::size_of::<f64>() // target_fpr
    }
}

impl fmt::Debug for BloomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BloomFilter")
            .field("size_bits", &self.size_bits())
            .field("hash_count", &self.hash_count())
            .field("set_bits", &self.count_set_bits())
            .field("expected_items", &self.expected_items)
            .field("target_fpr", &self.target_fpr)
            .finish()
    }
}
