//! Lock-free, set-only bit vector.
//!
//! `BitVec` is a fixed-length bit array backed by `Box<[AtomicU64]>`. Bits can be set and
//! read through `&self` from any number of threads; they are never cleared, so a bit observed
//! as set stays set for the lifetime of the vector.
//!
//! # Memory Ordering
//!
//! - `set` uses `fetch_or` with `Release`
//! - `get` uses `load` with `Acquire`
//!
//! A thread that observes a bit written by another thread's `set` also observes everything
//! that thread wrote before it.
//!
//! # Memory Layout
//!
//! Bits are packed into 64-bit words, least significant bit first:
//!
//! ```text
//! Word 0: [bit 0][bit 1]...[bit 63]
//! Word 1: [bit 64][bit 65]...[bit 127]
//! ```
//!
//! The byte form produced by [`BitVec::to_bytes`] follows the same order: bit `i` lives in
//! byte `i / 8` at position `i % 8`.
//!
//! # Examples
//!
//! ```
//! use seedbloom::core::BitVec;
//!
//! let bv = BitVec::new(100).unwrap();
//! bv.set(42);
//! assert!(bv.get(42));
//! assert!(!bv.get(43));
//! assert_eq!(bv.count_ones(), 1);
//! ```

use crate::error::{Result, SeedBloomError};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Fixed-length bit vector with atomic, monotonic set operations.
pub struct BitVec {
    blocks: Box<[AtomicU64]>,

    /// Number of addressable bits; may not be a multiple of 64.
    len: usize,
}

impl BitVec {
    /// Create a bit vector of `num_bits` bits, all unset.
    ///
    /// # Errors
    ///
    /// [`SeedBloomError::InvalidFilterSize`] if `num_bits == 0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use seedbloom::core::BitVec;
    ///
    /// let bv = BitVec::new(1000).unwrap();
    /// assert_eq!(bv.len(), 1000);
    /// assert_eq!(bv.count_ones(), 0);
    /// ```
    pub fn new(num_bits: usize) -> Result<Self> {
        if num_bits == 0 {
            return Err(SeedBloomError::invalid_filter_size(num_bits));
        }

        let blocks = (0..num_bits.div_ceil(64))
            .map(|_| AtomicU64::new(0))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Ok(Self {
            blocks,
            len: num_bits,
        })
    }

    /// Rebuild a bit vector from its byte form.
    ///
    /// `bytes` must hold exactly `⌈num_bits / 8⌉` bytes and no bit at or past `num_bits`
    /// may be set.
    ///
    /// # Errors
    ///
    /// - [`SeedBloomError::InvalidFilterSize`] if `num_bits == 0`
    /// - [`SeedBloomError::CorruptData`] if the byte count is wrong or padding bits are set
    ///
    /// # Examples
    ///
    /// ```
    /// use seedbloom::core::BitVec;
    ///
    /// let original = BitVec::new(70).unwrap();
    /// original.set(3);
    /// original.set(69);
    ///
    /// let restored = BitVec::from_bytes(&original.to_bytes(), 70).unwrap();
    /// assert!(restored.get(3));
    /// assert!(restored.get(69));
    /// assert_eq!(restored.count_ones(), 2);
    /// ```
    pub fn from_bytes(bytes: &[u8], num_bits: usize) -> Result<Self> {
        if num_bits == 0 {
            return Err(SeedBloomError::invalid_filter_size(num_bits));
        }

        // Validate against the input before allocating `num_bits`.
        let expected = num_bits.div_ceil(8);
        if bytes.len() != expected {
            return Err(SeedBloomError::corrupt_data(format!(
                "bit array of {} bits needs {} bytes, got {}",
                num_bits,
                expected,
                bytes.len()
            )));
        }

        let tail_bits = num_bits % 8;
        if tail_bits != 0 && bytes[expected - 1] >> tail_bits != 0 {
            return Err(SeedBloomError::corrupt_data(format!(
                "bits set past the end of a {}-bit array",
                num_bits
            )));
        }

        let bv = Self::new(num_bits)?;
        for (block, chunk) in bv.blocks.iter().zip(bytes.chunks(8)) {
            let mut word = [0u8; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            block.store(u64::from_le_bytes(word), Ordering::Relaxed);
        }

        Ok(bv)
    }

    /// Number of bits in the vector.
    #[must_use]
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always `false` for a constructed `BitVec`; present for API completeness.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Set a bit. Idempotent and safe to call concurrently.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`, like slice indexing.
    ///
    /// # Examples
    ///
    /// ```
    /// use seedbloom::core::BitVec;
    ///
    /// let bv = BitVec::new(64).unwrap();
    /// bv.set(10);
    /// bv.set(10);
    /// assert_eq!(bv.count_ones(), 1);
    /// ```
    #[inline]
    pub fn set(&self, index: usize) {
        assert!(
            index < self.len,
            "BitVec index out of bounds: index={} len={}",
            index,
            self.len
        );

        let mask = 1u64 << (index % 64);
        self.blocks[index / 64].fetch_or(mask, Ordering::Release);
    }

    /// Read a bit.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[must_use]
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        assert!(
            index < self.len,
            "BitVec index out of bounds: index={} len={}",
            index,
            self.len
        );

        let mask = 1u64 << (index % 64);
        (self.blocks[index / 64].load(Ordering::Acquire) & mask) != 0
    }

    /// Number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.blocks
            .iter()
            .map(|block| block.load(Ordering::Acquire).count_ones() as usize)
            .sum()
    }

    /// Heap plus inline size in bytes.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.blocks.len() * std::mem::size_of::<AtomicU64>() + std::mem::size_of::<Self>()
    }

    /// Byte form of the vector: `⌈len / 8⌉` bytes, bit `i` in byte `i / 8` at position `i % 8`.
    ///
    /// # Examples
    ///
    /// ```
    /// use seedbloom::core::BitVec;
    ///
    /// let bv = BitVec::new(12).unwrap();
    /// bv.set(0);
    /// bv.set(9);
    /// assert_eq!(bv.to_bytes(), vec![0b0000_0001, 0b0000_0010]);
    /// ```
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = self
            .blocks
            .iter()
            .flat_map(|block| block.load(Ordering::Acquire).to_le_bytes())
            .collect();
        bytes.truncate(self.len.div_ceil(8));
        bytes
    }
}

impl Clone for BitVec {
    /// Independent copy with the same bit values.
    fn clone(&self) -> Self {
        let blocks = self
            .blocks
            .iter()
            .map(|b| AtomicU64::new(b.load(Ordering::Acquire)))
            .collect();

        Self {
            blocks,
            len: self.len,
        }
    }
}

impl PartialEq for BitVec {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self
                .blocks
                .iter()
                .zip(other.blocks.iter())
                .all(|(a, b)| a.load(Ordering::Acquire) == b.load(Ordering::Acquire))
    }
}

impl Eq for BitVec {}

impl fmt::Debug for BitVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitVec")
            .field("len", &self.len)
            .field("ones", &self.count_ones())
            .finish()
    }
}
