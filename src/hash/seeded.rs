//! Seeded index hasher.
//!
//! A [`SeededHasher`] maps a byte sequence to a bit index in `[0, m)`. Hashers that share `m`
//! but differ in seed behave as independent hash functions, so a filter with `k` hash
//! functions owns `k` of them, seeded `0..k`.

use super::murmur3::murmur3_x86_32;
use crate::core::params::{MAX_FILTER_BITS, MIN_FILTER_BITS};
use crate::error::{Result, SeedBloomError};

/// Clears the sign bit of the 32-bit hash before reduction.
const INDEX_MASK: u32 = 0x7fff_ffff;

/// One member of the filter's hash-function family.
///
/// # Examples
///
/// ```
/// use seedbloom::SeededHasher;
///
/// let hasher = SeededHasher::new(1000, 3).unwrap();
/// let index = hasher.hash(b"alice");
/// assert!(index < 1000);
/// assert_eq!(index, hasher.hash(b"alice"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeededHasher {
    modulus: usize,
    seed: u32,
}

impl SeededHasher {
    /// Create a hasher producing indices in `[0, m)`.
    ///
    /// # Errors
    ///
    /// [`SeedBloomError::InvalidFilterSize`] if `m == 0` or `m` exceeds
    /// [`MAX_FILTER_BITS`].
    pub fn new(m: usize, seed: u32) -> Result<Self> {
        if !(MIN_FILTER_BITS..=MAX_FILTER_BITS).contains(&m) {
            return Err(SeedBloomError::invalid_filter_size(m));
        }

        Ok(Self { modulus: m, seed })
    }

    /// Map `bytes` to an index in `[0, m)`.
    ///
    /// Pure and deterministic; the empty slice is a valid input.
    #[must_use]
    #[inline]
    pub fn hash(&self, bytes: &[u8]) -> usize {
        (murmur3_x86_32(bytes, self.seed) & INDEX_MASK) as usize % self.modulus
    }

    /// The modulus `m`.
    #[must_use]
    #[inline]
    pub const fn modulus(&self) -> usize {
        self.modulus
    }

    /// The seed selecting this member of the family.
    #[must_use]
    #[inline]
    pub const fn seed(&self) -> u32 {
        self.seed
    }
}
