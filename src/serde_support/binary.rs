//! Compact binary format.
//!
//! A fixed little-endian layout holding only what is needed to answer queries:
//!
//! ```text
//! ┌────────┬─────────┬──────────┬──────────┬─────────────┬──────────────────┐
//! │ "SDBF" │ version │ m        │ k        │ seeds       │ bits             │
//! │ 4 B    │ u16     │ u32      │ u32      │ k × u32     │ ceil(m / 8) B    │
//! └────────┴─────────┴──────────┴──────────┴─────────────┴──────────────────┘
//! ```
//!
//! Bits are stored least significant bit first. The sizing inputs `(n, p)` are not part of
//! the format, so a decoded filter reports `expected_items() == 0`.
//!
//! # Examples
//!
//! ```
//! use seedbloom::BloomFilter;
//! use seedbloom::serde_support::binary;
//!
//! let filter = BloomFilter::new(1000, 0.01).unwrap();
//! filter.add("hello").unwrap();
//!
//! let bytes = binary::to_bytes(&filter);
//! assert_eq!(bytes.len(), binary::encoded_len(9586, 7));
//!
//! let restored = binary::from_bytes(&bytes).unwrap();
//! assert!(restored.contains("hello").unwrap());
//! ```

#![allow(clippy::cast_possible_truncation)]

use crate::core::params::MAX_FILTER_BITS;
use crate::error::{Result, SeedBloomError};
use crate::filter::BloomFilter;

/// Magic bytes at the start of every encoded filter.
pub const MAGIC: &[u8; 4] = b"SDBF";

/// Current format version.
pub const VERSION: u16 = 1;

/// magic + version + m + k
const HEADER_SIZE: usize = 4 + 2 + 4 + 4;

/// Binary decoding errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Missing or wrong magic bytes.
    #[error("Invalid magic bytes (expected 'SDBF')")]
    InvalidMagic,

    /// Format version this build does not read.
    #[error("Unsupported format version: {0} (expected {})", VERSION)]
    UnsupportedVersion(u16),

    /// Input ends before the declared content.
    #[error("Buffer too small: expected {expected} bytes, got {actual}")]
    BufferTooSmall {
        /// Bytes the header declares.
        expected: usize,
        /// Bytes provided.
        actual: usize,
    },

    /// Bytes remain after the declared content.
    #[error("Trailing data: expected {expected} bytes, got {actual}")]
    TrailingData {
        /// Bytes the header declares.
        expected: usize,
        /// Bytes provided.
        actual: usize,
    },
}

impl From<CodecError> for SeedBloomError {
    fn from(err: CodecError) -> Self {
        SeedBloomError::corrupt_data(err.to_string())
    }
}

/// Exact encoded size of an `m`-bit filter with `k` hash functions.
#[must_use]
pub fn encoded_len(m: usize, k: usize) -> usize {
    HEADER_SIZE
        .saturating_add(k.saturating_mul(4))
        .saturating_add(m.div_ceil(8))
}

/// Encode a filter.
///
/// Infallible: every constructed filter has `m ≤ i32::MAX` and a seed per hash function,
/// which the fixed-width fields can hold.
#[must_use]
pub fn to_bytes(filter: &BloomFilter) -> Vec<u8> {
    let m = filter.size_bits();
    let k = filter.hash_count();

    let mut bytes = Vec::with_capacity(encoded_len(m, k));
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&VERSION.to_le_bytes());
    bytes.extend_from_slice(&(m as u32).to_le_bytes());
    bytes.extend_from_slice(&(k as u32).to_le_bytes());
    for hasher in filter.hashers() {
        bytes.extend_from_slice(&hasher.seed().to_le_bytes());
    }
    bytes.extend_from_slice(&filter.to_bit_bytes());

    bytes
}

/// Decode a filter.
///
/// # Errors
///
/// [`SeedBloomError::CorruptData`] if the input is truncated, has trailing bytes, carries the
/// wrong magic or version, or describes an invalid filter.
pub fn from_bytes(bytes: &[u8]) -> Result<BloomFilter> {
    decode(bytes).map_err(|err| {
        #[cfg(feature = "trace")]
        tracing::warn!(len = bytes.len(), error = %err, "rejected binary filter");
        err
    })
}

fn decode(bytes: &[u8]) -> Result<BloomFilter> {
    if bytes.len() < HEADER_SIZE {
        if bytes.len() < MAGIC.len() || &bytes[..MAGIC.len()] != MAGIC {
            return Err(CodecError::InvalidMagic.into());
        }
        return Err(CodecError::BufferTooSmall {
            expected: HEADER_SIZE,
            actual: bytes.len(),
        }
        .into());
    }

    let (header, body) = bytes.split_at(HEADER_SIZE);

    if &header[0..4] != MAGIC {
        return Err(CodecError::InvalidMagic.into());
    }

    let version = u16::from_le_bytes([header[4], header[5]]);
    if version != VERSION {
        return Err(CodecError::UnsupportedVersion(version).into());
    }

    let m = read_u32(&header[6..10]) as usize;
    let k = read_u32(&header[10..14]) as usize;

    // Bound m before sizing anything from it.
    if m == 0 || m > MAX_FILTER_BITS {
        return Err(SeedBloomError::corrupt_data(format!("bit count {} out of range", m)));
    }

    let expected = encoded_len(m, k);
    if bytes.len() < expected {
        return Err(CodecError::BufferTooSmall {
            expected,
            actual: bytes.len(),
        }
        .into());
    }
    if bytes.len() > expected {
        return Err(CodecError::TrailingData {
            expected,
            actual: bytes.len(),
        }
        .into());
    }

    let (seed_bytes, bit_bytes) = body.split_at(k * 4);
    let seeds: Vec<u32> = seed_bytes.chunks_exact(4).map(read_u32).collect();

    BloomFilter::from_parts(m, k, &seeds, bit_bytes)
}

fn read_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
