//! Hash family used by the filter.
//!
//! ```text
//! hash/
//! ├── murmur3.rs   - MurmurHash3 x86_32, the seeded mix
//! ├── seeded.rs    - SeededHasher: (m, seed) -> index in [0, m)
//! └── mod.rs       - This file (public API)
//! ```
//!
//! A filter with `k` hash functions owns hashers seeded `0, 1, .., k-1`. Each hasher runs
//! MurmurHash3 over the value's canonical bytes, clears the sign bit and reduces modulo `m`.
//!
//! # Examples
//!
//! ```
//! use seedbloom::hash::{murmur3_x86_32, SeededHasher};
//!
//! let raw = murmur3_x86_32(b"hello", 0);
//! assert_eq!(raw, 0x248B_FA47);
//!
//! let hasher = SeededHasher::new(1000, 0).unwrap();
//! assert_eq!(hasher.hash(b"hello"), (raw & 0x7fff_ffff) as usize % 1000);
//! ```

pub mod murmur3;
pub mod seeded;

pub use murmur3::murmur3_x86_32;
pub use seeded::SeededHasher;
