//! MurmurHash3, x86 32-bit variant.
//!
//! A fast, non-cryptographic hash with good avalanche behaviour. The seed selects one
//! member of an effectively independent family of hash functions, which is what the
//! filter's hasher family relies on.
//!
//! Output matches the reference `MurmurHash3_x86_32` for every input and seed, so values
//! hashed here agree with other implementations of the same function.

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;

/// Hash `bytes` with MurmurHash3 x86_32 under `seed`.
///
/// # Examples
///
/// ```
/// use seedbloom::hash::murmur3_x86_32;
///
/// assert_eq!(murmur3_x86_32(b"", 0), 0);
/// assert_eq!(murmur3_x86_32(b"", 1), 0x514E_28B7);
/// assert_eq!(murmur3_x86_32(b"hello", 0), 0x248B_FA47);
/// ```
#[must_use]
pub fn murmur3_x86_32(bytes: &[u8], seed: u32) -> u32 {
    let mut h1 = seed;

    let mut blocks = bytes.chunks_exact(4);
    for block in &mut blocks {
        let k1 = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);

        h1 ^= mix_k1(k1);
        h1 = h1.rotate_left(13);
        h1 = h1.wrapping_mul(5).wrapping_add(0xe654_6b64);
    }

    // tail
    let tail = blocks.remainder();
    if !tail.is_empty() {
        let mut buf = [0u8; 4];
        buf[..tail.len()].copy_from_slice(tail);
        h1 ^= mix_k1(u32::from_le_bytes(buf));
    }

    // The reference folds the length in as a 32-bit value.
    #[allow(clippy::cast_possible_truncation)]
    {
        h1 ^= bytes.len() as u32;
    }

    fmix32(h1)
}

#[inline]
fn mix_k1(mut k1: u32) -> u32 {
    k1 = k1.wrapping_mul(C1);
    k1 = k1.rotate_left(15);
    k1.wrapping_mul(C2)
}

/// Final avalanche.
#[inline]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}
