//! Canonical byte encoding of values.
//!
//! Every value is hashed through its canonical byte form. The form starts with a kind tag, so
//! values of different kinds never collide by construction: `12u8`, `12i32` and `"12"` produce
//! three different byte sequences. Within a kind the encoding is injective.
//!
//! | Kind                                   | Tag            | Payload                              |
//! |----------------------------------------|----------------|--------------------------------------|
//! | `u8`..`u128`, `usize` (as `u64`)       | `0x01`, width  | little-endian                        |
//! | `i8`..`i128`, `isize` (as `i64`)       | `0x02`, width  | little-endian two's complement       |
//! | `bool`                                 | `0x03`         | `0` or `1`                           |
//! | `char`                                 | `0x04`         | scalar value as `u32` LE             |
//! | `f32`, `f64`                           | `0x05`, width  | IEEE bits LE, `-0.0` stored as `0.0` |
//! | `str`, `String`                        | `0x06`         | `u32` LE length, UTF-8               |
//! | `[u8]`, `Vec<u8>`, `[u8; N]`           | `0x07`         | `u32` LE length, bytes               |
//! | `(A, B)`, `(A, B, C)`                  | `0x08`, arity  | each element's encoding              |
//! | `Option<T>`                            | `0x09`         | `0`, or `1` then the inner encoding  |
//! | [`RawBytes`]                           | none           | bytes verbatim                       |
//!
//! NaN has no canonical form and is rejected. Variable-length payloads longer than
//! `u32::MAX` bytes are rejected rather than truncated.
//!
//! # Examples
//!
//! ```
//! use seedbloom::encode::{encode, RawBytes};
//!
//! assert_eq!(encode(&12u8).unwrap(), vec![0x01, 1, 12]);
//! assert_eq!(encode("12").unwrap(), vec![0x06, 2, 0, 0, 0, b'1', b'2']);
//! assert_eq!(encode(&RawBytes(b"12")).unwrap(), b"12".to_vec());
//!
//! assert!(encode(&f64::NAN).is_err());
//! ```
//!
//! Implement [`ByteEncode`] for your own types by composing the encodings of their fields:
//!
//! ```
//! use seedbloom::encode::{encode, ByteEncode};
//! use seedbloom::Result;
//!
//! struct UserId {
//!     tenant: u32,
//!     name: String,
//! }
//!
//! impl ByteEncode for UserId {
//!     fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
//!         self.tenant.encode_into(out)?;
//!         self.name.encode_into(out)
//!     }
//! }
//!
//! let id = UserId { tenant: 7, name: "alice".into() };
//! assert!(!encode(&id).unwrap().is_empty());
//! ```

use crate::error::{Result, SeedBloomError};

mod tag {
    pub const UNSIGNED: u8 = 0x01;
    pub const SIGNED: u8 = 0x02;
    pub const BOOL: u8 = 0x03;
    pub const CHAR: u8 = 0x04;
    pub const FLOAT: u8 = 0x05;
    pub const STR: u8 = 0x06;
    pub const BYTES: u8 = 0x07;
    pub const TUPLE: u8 = 0x08;
    pub const OPTION: u8 = 0x09;
}

/// Conversion of a value into its canonical byte form.
///
/// Implementations append to `out` and must be deterministic: equal values always produce
/// equal bytes, and unequal values of the same type should produce unequal bytes.
pub trait ByteEncode {
    /// Append the canonical encoding of `self` to `out`.
    ///
    /// # Errors
    ///
    /// [`SeedBloomError::EncodingError`] if the value has no canonical form.
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()>;
}

/// Canonical byte form of `value`.
///
/// # Errors
///
/// [`SeedBloomError::EncodingError`] if the value has no canonical form.
pub fn encode<V: ByteEncode + ?Sized>(value: &V) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    value.encode_into(&mut out)?;
    Ok(out)
}

/// Bytes the caller has already canonicalized, hashed exactly as given.
///
/// `RawBytes` skips tagging, so it is the only input whose encoding can be empty or can
/// collide with a tagged value. Use it when the caller controls the byte format end to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawBytes<'a>(pub &'a [u8]);

impl ByteEncode for RawBytes<'_> {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(self.0);
        Ok(())
    }
}

fn write_len(out: &mut Vec<u8>, len: usize) -> Result<()> {
    let len = u32::try_from(len).map_err(|_| {
        SeedBloomError::encoding(format!(
            "payload of {} bytes exceeds the {}-byte limit",
            len,
            u32::MAX
        ))
    })?;
    out.extend_from_slice(&len.to_le_bytes());
    Ok(())
}

macro_rules! impl_int {
    ($tag:expr => $($t:ty),+) => {
        $(
            impl ByteEncode for $t {
                fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
                    let bytes = self.to_le_bytes();
                    out.push($tag);
                    #[allow(clippy::cast_possible_truncation)]
                    out.push(bytes.len() as u8);
                    out.extend_from_slice(&bytes);
                    Ok(())
                }
            }
        )+
    };
}

impl_int!(tag::UNSIGNED => u8, u16, u32, u64, u128);
impl_int!(tag::SIGNED => i8, i16, i32, i64, i128);

impl ByteEncode for usize {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        (*self as u64).encode_into(out)
    }
}

impl ByteEncode for isize {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        (*self as i64).encode_into(out)
    }
}

impl ByteEncode for bool {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        out.push(tag::BOOL);
        out.push(u8::from(*self));
        Ok(())
    }
}

impl ByteEncode for char {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        out.push(tag::CHAR);
        out.extend_from_slice(&u32::from(*self).to_le_bytes());
        Ok(())
    }
}

macro_rules! impl_float {
    ($($t:ty),+) => {
        $(
            impl ByteEncode for $t {
                fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
                    if self.is_nan() {
                        return Err(SeedBloomError::encoding(concat!(
                            "NaN ",
                            stringify!($t),
                            " has no canonical form"
                        )));
                    }

                    // -0.0 == 0.0, so both must hash the same.
                    let value = if *self == 0.0 { 0.0 } else { *self };
                    let bytes = value.to_bits().to_le_bytes();
                    out.push(tag::FLOAT);
                    #[allow(clippy::cast_possible_truncation)]
                    out.push(bytes.len() as u8);
                    out.extend_from_slice(&bytes);
                    Ok(())
                }
            }
        )+
    };
}

impl_float!(f32, f64);

impl ByteEncode for str {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        out.push(tag::STR);
        write_len(out, self.len())?;
        out.extend_from_slice(self.as_bytes());
        Ok(())
    }
}

impl ByteEncode for String {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        self.as_str().encode_into(out)
    }
}

impl ByteEncode for [u8] {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        out.push(tag::BYTES);
        write_len(out, self.len())?;
        out.extend_from_slice(self);
        Ok(())
    }
}

impl ByteEncode for Vec<u8> {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        self.as_slice().encode_into(out)
    }
}

impl<const N: usize> ByteEncode for [u8; N] {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        self.as_slice().encode_into(out)
    }
}

impl<A: ByteEncode, B: ByteEncode> ByteEncode for (A, B) {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        out.push(tag::TUPLE);
        out.push(2);
        self.0.encode_into(out)?;
        self.1.encode_into(out)
    }
}

impl<A: ByteEncode, B: ByteEncode, C: ByteEncode> ByteEncode for (A, B, C) {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        out.push(tag::TUPLE);
        out.push(3);
        self.0.encode_into(out)?;
        self.1.encode_into(out)?;
        self.2.encode_into(out)
    }
}

impl<T: ByteEncode> ByteEncode for Option<T> {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        out.push(tag::OPTION);
        match self {
            None => {
                out.push(0);
                Ok(())
            }
            Some(inner) => {
                out.push(1);
                inner.encode_into(out)
            }
        }
    }
}

impl<T: ByteEncode + ?Sized> ByteEncode for &T {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        (**self).encode_into(out)
    }
}

impl<T: ByteEncode + ?Sized> ByteEncode for Box<T> {
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        (**self).encode_into(out)
    }
}
