//! Variable-length byte strings written as hex.
//!
//! Any even number of hex digits is accepted, including none: `"0x"` and
//! `""` both read as the empty byte string. Output is `0x` followed by two
//! lowercase digits per byte. Long values are formatted in a pooled buffer
//! (see [`crate::buffer`]).

use crate::codec::{read_string, write_hex, TokenCodec};
use crate::error::{Result, ValueKind};
use crate::hex;
use crate::options::CodecOptions;
use crate::token::JsonToken;
use std::fmt;
use std::ops::Deref;

/// An owned byte string.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn new() -> Self {
        Bytes(Vec::new())
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl fmt::Debug for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytes({self})")
    }
}

impl Deref for Bytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(bytes: Vec<u8>) -> Self {
        Bytes(bytes)
    }
}

impl From<&[u8]> for Bytes {
    fn from(bytes: &[u8]) -> Self {
        Bytes(bytes.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for Bytes {
    fn from(bytes: [u8; N]) -> Self {
        Bytes(bytes.to_vec())
    }
}

impl From<Bytes> for Vec<u8> {
    fn from(bytes: Bytes) -> Self {
        bytes.0
    }
}

/// Codec for [`Bytes`].
///
/// # Examples
///
/// ```rust
/// use serde_bintext::{Bytes, BytesCodec, JsonToken, TokenCodec};
///
/// let codec = BytesCodec::default();
/// assert_eq!(codec.read(&JsonToken::string(b"0x")).unwrap(), Bytes::new());
/// assert_eq!(codec.write_string(&Bytes::from([0xca, 0xfe])).unwrap(), "0xcafe");
/// ```
#[derive(Clone, Debug, Default)]
pub struct BytesCodec {
    options: CodecOptions,
}

impl BytesCodec {
    pub fn new(options: CodecOptions) -> Self {
        BytesCodec { options }
    }
}

impl TokenCodec for BytesCodec {
    type Value = Bytes;

    fn value_kind(&self) -> ValueKind {
        ValueKind::Bytes
    }

    fn read(&self, token: &JsonToken<'_>) -> Result<Bytes> {
        read_string(token, ValueKind::Bytes, &self.options, Bytes::new, |text| {
            hex::decode_variable(text).map(Bytes)
        })
    }

    fn write<R>(&self, value: &Bytes, emit: impl FnOnce(&str) -> R) -> Result<R> {
        write_hex(
            ValueKind::Bytes,
            &self.options,
            &value.0,
            self.options.prefix,
            false,
            emit,
        )
    }
}

impl_codec_value!(Bytes => BytesCodec);

with_module! {
    /// Serde helpers writing [`Bytes`] without the `0x` prefix.
    unprefixed, Bytes, BytesCodec::new(CodecOptions::unprefixed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{BufferPool, PoolConfig};
    use crate::error::{ErrorKind, ExpectedLength};
    use std::sync::Arc;

    #[test]
    fn test_empty() {
        let codec = BytesCodec::default();
        assert_eq!(codec.read(&JsonToken::string(b"")).unwrap(), Bytes::new());
        assert_eq!(codec.write_string(&Bytes::new()).unwrap(), "0x");
    }

    #[test]
    fn test_odd_digit_count() {
        let err = BytesCodec::default()
            .read(&JsonToken::string(b"0x123"))
            .unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::InvalidLength {
                expected: ExpectedLength::Even,
                found: 3
            }
        );
    }

    #[test]
    fn test_threshold_boundary() {
        let pool = Arc::new(BufferPool::new(PoolConfig::default()));
        let options = CodecOptions::new()
            .with_stack_threshold(64)
            .with_pool(pool.clone());
        let codec = BytesCodec::new(options);

        // 31 bytes -> 64 characters: at the threshold, so pooled.
        let at = Bytes::from(vec![0x5a; 31]);
        let text = codec.write_string(&at).unwrap();
        assert_eq!(text.len(), 64);
        assert_eq!(pool.stats().rented, 1);

        // 30 bytes -> 62 characters: below the threshold.
        let below = Bytes::from(vec![0x5a; 30]);
        assert_eq!(codec.write_string(&below).unwrap().len(), 62);
        assert_eq!(pool.stats().rented, 1);
        assert_eq!(pool.stats().outstanding(), 0);
    }

    #[test]
    fn test_stack_and_pool_agree() {
        let bytes = Bytes::from((0..200u8).collect::<Vec<_>>());
        let stack = BytesCodec::new(CodecOptions::new().with_stack_threshold(usize::MAX));
        let pooled = BytesCodec::new(CodecOptions::new().with_stack_threshold(0));
        assert_eq!(stack.write_string(&bytes).unwrap(), pooled.write_string(&bytes).unwrap());
    }
}
