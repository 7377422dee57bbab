//! 32-byte hashes.
//!
//! A hash is read from hex (with or without `0x`), Base58 or Base64 text and
//! always written as lowercase hex. See [`crate::detect`] for the order in
//! which encodings are tried.

use crate::codec::{read_string, write_hex, TokenCodec};
use crate::detect::{self, Encoding};
use crate::error::{Result, ValueKind};
use crate::options::CodecOptions;
use crate::token::JsonToken;
use std::fmt;
use tracing::trace;

/// Byte width of a [`Hash`].
pub const HASH_LEN: usize = 32;

/// A 32-byte hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash(pub [u8; HASH_LEN]);

impl Hash {
    pub const ZERO: Hash = Hash([0; HASH_LEN]);

    pub const fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; HASH_LEN]
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({self})")
    }
}

impl From<[u8; HASH_LEN]> for Hash {
    fn from(bytes: [u8; HASH_LEN]) -> Self {
        Hash(bytes)
    }
}

impl From<Hash> for [u8; HASH_LEN] {
    fn from(hash: Hash) -> Self {
        hash.0
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Codec for [`Hash`].
///
/// # Examples
///
/// ```rust
/// use serde_bintext::{Hash, HashCodec, JsonToken, TokenCodec};
///
/// let codec = HashCodec::default();
/// let base64 = JsonToken::string(b"AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8=");
/// let hash = codec.read(&base64).unwrap();
/// assert_eq!(hash.0[31], 0x1f);
/// assert_eq!(
///     codec.write_string(&hash).unwrap(),
///     "0x000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f"
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct HashCodec {
    options: CodecOptions,
}

impl HashCodec {
    pub fn new(options: CodecOptions) -> Self {
        HashCodec { options }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Reads a hash and reports which encoding the text used.
    ///
    /// Null (when allowed) reads as the zero hash with [`Encoding::Hex`].
    pub fn read_detected(&self, token: &JsonToken<'_>) -> Result<(Hash, Encoding)> {
        read_string(
            token,
            ValueKind::Hash,
            &self.options,
            || (Hash::ZERO, Encoding::Hex),
            |text| {
                let decoded = detect::detect(text, &detect::HASH, self.options.base58_alphabet)?;
                let mut bytes = [0u8; HASH_LEN];
                bytes.copy_from_slice(decoded.as_bytes());
                trace!(encoding = %decoded.encoding, "read hash");
                Ok((Hash(bytes), decoded.encoding))
            },
        )
    }
}

impl TokenCodec for HashCodec {
    type Value = Hash;

    fn value_kind(&self) -> ValueKind {
        ValueKind::Hash
    }

    fn read(&self, token: &JsonToken<'_>) -> Result<Hash> {
        self.read_detected(token).map(|(hash, _)| hash)
    }

    fn write<R>(&self, value: &Hash, emit: impl FnOnce(&str) -> R) -> Result<R> {
        write_hex(
            ValueKind::Hash,
            &self.options,
            &value.0,
            self.options.prefix,
            false,
            emit,
        )
    }
}

impl_codec_value!(Hash => HashCodec);

with_module! {
    /// Serde helpers writing a [`Hash`] without the `0x` prefix.
    ///
    /// ```rust
    /// #[derive(serde::Serialize)]
    /// struct Row {
    ///     #[serde(with = "serde_bintext::hash::unprefixed")]
    ///     id: serde_bintext::Hash,
    /// }
    ///
    /// let json = serde_json::to_string(&Row { id: serde_bintext::Hash::ZERO }).unwrap();
    /// assert_eq!(json, format!(r#"{{"id":"{}"}}"#, "0".repeat(64)));
    /// ```
    unprefixed, Hash, HashCodec::new(CodecOptions::unprefixed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use base64::Engine;

    fn pattern() -> [u8; HASH_LEN] {
        let mut bytes = [0u8; HASH_LEN];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = (i as u8).wrapping_mul(7);
        }
        bytes
    }

    #[test]
    fn test_every_encoding_reads_the_same_hash() {
        let codec = HashCodec::default();
        let bytes = pattern();
        let texts = [
            format!("0x{}", ::hex::encode(bytes)),
            format!("0X{}", ::hex::encode_upper(bytes)),
            ::hex::encode(bytes),
            bs58::encode(bytes).into_string(),
            base64::engine::general_purpose::STANDARD.encode(bytes),
        ];
        for text in &texts {
            let hash = codec.read(&JsonToken::string(text.as_bytes())).unwrap();
            assert_eq!(hash.0, bytes, "{text}");
        }
    }

    #[test]
    fn test_read_detected_reports_encoding() {
        let codec = HashCodec::default();
        let text = bs58::encode(pattern()).into_string();
        let (_, encoding) = codec.read_detected(&JsonToken::string(text.as_bytes())).unwrap();
        assert_eq!(encoding, Encoding::Base58);
    }

    #[test]
    fn test_write_is_lowercase_hex() {
        let codec = HashCodec::default();
        let text = codec.write_string(&Hash([0xAB; 32])).unwrap();
        assert_eq!(text, format!("0x{}", "ab".repeat(32)));

        let codec = HashCodec::new(CodecOptions::unprefixed());
        assert_eq!(codec.write_string(&Hash::ZERO).unwrap(), "0".repeat(64));
    }

    #[test]
    fn test_null_is_zero_hash() {
        assert_eq!(HashCodec::default().read(&JsonToken::Null).unwrap(), Hash::ZERO);
    }

    #[test]
    fn test_number_token_is_rejected() {
        let err = HashCodec::default()
            .read(&JsonToken::number(b"12"))
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::WrongTokenType { .. }));
    }

    #[test]
    fn test_debug_shows_hex() {
        assert_eq!(
            format!("{:?}", Hash::ZERO),
            format!("Hash(0x{})", "0".repeat(64))
        );
    }
}
