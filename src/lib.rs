//! # serde_bintext
//!
//! Reading and writing blockchain binary values (hashes, addresses,
//! signatures, selectors, byte strings, 256-bit and arbitrary-precision
//! integers) as JSON strings.
//!
//! ## Overview
//!
//! Node RPCs disagree on how binary values look in JSON: hex with or without
//! `0x`, upper or lower case, Base58, Base64. This crate reads all the forms a
//! value kind can legitimately arrive in and always writes one canonical form.
//!
//! | Kind | Reads | Writes |
//! |------|-------|--------|
//! | [`Hash`] | 64 hex digits, Base58, Base64 | `0x` + 64 lowercase digits |
//! | [`Selector`], [`Discriminator`], [`FixedBytes<N>`] | `2N` hex digits | `0x` + `2N` digits |
//! | [`Bytes`] | any even number of hex digits | `0x` + digits |
//! | [`Address`] | 40 hex digits, Base58 (1..=32 bytes) | the family it was read in |
//! | [`Signature`] | 128 or 130 hex digits, Base58 (64 bytes) | the shape it was read in |
//! | [`U256`], [`I256`] | `0x` + 64 digits, decimal, small JSON numbers | `0x` + 64 digits |
//! | [`HexBigInt`] | signed hex of any length, decimal | `-`? `0x` + minimal bytes |
//!
//! For the hash, fixed-width and byte-string kinds the `0x` prefix and hex
//! case are optional on input. The integer kinds read unprefixed text as
//! decimal, so their hex input needs the prefix. Null reads as
//! the kind's zero value, except for the integer kinds which reject it by
//! default (see [`CodecOptions`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_bintext::{Address, Hash, U256};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Log {
//!     address: Address,
//!     block_hash: Hash,
//!     value: U256,
//! }
//!
//! let json = r#"{
//!     "address": "0x52908400098527886E0F7030069857D2E4169EE7",
//!     "block_hash": "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8=",
//!     "value": 1000
//! }"#;
//! let log: Log = serde_json::from_str(json).unwrap();
//! assert_eq!(log.value, U256::from(1000u64));
//!
//! let out = serde_json::to_string(&log).unwrap();
//! assert!(out.contains(r#""address":"0x52908400098527886e0f7030069857d2e4169ee7""#));
//! assert!(out.contains(r#""block_hash":"0x000102"#));
//! ```
//!
//! ## Token-level API
//!
//! Streaming JSON readers can skip serde and hand tokens straight to a codec.
//! [`JsonToken`] carries the raw (possibly escaped, possibly split) bytes of a
//! string token; unescaped contiguous tokens are decoded without copying.
//!
//! ```rust
//! use serde_bintext::{JsonToken, Signature, SignatureCodec, TokenCodec};
//!
//! let codec = SignatureCodec::default();
//! let text = format!("0x{}", "11".repeat(65));
//! let signature = codec.read(&JsonToken::string(text.as_bytes())).unwrap();
//! assert!(matches!(signature, Signature::Hex65(_)));
//!
//! // The formatted text is only borrowed for the duration of the callback.
//! let len = codec.write(&signature, |text| text.len()).unwrap();
//! assert_eq!(len, 132);
//! ```
//!
//! ## Buffers
//!
//! Output shorter than [`CodecOptions::stack_threshold`] is formatted on the
//! stack; longer output borrows a buffer from a thread-safe [`BufferPool`],
//! which is returned on every exit path.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: encoding detection and pool reuse at
//! `trace`, pool misses at `debug`, and internal formatting faults at `error`.

#[macro_use]
mod macros;

pub mod address;
pub mod bigint;
pub mod buffer;
pub mod bytes;
pub mod codec;
pub mod de;
pub mod detect;
pub mod error;
pub mod fixed;
pub mod hash;
pub mod hex;
pub mod int;
pub mod numeric;
pub mod options;
pub mod ser;
pub mod signature;
pub mod source;
pub mod token;

pub use address::{Address, AddressCodec, Base58Address};
pub use bigint::{BigIntCodec, HexBigInt};
pub use buffer::{BufferPool, PoolConfig, PoolStats};
pub use bytes::{Bytes, BytesCodec};
pub use codec::{CodecValue, TokenCodec};
pub use de::deserialize_with;
pub use detect::Encoding;
pub use error::{Error, ErrorKind, ExpectedLength, Result, ValueKind};
pub use fixed::{Discriminator, FixedBytes, FixedBytesCodec, Selector};
pub use hash::{Hash, HashCodec};
pub use int::{I256Codec, U256Codec, I256, U256};
pub use options::CodecOptions;
pub use ser::serialize_with;
pub use signature::{Signature, SignatureCodec};
pub use token::{JsonToken, TokenKind};

/// Reads a value from a token with its default codec.
///
/// # Examples
///
/// ```rust
/// use serde_bintext::{read_token, Bytes, JsonToken};
///
/// let bytes: Bytes = read_token(&JsonToken::escaped_string(br"0x0102")).unwrap();
/// assert_eq!(bytes, Bytes::from([0x01, 0x02]));
/// ```
///
/// # Errors
///
/// Returns an error labelled with the value kind if the token cannot be read.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn read_token<T: CodecValue>(token: &JsonToken<'_>) -> Result<T> {
    T::Codec::default().read(token)
}

/// Reads a value from text with its default codec.
///
/// # Errors
///
/// Returns an error labelled with the value kind if the text cannot be read.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_text<T: CodecValue>(text: &str) -> Result<T> {
    read_token(&JsonToken::string(text.as_bytes()))
}

/// Formats a value with its default codec.
///
/// # Examples
///
/// ```rust
/// use serde_bintext::{to_text, I256};
///
/// assert_eq!(to_text(&I256::from(-2i64)).unwrap(), format!("-0x{}02", "0".repeat(62)));
/// ```
///
/// # Errors
///
/// Only fails on an internal formatting fault.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_text<T: CodecValue>(value: &T) -> Result<String> {
    T::Codec::default().write_string(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_token_dispatches_by_type() {
        let text = format!("0x{}", "00".repeat(20));
        let address: Address = read_token(&JsonToken::string(text.as_bytes())).unwrap();
        assert_eq!(address, Address::ZERO);
        let err = read_token::<Hash>(&JsonToken::string(text.as_bytes())).unwrap_err();
        assert_eq!(err.value_kind(), ValueKind::Hash);
    }

    #[test]
    fn test_from_text_to_text() {
        let selector: Selector = from_text("A9059CBB").unwrap();
        assert_eq!(to_text(&selector).unwrap(), "0xa9059cbb");
    }
}
