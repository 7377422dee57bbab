//! The read/write contract shared by every value kind.
//!
//! A [`TokenCodec`] reads one [`JsonToken`] into a value and writes a value as
//! the text of a JSON string. Writing hands the text to a callback instead of
//! returning it, so the caller decides whether to copy it (into a `String`, a
//! serializer, a `fmt::Formatter`) while the formatting buffer is still alive.
//!
//! The helpers in this module are the common plumbing the value-kind codecs
//! are built from: token normalization with the null policy applied, and
//! error labelling.

use crate::buffer;
use crate::error::{Error, ErrorKind, Result, ValueKind};
use crate::hex;
use crate::options::CodecOptions;
use crate::source::{normalize, Scratch};
use crate::token::JsonToken;

/// Reads and writes one value kind at the JSON boundary.
///
/// Codecs hold only immutable configuration and may be shared across threads.
///
/// # Examples
///
/// ```rust
/// use serde_bintext::{JsonToken, Selector, TokenCodec};
/// use serde_bintext::fixed::FixedBytesCodec;
///
/// let codec = FixedBytesCodec::<4>::default();
/// let selector: Selector = codec.read(&JsonToken::string(b"0xa9059cbb")).unwrap();
/// let len = codec.write(&selector, |text| text.len()).unwrap();
/// assert_eq!(len, 10);
/// ```
pub trait TokenCodec {
    type Value;

    /// The kind used to label errors.
    fn value_kind(&self) -> ValueKind;

    /// Reads a value from a single token.
    fn read(&self, token: &JsonToken<'_>) -> Result<Self::Value>;

    /// Formats `value` and passes the text to `emit`.
    ///
    /// The text is only valid for the duration of `emit`.
    fn write<R>(&self, value: &Self::Value, emit: impl FnOnce(&str) -> R) -> Result<R>;

    /// Formats `value` into an owned string.
    fn write_string(&self, value: &Self::Value) -> Result<String> {
        self.write(value, str::to_owned)
    }
}

/// A value with a default codec.
///
/// Implemented by every value type in this crate; it is what the serde impls
/// and the crate-level [`read_token`](crate::read_token)/[`to_text`](crate::to_text)
/// helpers dispatch through.
pub trait CodecValue: Sized {
    type Codec: TokenCodec<Value = Self> + Default;
}

/// Normalizes a string token and parses it, applying the null policy.
pub(crate) fn read_string<T>(
    token: &JsonToken<'_>,
    kind: ValueKind,
    options: &CodecOptions,
    zero: impl FnOnce() -> T,
    parse: impl FnOnce(&[u8]) -> std::result::Result<T, ErrorKind>,
) -> Result<T> {
    let mut scratch = Scratch::new();
    match normalize(token, &mut scratch).map_err(|err| Error::new(kind, err))? {
        None if options.nullable => Ok(zero()),
        None => Err(Error::new(kind, ErrorKind::NullNotAllowed)),
        Some(text) => parse(text).map_err(|err| Error::new(kind, err)),
    }
}

/// Formats `bytes` as hex using the codec's buffer settings.
pub(crate) fn write_hex<R>(
    kind: ValueKind,
    options: &CodecOptions,
    bytes: &[u8],
    prefix: bool,
    negative: bool,
    emit: impl FnOnce(&str) -> R,
) -> Result<R> {
    hex::format_with(
        bytes,
        prefix,
        negative,
        options.stack_threshold,
        &options.pool,
        emit,
    )
    .map_err(|err| Error::new(kind, err))
}

/// Formats `bytes` as Base58 using the codec's alphabet and buffer settings.
pub(crate) fn write_base58<R>(
    kind: ValueKind,
    options: &CodecOptions,
    bytes: &[u8],
    emit: impl FnOnce(&str) -> R,
) -> Result<R> {
    // Base58 needs at most ~1.37 characters per byte; each leading zero byte takes one.
    let len = bytes.len() * 2;
    buffer::format_into(
        len,
        options.stack_threshold,
        &options.pool,
        |out| {
            bs58::encode(bytes)
                .with_alphabet(options.base58_alphabet)
                .onto(out)
                .map_err(|_| ErrorKind::FormatFault {
                    expected: len,
                    written: 0,
                })
        },
        emit,
    )
    .map_err(|err| Error::new(kind, err))
}
