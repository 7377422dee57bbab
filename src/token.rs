//! JSON tokens as handed over by an external reader.
//!
//! The codecs in this crate never parse JSON documents themselves. A reader
//! (a streaming tokenizer, or a serde data format via [`crate::de`]) supplies one
//! token at a time and the codec turns it into a value.
//!
//! A string token carries its *raw* bytes: still escaped, and possibly split
//! across several buffer segments when the reader's input straddled a buffer
//! boundary. [`crate::source::normalize`] turns those into one contiguous view.
//!
//! ```rust
//! use serde_bintext::JsonToken;
//!
//! let plain = JsonToken::string(b"0xdeadbeef");
//! let escaped = JsonToken::escaped_string(br"0xdeadbeef");
//! let split = [b"0xdead".as_slice(), b"beef".as_slice()];
//! let segmented = JsonToken::segmented(&split, false);
//! assert_eq!(segmented.kind().to_string(), "string");
//! # let _ = (plain, escaped);
//! ```

use std::fmt;

/// A single JSON token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JsonToken<'a> {
    Null,
    String(RawString<'a>),
    Number(Number<'a>),
    Bool(bool),
    /// Any structural token (object/array delimiters, property names).
    Other(TokenKind),
}

impl<'a> JsonToken<'a> {
    /// A contiguous string token without escape sequences.
    pub const fn string(raw: &'a [u8]) -> Self {
        JsonToken::String(RawString::contiguous(raw))
    }

    /// A contiguous string token whose raw bytes contain escape sequences.
    pub const fn escaped_string(raw: &'a [u8]) -> Self {
        JsonToken::String(RawString::escaped(raw))
    }

    /// A string token whose raw bytes are split across `segments`.
    pub const fn segmented(segments: &'a [&'a [u8]], escaped: bool) -> Self {
        JsonToken::String(RawString::segmented(segments, escaped))
    }

    /// A numeric token given as raw JSON text.
    pub const fn number(raw: &'a [u8]) -> Self {
        JsonToken::Number(Number::Raw(raw))
    }

    /// Classifies the token for error messages.
    pub fn kind(&self) -> TokenKind {
        match self {
            JsonToken::Null => TokenKind::Null,
            JsonToken::String(_) => TokenKind::String,
            JsonToken::Number(_) => TokenKind::Number,
            JsonToken::Bool(_) => TokenKind::Bool,
            JsonToken::Other(kind) => *kind,
        }
    }
}

/// Raw bytes of a string token, before escape decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawString<'a> {
    segments: Segments<'a>,
    escaped: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Segments<'a> {
    Contiguous(&'a [u8]),
    Split(&'a [&'a [u8]]),
}

impl<'a> RawString<'a> {
    pub const fn contiguous(raw: &'a [u8]) -> Self {
        RawString {
            segments: Segments::Contiguous(raw),
            escaped: false,
        }
    }

    pub const fn escaped(raw: &'a [u8]) -> Self {
        RawString {
            segments: Segments::Contiguous(raw),
            escaped: true,
        }
    }

    pub const fn segmented(segments: &'a [&'a [u8]], escaped: bool) -> Self {
        RawString {
            segments: Segments::Split(segments),
            escaped,
        }
    }

    /// Whether the raw bytes contain escape sequences.
    pub const fn has_escapes(&self) -> bool {
        self.escaped
    }

    /// Total raw byte length across all segments.
    pub fn raw_len(&self) -> usize {
        match self.segments {
            Segments::Contiguous(raw) => raw.len(),
            Segments::Split(parts) => parts.iter().map(|p| p.len()).sum(),
        }
    }

    pub(crate) fn segments(&self) -> Segments<'a> {
        self.segments
    }
}

/// A numeric token.
///
/// Streaming readers hand over the raw text; serde data formats hand over an
/// already converted primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number<'a> {
    Raw(&'a [u8]),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

/// Token classification, used in [`crate::ErrorKind::WrongTokenType`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Null,
    String,
    Number,
    Bool,
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    PropertyName,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::Null => "null",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Bool => "boolean",
            TokenKind::StartObject => "start of object",
            TokenKind::EndObject => "end of object",
            TokenKind::StartArray => "start of array",
            TokenKind::EndArray => "end of array",
            TokenKind::PropertyName => "property name",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_len_sums_segments() {
        let parts = [b"0x12".as_slice(), b"34".as_slice(), b"".as_slice()];
        let raw = RawString::segmented(&parts, false);
        assert_eq!(raw.raw_len(), 6);
        assert!(!raw.has_escapes());
    }

    #[test]
    fn test_token_kind() {
        assert_eq!(JsonToken::Null.kind(), TokenKind::Null);
        assert_eq!(JsonToken::number(b"12").kind(), TokenKind::Number);
        assert_eq!(
            JsonToken::Other(TokenKind::StartArray).kind().to_string(),
            "start of array"
        );
    }
}
