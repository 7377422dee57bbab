//! Deserialization through serde.
//!
//! This module bridges any serde [`Deserializer`] to a [`TokenCodec`]. The
//! deserializer is asked for whatever it holds (`deserialize_any`), and each
//! visitor callback is turned back into the matching [`JsonToken`]:
//!
//! - strings and byte strings become string tokens (already unescaped by the
//!   data format)
//! - unit and `None` become null
//! - integers and floats become numeric tokens
//! - booleans, sequences and maps are reported as the wrong token type
//!
//! ## Usage
//!
//! The value types in this crate implement `Deserialize` through
//! [`deserialize_with`]. Use it directly (or through the `unprefixed` helper
//! modules) to read a field with non-default options:
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_bintext::{CodecOptions, Hash};
//! use serde_bintext::hash::HashCodec;
//!
//! fn strict_hash<'de, D: serde::Deserializer<'de>>(d: D) -> Result<Hash, D::Error> {
//!     serde_bintext::deserialize_with(&HashCodec::new(CodecOptions::strict()), d)
//! }
//!
//! #[derive(Deserialize)]
//! struct Block {
//!     #[serde(deserialize_with = "strict_hash")]
//!     parent: Hash,
//! }
//!
//! assert!(serde_json::from_str::<Block>(r#"{"parent": null}"#).is_err());
//! ```

use crate::codec::TokenCodec;
use crate::token::{JsonToken, Number, TokenKind};
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use std::fmt;

/// Deserializes a value of the codec's kind.
///
/// # Errors
///
/// Returns the data format's error type carrying the codec's message, e.g.
/// `invalid address: text is not hex, Base58 or Base64 of the expected length`.
pub fn deserialize_with<'de, C, D>(codec: &C, deserializer: D) -> Result<C::Value, D::Error>
where
    C: TokenCodec,
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(TokenVisitor::new(codec))
}

/// A [`Visitor`] that rebuilds the token a data format saw and reads it with a codec.
pub struct TokenVisitor<'c, C> {
    codec: &'c C,
}

impl<'c, C: TokenCodec> TokenVisitor<'c, C> {
    pub fn new(codec: &'c C) -> Self {
        TokenVisitor { codec }
    }

    fn read<E: de::Error>(self, token: JsonToken<'_>) -> Result<C::Value, E> {
        self.codec.read(&token).map_err(E::custom)
    }
}

impl<'de, C: TokenCodec> Visitor<'de> for TokenVisitor<'_, C> {
    type Value = C::Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a {} string", self.codec.value_kind())
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.read(JsonToken::string(v.as_bytes()))
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.read(JsonToken::string(v))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.read(JsonToken::Null)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.read(JsonToken::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.read(JsonToken::Number(Number::Unsigned(v)))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.read(JsonToken::Number(Number::Signed(v)))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.read(JsonToken::Number(Number::Float(v)))
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.read(JsonToken::Bool(v))
    }

    fn visit_seq<A>(self, _seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        self.read(JsonToken::Other(TokenKind::StartArray))
    }

    fn visit_map<A>(self, _map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        self.read(JsonToken::Other(TokenKind::StartObject))
    }
}
