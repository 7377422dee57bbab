//! Fixed-width byte values written as hex.
//!
//! [`FixedBytes<N>`] covers every small fixed-width identifier: 4-byte
//! function selectors, 8-byte account discriminators, and any other width.
//! Only hex is accepted; the digit count must be exactly `2 * N`.

use crate::codec::{read_string, write_hex, TokenCodec};
use crate::error::{Result, ValueKind};
use crate::hex;
use crate::options::CodecOptions;
use crate::token::JsonToken;
use std::fmt;

/// `N` bytes read and written as hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FixedBytes<const N: usize>(pub [u8; N]);

/// A 4-byte function selector.
pub type Selector = FixedBytes<4>;

/// An 8-byte account discriminator.
pub type Discriminator = FixedBytes<8>;

impl<const N: usize> FixedBytes<N> {
    pub const ZERO: Self = FixedBytes([0; N]);

    pub const fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }
}

impl<const N: usize> Default for FixedBytes<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const N: usize> fmt::Debug for FixedBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedBytes<{}>({})", N, self)
    }
}

impl<const N: usize> From<[u8; N]> for FixedBytes<N> {
    fn from(bytes: [u8; N]) -> Self {
        FixedBytes(bytes)
    }
}

impl<const N: usize> AsRef<[u8]> for FixedBytes<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Codec for [`FixedBytes<N>`].
#[derive(Clone, Debug, Default)]
pub struct FixedBytesCodec<const N: usize> {
    options: CodecOptions,
}

impl<const N: usize> FixedBytesCodec<N> {
    pub fn new(options: CodecOptions) -> Self {
        FixedBytesCodec { options }
    }
}

impl<const N: usize> TokenCodec for FixedBytesCodec<N> {
    type Value = FixedBytes<N>;

    fn value_kind(&self) -> ValueKind {
        ValueKind::fixed(N)
    }

    fn read(&self, token: &JsonToken<'_>) -> Result<FixedBytes<N>> {
        read_string(
            token,
            self.value_kind(),
            &self.options,
            FixedBytes::default,
            |text| {
                let mut bytes = [0u8; N];
                hex::decode_fixed(text, &mut bytes)?;
                Ok(FixedBytes(bytes))
            },
        )
    }

    fn write<R>(&self, value: &FixedBytes<N>, emit: impl FnOnce(&str) -> R) -> Result<R> {
        write_hex(
            self.value_kind(),
            &self.options,
            &value.0,
            self.options.prefix,
            false,
            emit,
        )
    }
}

impl_codec_value!(@generic<const N: usize> FixedBytes<N> => FixedBytesCodec<N>);

/// Serde helpers writing fixed-width values without the `0x` prefix.
pub mod unprefixed {
    use super::*;

    pub fn serialize<S, const N: usize>(
        value: &FixedBytes<N>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        crate::ser::serialize_with(
            &FixedBytesCodec::<N>::new(CodecOptions::unprefixed()),
            value,
            serializer,
        )
    }

    pub fn deserialize<'de, D, const N: usize>(
        deserializer: D,
    ) -> std::result::Result<FixedBytes<N>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        crate::de::deserialize_with(
            &FixedBytesCodec::<N>::new(CodecOptions::unprefixed()),
            deserializer,
        )
    }
}
