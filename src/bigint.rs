//! Arbitrary-precision integers written as signed hex.
//!
//! Reading accepts `-`? + `0x` + any non-zero number of hex digits (odd
//! counts included), decimal text, or a JSON number that fits in 64 bits.
//! Writing produces `-`? + `0x` + the minimal big-endian magnitude bytes;
//! zero is written as `0x00`.

use crate::codec::{read_string, write_hex, TokenCodec};
use crate::error::{Error, Result, ValueKind};
use crate::hex;
use crate::numeric::{self, Integer};
use crate::options::CodecOptions;
use crate::token::JsonToken;
use num_bigint::{BigInt, Sign};
use std::ops::Deref;

/// A [`num_bigint::BigInt`] that reads and writes signed hex.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct HexBigInt(pub BigInt);

impl Deref for HexBigInt {
    type Target = BigInt;

    fn deref(&self) -> &BigInt {
        &self.0
    }
}

impl From<BigInt> for HexBigInt {
    fn from(value: BigInt) -> Self {
        HexBigInt(value)
    }
}

impl From<HexBigInt> for BigInt {
    fn from(value: HexBigInt) -> Self {
        value.0
    }
}

impl From<i64> for HexBigInt {
    fn from(value: i64) -> Self {
        HexBigInt(BigInt::from(value))
    }
}

impl From<u64> for HexBigInt {
    fn from(value: u64) -> Self {
        HexBigInt(BigInt::from(value))
    }
}

/// Codec for [`HexBigInt`].
///
/// # Examples
///
/// ```rust
/// use serde_bintext::{HexBigInt, BigIntCodec, JsonToken, TokenCodec};
///
/// let codec = BigIntCodec::default();
/// let value = codec.read(&JsonToken::string(b"-0xfff")).unwrap();
/// assert_eq!(value, HexBigInt::from(-4095i64));
/// assert_eq!(codec.write_string(&value).unwrap(), "-0x0fff");
/// ```
#[derive(Clone, Debug)]
pub struct BigIntCodec {
    options: CodecOptions,
}

impl BigIntCodec {
    pub fn new(options: CodecOptions) -> Self {
        BigIntCodec { options }
    }
}

impl Default for BigIntCodec {
    fn default() -> Self {
        BigIntCodec::new(CodecOptions::strict())
    }
}

impl TokenCodec for BigIntCodec {
    type Value = HexBigInt;

    fn value_kind(&self) -> ValueKind {
        ValueKind::BigInt
    }

    fn read(&self, token: &JsonToken<'_>) -> Result<HexBigInt> {
        if let JsonToken::Number(number) = token {
            return numeric::to_integer(number, self.options.numeric_token_limit)
                .map(|integer| match integer {
                    Integer::Unsigned(value) => HexBigInt::from(value),
                    Integer::Signed(value) => HexBigInt::from(value),
                })
                .map_err(|err| Error::new(ValueKind::BigInt, err));
        }
        read_string(token, ValueKind::BigInt, &self.options, HexBigInt::default, |text| {
            let text = hex::split(text, true)?;
            let magnitude = if text.prefixed {
                numeric::parse_hex_digits(text.digits, text.offset)?
            } else {
                numeric::parse_decimal(text.digits, text.offset)?
            };
            let sign = if text.negative { Sign::Minus } else { Sign::Plus };
            Ok(HexBigInt(BigInt::from_biguint(sign, magnitude)))
        })
    }

    fn write<R>(&self, value: &HexBigInt, emit: impl FnOnce(&str) -> R) -> Result<R> {
        let (sign, magnitude) = value.0.to_bytes_be();
        write_hex(
            ValueKind::BigInt,
            &self.options,
            &magnitude,
            true,
            sign == Sign::Minus,
            emit,
        )
    }
}

impl_codec_value!(HexBigInt => BigIntCodec);
