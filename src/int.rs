//! 256-bit integers.
//!
//! [`U256`] and [`I256`] are stored as 32 big-endian bytes (two's complement
//! for `I256`). Text is either `0x` followed by exactly 64 hex digits (with a
//! leading `-` for negative `I256` magnitudes) or decimal digits. Small values
//! may also arrive as JSON numbers; anything that does not fit in 64 bits has
//! to be sent as a string.
//!
//! Values are written as `0x` + 64 lowercase digits; a negative `I256` is
//! written as `-0x` followed by its magnitude.
//!
//! Null is rejected by default; use [`CodecOptions::with_nullable`] to read it
//! as zero.

use crate::codec::{read_string, write_hex, TokenCodec};
use crate::error::{Error, ErrorKind, Result, ValueKind};
use crate::hex::{self, HexText};
use crate::numeric::{self, Integer};
use crate::options::CodecOptions;
use crate::token::JsonToken;
use num_bigint::{BigInt, BigUint, Sign};

/// Byte width of a 256-bit word.
pub const WORD_LEN: usize = 32;

/// An unsigned 256-bit integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct U256(pub [u8; WORD_LEN]);

/// A signed 256-bit integer in two's complement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct I256(pub [u8; WORD_LEN]);

impl U256 {
    pub const ZERO: U256 = U256([0; WORD_LEN]);
    pub const MAX: U256 = U256([0xff; WORD_LEN]);

    pub const fn from_be_bytes(bytes: [u8; WORD_LEN]) -> Self {
        U256(bytes)
    }

    pub const fn to_be_bytes(self) -> [u8; WORD_LEN] {
        self.0
    }
}

impl From<u64> for U256 {
    fn from(value: u64) -> Self {
        let mut word = [0u8; WORD_LEN];
        word[WORD_LEN - 8..].copy_from_slice(&value.to_be_bytes());
        U256(word)
    }
}

impl From<u128> for U256 {
    fn from(value: u128) -> Self {
        let mut word = [0u8; WORD_LEN];
        word[WORD_LEN - 16..].copy_from_slice(&value.to_be_bytes());
        U256(word)
    }
}

impl From<U256> for BigUint {
    fn from(value: U256) -> Self {
        BigUint::from_bytes_be(&value.0)
    }
}

impl TryFrom<&BigUint> for U256 {
    type Error = Error;

    fn try_from(value: &BigUint) -> Result<Self> {
        numeric::to_word(value)
            .map(U256)
            .map_err(|err| Error::new(ValueKind::U256, err))
    }
}

/// Two's complement negation of a big-endian word.
fn negate(word: &mut [u8; WORD_LEN]) {
    let mut carry = true;
    for byte in word.iter_mut().rev() {
        let (sum, overflow) = (!*byte).overflowing_add(carry as u8);
        *byte = sum;
        carry = overflow;
    }
}

impl I256 {
    pub const ZERO: I256 = I256([0; WORD_LEN]);

    pub const MIN: I256 = {
        let mut word = [0u8; WORD_LEN];
        word[0] = 0x80;
        I256(word)
    };

    pub const MAX: I256 = {
        let mut word = [0xffu8; WORD_LEN];
        word[0] = 0x7f;
        I256(word)
    };

    pub const fn is_negative(&self) -> bool {
        self.0[0] & 0x80 != 0
    }

    /// The absolute value as an unsigned big-endian word.
    pub fn magnitude(&self) -> [u8; WORD_LEN] {
        let mut word = self.0;
        if self.is_negative() {
            negate(&mut word);
        }
        word
    }

    /// Builds a value from a sign and a big-endian magnitude.
    ///
    /// Returns `None` if the result does not fit: magnitudes must be below
    /// 2^255, or equal to 2^255 when negative.
    pub fn from_sign_magnitude(negative: bool, magnitude: [u8; WORD_LEN]) -> Option<Self> {
        let top_bit = magnitude[0] & 0x80 != 0;
        if !negative {
            return (!top_bit).then_some(I256(magnitude));
        }
        if top_bit && magnitude != I256::MIN.0 {
            return None;
        }
        let mut word = magnitude;
        negate(&mut word);
        Some(I256(word))
    }
}

impl PartialOrd for I256 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for I256 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Flipping the sign bit maps two's complement order onto unsigned order.
        let mut a = self.0;
        let mut b = other.0;
        a[0] ^= 0x80;
        b[0] ^= 0x80;
        a.cmp(&b)
    }
}

impl From<i64> for I256 {
    fn from(value: i64) -> Self {
        let mut word = if value < 0 { [0xff; WORD_LEN] } else { [0; WORD_LEN] };
        word[WORD_LEN - 8..].copy_from_slice(&value.to_be_bytes());
        I256(word)
    }
}

impl From<u64> for I256 {
    fn from(value: u64) -> Self {
        I256(U256::from(value).0)
    }
}

impl From<I256> for BigInt {
    fn from(value: I256) -> Self {
        BigInt::from_signed_bytes_be(&value.0)
    }
}

impl TryFrom<&BigInt> for I256 {
    type Error = Error;

    fn try_from(value: &BigInt) -> Result<Self> {
        let overflow = || Error::new(ValueKind::I256, ErrorKind::NumericOverflow);
        let magnitude = numeric::to_word(value.magnitude()).map_err(|_| overflow())?;
        I256::from_sign_magnitude(value.sign() == Sign::Minus, magnitude).ok_or_else(overflow)
    }
}

/// Reads the magnitude of integer text: `0x` + 64 digits, or decimal.
fn parse_magnitude(text: HexText<'_>) -> std::result::Result<[u8; WORD_LEN], ErrorKind> {
    if text.prefixed {
        let mut word = [0u8; WORD_LEN];
        hex::decode_exact(text, &mut word)?;
        Ok(word)
    } else {
        numeric::to_word(&numeric::parse_decimal(text.digits, text.offset)?)
    }
}

/// Codec for [`U256`].
///
/// # Examples
///
/// ```rust
/// use serde_bintext::{JsonToken, TokenCodec, U256, U256Codec};
///
/// let codec = U256Codec::default();
/// assert_eq!(codec.read(&JsonToken::number(b"255")).unwrap(), U256::from(255u64));
/// assert_eq!(codec.read(&JsonToken::string(b"255")).unwrap(), U256::from(255u64));
/// assert!(codec.read(&JsonToken::Null).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct U256Codec {
    options: CodecOptions,
}

impl U256Codec {
    pub fn new(options: CodecOptions) -> Self {
        U256Codec { options }
    }
}

impl Default for U256Codec {
    fn default() -> Self {
        U256Codec::new(CodecOptions::strict())
    }
}

impl TokenCodec for U256Codec {
    type Value = U256;

    fn value_kind(&self) -> ValueKind {
        ValueKind::U256
    }

    fn read(&self, token: &JsonToken<'_>) -> Result<U256> {
        if let JsonToken::Number(number) = token {
            return match numeric::to_integer(number, self.options.numeric_token_limit) {
                Ok(Integer::Unsigned(value)) => Ok(U256::from(value)),
                Ok(Integer::Signed(_)) => Err(ErrorKind::NumericOverflow),
                Err(err) => Err(err),
            }
            .map_err(|err| Error::new(ValueKind::U256, err));
        }
        read_string(token, ValueKind::U256, &self.options, U256::default, |text| {
            parse_magnitude(hex::split(text, false)?).map(U256)
        })
    }

    fn write<R>(&self, value: &U256, emit: impl FnOnce(&str) -> R) -> Result<R> {
        write_hex(ValueKind::U256, &self.options, &value.0, true, false, emit)
    }
}

/// Codec for [`I256`].
///
/// # Examples
///
/// ```rust
/// use serde_bintext::{I256, I256Codec, JsonToken, TokenCodec};
///
/// let codec = I256Codec::default();
/// let value = codec.read(&JsonToken::string(b"-1")).unwrap();
/// assert_eq!(value, I256::from(-1i64));
/// assert_eq!(
///     codec.write_string(&value).unwrap(),
///     format!("-0x{}01", "0".repeat(62))
/// );
/// ```
#[derive(Clone, Debug)]
pub struct I256Codec {
    options: CodecOptions,
}

impl I256Codec {
    pub fn new(options: CodecOptions) -> Self {
        I256Codec { options }
    }
}

impl Default for I256Codec {
    fn default() -> Self {
        I256Codec::new(CodecOptions::strict())
    }
}

impl TokenCodec for I256Codec {
    type Value = I256;

    fn value_kind(&self) -> ValueKind {
        ValueKind::I256
    }

    fn read(&self, token: &JsonToken<'_>) -> Result<I256> {
        if let JsonToken::Number(number) = token {
            return numeric::to_integer(number, self.options.numeric_token_limit)
                .map(|integer| match integer {
                    Integer::Unsigned(value) => I256::from(value),
                    Integer::Signed(value) => I256::from(value),
                })
                .map_err(|err| Error::new(ValueKind::I256, err));
        }
        read_string(token, ValueKind::I256, &self.options, I256::default, |text| {
            let text = hex::split(text, true)?;
            let magnitude = parse_magnitude(text)?;
            I256::from_sign_magnitude(text.negative, magnitude).ok_or(ErrorKind::NumericOverflow)
        })
    }

    fn write<R>(&self, value: &I256, emit: impl FnOnce(&str) -> R) -> Result<R> {
        write_hex(
            ValueKind::I256,
            &self.options,
            &value.magnitude(),
            true,
            value.is_negative(),
            emit,
        )
    }
}

impl_codec_value!(U256 => U256Codec);
impl_codec_value!(I256 => I256Codec);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExpectedLength;

    fn read_u256(text: &str) -> Result<U256> {
        U256Codec::default().read(&JsonToken::string(text.as_bytes()))
    }

    fn read_i256(text: &str) -> Result<I256> {
        I256Codec::default().read(&JsonToken::string(text.as_bytes()))
    }

    #[test]
    fn test_u256_max_round_trip() {
        let max_hex = format!("0x{}", "f".repeat(64));
        let max_dec =
            "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        assert_eq!(read_u256(&max_hex).unwrap(), U256::MAX);
        assert_eq!(read_u256(max_dec).unwrap(), U256::MAX);
        assert_eq!(U256Codec::default().write_string(&U256::MAX).unwrap(), max_hex);
    }

    #[test]
    fn test_u256_overflow() {
        let too_big =
            "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        assert_eq!(read_u256(too_big).unwrap_err().kind(), &ErrorKind::NumericOverflow);
    }

    #[test]
    fn test_u256_hex_requires_exact_width() {
        assert_eq!(
            read_u256("0xff").unwrap_err().kind(),
            &ErrorKind::InvalidLength {
                expected: ExpectedLength::Exactly(64),
                found: 2
            }
        );
    }

    #[test]
    fn test_u256_rejects_negative() {
        assert!(read_u256("-1").is_err());
        let err = U256Codec::default()
            .read(&JsonToken::number(b"-1"))
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::NumericOverflow);
    }

    #[test]
    fn test_i256_bounds() {
        let min_dec =
            "-57896044618658097711785492504343953926634992332820282019728792003956564819968";
        let max_dec =
            "57896044618658097711785492504343953926634992332820282019728792003956564819967";
        assert_eq!(read_i256(min_dec).unwrap(), I256::MIN);
        assert_eq!(read_i256(max_dec).unwrap(), I256::MAX);

        let below_min =
            "-57896044618658097711785492504343953926634992332820282019728792003956564819969";
        let above_max =
            "57896044618658097711785492504343953926634992332820282019728792003956564819968";
        assert_eq!(read_i256(below_min).unwrap_err().kind(), &ErrorKind::NumericOverflow);
        assert_eq!(read_i256(above_max).unwrap_err().kind(), &ErrorKind::NumericOverflow);
    }

    #[test]
    fn test_i256_min_writes_magnitude() {
        let text = I256Codec::default().write_string(&I256::MIN).unwrap();
        assert_eq!(text, format!("-0x80{}", "0".repeat(62)));
        assert_eq!(read_i256(&text).unwrap(), I256::MIN);
    }

    #[test]
    fn test_i256_negative_zero() {
        let text = format!("-0x{}", "0".repeat(64));
        assert_eq!(read_i256(&text).unwrap(), I256::ZERO);
        assert_eq!(read_i256("-0").unwrap(), I256::ZERO);
    }

    #[test]
    fn test_i256_numeric_tokens() {
        let codec = I256Codec::default();
        assert_eq!(
            codec.read(&JsonToken::number(b"-42")).unwrap(),
            I256::from(-42i64)
        );
        assert_eq!(
            codec.read(&JsonToken::number(b"1.5")).unwrap_err().kind(),
            &ErrorKind::UnsupportedNumericToken
        );
    }

    #[test]
    fn test_null_policy() {
        assert_eq!(
            U256Codec::default().read(&JsonToken::Null).unwrap_err().kind(),
            &ErrorKind::NullNotAllowed
        );
        let lenient = I256Codec::new(CodecOptions::new());
        assert_eq!(lenient.read(&JsonToken::Null).unwrap(), I256::ZERO);
    }

    #[test]
    fn test_ordering() {
        assert!(I256::MIN < I256::from(-1i64));
        assert!(I256::from(-1i64) < I256::ZERO);
        assert!(I256::ZERO < I256::MAX);
    }

    #[test]
    fn test_bigint_conversions() {
        let value = I256::from(-12345i64);
        let big = BigInt::from(value);
        assert_eq!(big, BigInt::from(-12345));
        assert_eq!(I256::try_from(&big).unwrap(), value);

        let too_big = BigInt::from(1) << 255;
        assert!(I256::try_from(&too_big).is_err());
        assert_eq!(I256::try_from(&-too_big).unwrap(), I256::MIN);
    }
}
