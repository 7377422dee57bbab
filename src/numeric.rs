//! Numeric tokens and decimal text for the integer kinds.
//!
//! A JSON number is only accepted when it is an exact integer that fits in
//! 64 bits. Anything larger has to travel as a string (hex or decimal text),
//! where the integer codecs parse it with [`parse_decimal`]. This keeps the
//! numeric path bounded: a token longer than the configured limit is refused
//! before any parsing happens.

use crate::error::{ErrorKind, ExpectedLength};
use crate::token::Number;
use num_bigint::BigUint;

/// A numeric token converted to the widest exact 64-bit representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Integer {
    Unsigned(u64),
    /// Always negative; non-negative values are reported as `Unsigned`.
    Signed(i64),
}

/// Converts a numeric token to a 64-bit integer.
///
/// # Errors
///
/// - [`ErrorKind::NumericTokenTooLarge`] if the raw text is longer than `limit`
/// - [`ErrorKind::UnsupportedNumericToken`] for fractions, exponents, floats
///   and integers outside the 64-bit range
/// - [`ErrorKind::InvalidCharacter`] if the raw text is not a number at all
///
/// # Examples
///
/// ```rust
/// use serde_bintext::numeric::{to_integer, Integer};
/// use serde_bintext::token::Number;
///
/// assert_eq!(to_integer(&Number::Raw(b"-42"), 32), Ok(Integer::Signed(-42)));
/// assert_eq!(to_integer(&Number::Signed(7), 32), Ok(Integer::Unsigned(7)));
/// ```
pub fn to_integer(number: &Number<'_>, limit: usize) -> Result<Integer, ErrorKind> {
    match *number {
        Number::Unsigned(value) => Ok(Integer::Unsigned(value)),
        Number::Signed(value) if value >= 0 => Ok(Integer::Unsigned(value as u64)),
        Number::Signed(value) => Ok(Integer::Signed(value)),
        Number::Float(_) => Err(ErrorKind::UnsupportedNumericToken),
        Number::Raw(raw) => parse_raw(raw, limit),
    }
}

fn parse_raw(raw: &[u8], limit: usize) -> Result<Integer, ErrorKind> {
    if raw.len() > limit {
        return Err(ErrorKind::NumericTokenTooLarge {
            len: raw.len(),
            limit,
        });
    }

    let negative = raw.first() == Some(&b'-');
    let digits = &raw[negative as usize..];
    if digits.is_empty() {
        return Err(ErrorKind::InvalidLength {
            expected: ExpectedLength::AtLeast(1),
            found: 0,
        });
    }

    let mut integral = true;
    for (i, &b) in digits.iter().enumerate() {
        match b {
            b'0'..=b'9' => {}
            b'.' | b'e' | b'E' | b'+' | b'-' if i > 0 => integral = false,
            _ => {
                return Err(ErrorKind::InvalidCharacter {
                    character: char::from(b),
                    index: i + negative as usize,
                })
            }
        }
    }
    if !integral {
        return Err(ErrorKind::UnsupportedNumericToken);
    }

    // Only ASCII digits (and a leading '-') remain.
    let text = std::str::from_utf8(raw).map_err(|_| ErrorKind::UnsupportedNumericToken)?;
    if negative {
        match text.parse::<i64>() {
            Ok(0) => Ok(Integer::Unsigned(0)),
            Ok(value) => Ok(Integer::Signed(value)),
            Err(_) => Err(ErrorKind::UnsupportedNumericToken),
        }
    } else {
        text.parse::<u64>()
            .map(Integer::Unsigned)
            .map_err(|_| ErrorKind::UnsupportedNumericToken)
    }
}

/// Parses unsigned decimal digits into an arbitrary-precision integer.
///
/// `offset` is the position of `digits` in the input text, used for
/// error positions.
pub fn parse_decimal(digits: &[u8], offset: usize) -> Result<BigUint, ErrorKind> {
    if digits.is_empty() {
        return Err(ErrorKind::InvalidLength {
            expected: ExpectedLength::AtLeast(1),
            found: 0,
        });
    }
    if let Some(index) = digits.iter().position(|b| !b.is_ascii_digit()) {
        return Err(ErrorKind::InvalidCharacter {
            character: char::from(digits[index]),
            index: offset + index,
        });
    }
    BigUint::parse_bytes(digits, 10).ok_or(ErrorKind::InvalidCharacter {
        character: char::from(digits[0]),
        index: offset,
    })
}

/// Parses unsigned hex digits (any count, odd allowed) into an arbitrary-precision integer.
pub fn parse_hex_digits(digits: &[u8], offset: usize) -> Result<BigUint, ErrorKind> {
    if digits.is_empty() {
        return Err(ErrorKind::InvalidLength {
            expected: ExpectedLength::AtLeast(1),
            found: 0,
        });
    }
    if let Some(index) = digits.iter().position(|b| !b.is_ascii_hexdigit()) {
        return Err(ErrorKind::InvalidCharacter {
            character: char::from(digits[index]),
            index: offset + index,
        });
    }
    BigUint::parse_bytes(digits, 16).ok_or(ErrorKind::InvalidCharacter {
        character: char::from(digits[0]),
        index: offset,
    })
}

/// Right-aligns `value` into a 32-byte big-endian word.
pub fn to_word(value: &BigUint) -> Result<[u8; 32], ErrorKind> {
    let bytes = value.to_bytes_be();
    if bytes.len() > 32 {
        return Err(ErrorKind::NumericOverflow);
    }
    let mut word = [0u8; 32];
    word[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_integers() {
        assert_eq!(parse_raw(b"0", 32), Ok(Integer::Unsigned(0)));
        assert_eq!(parse_raw(b"-0", 32), Ok(Integer::Unsigned(0)));
        assert_eq!(
            parse_raw(b"18446744073709551615", 32),
            Ok(Integer::Unsigned(u64::MAX))
        );
        assert_eq!(
            parse_raw(b"-9223372036854775808", 32),
            Ok(Integer::Signed(i64::MIN))
        );
    }

    #[test]
    fn test_out_of_range_is_unsupported() {
        assert_eq!(
            parse_raw(b"18446744073709551616", 32),
            Err(ErrorKind::UnsupportedNumericToken)
        );
        assert_eq!(
            parse_raw(b"-9223372036854775809", 32),
            Err(ErrorKind::UnsupportedNumericToken)
        );
    }

    #[test]
    fn test_fraction_and_exponent_are_unsupported() {
        for raw in [b"1.5".as_slice(), b"1e3", b"1E+3", b"-2.0"] {
            assert_eq!(parse_raw(raw, 32), Err(ErrorKind::UnsupportedNumericToken));
        }
        assert_eq!(
            to_integer(&Number::Float(1.0), 32),
            Err(ErrorKind::UnsupportedNumericToken)
        );
    }

    #[test]
    fn test_long_token_is_refused_before_parsing() {
        let raw = "9".repeat(33);
        assert_eq!(
            parse_raw(raw.as_bytes(), 32),
            Err(ErrorKind::NumericTokenTooLarge { len: 33, limit: 32 })
        );
    }

    #[test]
    fn test_garbage() {
        assert_eq!(
            parse_raw(b"12a", 32),
            Err(ErrorKind::InvalidCharacter {
                character: 'a',
                index: 2
            })
        );
        assert!(matches!(
            parse_raw(b"-", 32),
            Err(ErrorKind::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_parse_decimal() {
        let value = parse_decimal(b"340282366920938463463374607431768211456", 0).unwrap();
        assert_eq!(value, BigUint::from(1u8) << 128);
        assert_eq!(
            parse_decimal(b"12_3", 1),
            Err(ErrorKind::InvalidCharacter {
                character: '_',
                index: 3
            })
        );
    }

    #[test]
    fn test_to_word_overflow() {
        let max = (BigUint::from(1u8) << 256) - 1u8;
        assert_eq!(to_word(&max).unwrap(), [0xff; 32]);
        let too_big = BigUint::from(1u8) << 256;
        assert_eq!(to_word(&too_big), Err(ErrorKind::NumericOverflow));
    }

    #[test]
    fn test_parse_hex_digits_odd_count() {
        assert_eq!(parse_hex_digits(b"abc", 2).unwrap(), BigUint::from(0xabcu32));
    }
}
