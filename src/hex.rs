//! Hex text parsing and formatting.
//!
//! Accepted input: an optional `-` (signed kinds only), an optional `0x`/`0X`
//! prefix, then hex digits in either case. Fixed-width kinds require the exact
//! digit count; variable-length kinds require an even count.
//!
//! Output is always lowercase, written into a caller-provided slice that is
//! sized by [`encoded_len`].

use crate::buffer::{self, BufferPool};
use crate::error::{ErrorKind, ExpectedLength};

/// The canonical hex prefix.
pub const PREFIX: &[u8; 2] = b"0x";

/// Value of a single hex digit.
#[inline]
pub(crate) const fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

/// Returns `true` if `text` starts with `0x` or `0X`.
#[inline]
pub fn has_prefix(text: &[u8]) -> bool {
    text.len() >= 2 && text[0] == b'0' && (text[1] | 0x20) == b'x'
}

/// Returns `true` if `text` is non-empty and made only of hex digits.
pub fn is_hex_digits(text: &[u8]) -> bool {
    !text.is_empty() && text.iter().all(u8::is_ascii_hexdigit)
}

/// Hex text split into its parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HexText<'a> {
    pub negative: bool,
    pub prefixed: bool,
    pub digits: &'a [u8],
    /// Position of the first digit in the input text.
    pub offset: usize,
}

/// Splits off the optional sign and prefix.
///
/// A leading `-` is rejected with [`ErrorKind::InvalidCharacter`] unless
/// `allow_sign` is set.
pub fn split(text: &[u8], allow_sign: bool) -> Result<HexText<'_>, ErrorKind> {
    let mut offset = 0;
    let negative = text.first() == Some(&b'-');
    if negative {
        if !allow_sign {
            return Err(ErrorKind::InvalidCharacter {
                character: '-',
                index: 0,
            });
        }
        offset = 1;
    }
    let prefixed = has_prefix(&text[offset..]);
    if prefixed {
        offset += 2;
    }
    Ok(HexText {
        negative,
        prefixed,
        digits: &text[offset..],
        offset,
    })
}

/// Decodes `digits` into `out`, which must be exactly half their length.
fn decode_digits(digits: &[u8], offset: usize, out: &mut [u8]) -> Result<(), ErrorKind> {
    let expected = out.len() * 2;
    ::hex::decode_to_slice(digits, out).map_err(|err| match err {
        ::hex::FromHexError::InvalidHexCharacter { c, index } => ErrorKind::InvalidCharacter {
            character: c,
            index: offset + index,
        },
        ::hex::FromHexError::OddLength => ErrorKind::InvalidLength {
            expected: ExpectedLength::Even,
            found: digits.len(),
        },
        ::hex::FromHexError::InvalidStringLength => ErrorKind::InvalidLength {
            expected: ExpectedLength::Exactly(expected),
            found: digits.len(),
        },
    })
}

/// Decodes digits that must fill `out` exactly.
pub fn decode_exact(text: HexText<'_>, out: &mut [u8]) -> Result<(), ErrorKind> {
    let expected = out.len() * 2;
    if text.digits.len() != expected {
        return Err(ErrorKind::InvalidLength {
            expected: ExpectedLength::Exactly(expected),
            found: text.digits.len(),
        });
    }
    decode_digits(text.digits, text.offset, out)
}

/// Parses unsigned fixed-width hex text into `out`.
///
/// # Examples
///
/// ```rust
/// let mut selector = [0u8; 4];
/// serde_bintext::hex::decode_fixed(b"0XA9059CBB", &mut selector).unwrap();
/// assert_eq!(selector, [0xa9, 0x05, 0x9c, 0xbb]);
/// ```
pub fn decode_fixed(text: &[u8], out: &mut [u8]) -> Result<(), ErrorKind> {
    decode_exact(split(text, false)?, out)
}

/// Parses unsigned variable-length hex text (any even digit count).
pub fn decode_variable(text: &[u8]) -> Result<Vec<u8>, ErrorKind> {
    let text = split(text, false)?;
    if text.digits.len() % 2 != 0 {
        return Err(ErrorKind::InvalidLength {
            expected: ExpectedLength::Even,
            found: text.digits.len(),
        });
    }
    let mut out = vec![0u8; text.digits.len() / 2];
    decode_digits(text.digits, text.offset, &mut out)?;
    Ok(out)
}

/// Number of bytes needed to format `byte_len` bytes.
#[inline]
pub const fn encoded_len(byte_len: usize, prefix: bool, negative: bool) -> usize {
    (negative as usize) + (prefix as usize) * PREFIX.len() + byte_len * 2
}

/// Writes the canonical text of `bytes` into `out`.
///
/// `out` must be exactly [`encoded_len`] bytes long.
pub fn encode_into(
    bytes: &[u8],
    prefix: bool,
    negative: bool,
    out: &mut [u8],
) -> Result<usize, ErrorKind> {
    let expected = encoded_len(bytes.len(), prefix, negative);
    if out.len() != expected {
        return Err(ErrorKind::FormatFault {
            expected,
            written: out.len(),
        });
    }

    let mut at = 0;
    if negative {
        out[0] = b'-';
        at = 1;
    }
    if prefix {
        out[at..at + PREFIX.len()].copy_from_slice(PREFIX);
        at += PREFIX.len();
    }
    ::hex::encode_to_slice(bytes, &mut out[at..]).map_err(|_| ErrorKind::FormatFault {
        expected,
        written: at,
    })?;
    Ok(expected)
}

/// Formats `bytes` as hex and hands the text to `emit`.
///
/// The text lives in a [`buffer::ScopedBuffer`] for the duration of the call.
pub fn format_with<R>(
    bytes: &[u8],
    prefix: bool,
    negative: bool,
    threshold: usize,
    pool: &BufferPool,
    emit: impl FnOnce(&str) -> R,
) -> Result<R, ErrorKind> {
    let len = encoded_len(bytes.len(), prefix, negative);
    buffer::format_into(
        len,
        threshold,
        pool,
        |out| encode_into(bytes, prefix, negative, out),
        emit,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_fixed_prefix_optional() {
        let mut with = [0u8; 4];
        let mut without = [0u8; 4];
        decode_fixed(b"0x1a2b3c4d", &mut with).unwrap();
        decode_fixed(b"1a2b3c4d", &mut without).unwrap();
        assert_eq!(with, [0x1a, 0x2b, 0x3c, 0x4d]);
        assert_eq!(with, without);
    }

    #[test]
    fn test_decode_fixed_mixed_case() {
        let mut upper = [0u8; 4];
        let mut lower = [0u8; 4];
        decode_fixed(b"0XAbCdEf01", &mut upper).unwrap();
        decode_fixed(b"0xabcdef01", &mut lower).unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_decode_fixed_wrong_length() {
        let mut out = [0u8; 4];
        assert_eq!(
            decode_fixed(b"0x1a2b3c4", &mut out),
            Err(ErrorKind::InvalidLength {
                expected: ExpectedLength::Exactly(8),
                found: 7
            })
        );
        assert_eq!(
            decode_fixed(b"0x1a2b3c4d5", &mut out),
            Err(ErrorKind::InvalidLength {
                expected: ExpectedLength::Exactly(8),
                found: 9
            })
        );
    }

    #[test]
    fn test_decode_fixed_bad_character_position() {
        let mut out = [0u8; 4];
        assert_eq!(
            decode_fixed(b"0x1a2g3c4d", &mut out),
            Err(ErrorKind::InvalidCharacter {
                character: 'g',
                index: 5
            })
        );
    }

    #[test]
    fn test_unsigned_rejects_sign() {
        let mut out = [0u8; 1];
        assert_eq!(
            decode_fixed(b"-0x01", &mut out),
            Err(ErrorKind::InvalidCharacter {
                character: '-',
                index: 0
            })
        );
    }

    #[test]
    fn test_split_signed() {
        let text = split(b"-0Xff", true).unwrap();
        assert!(text.negative);
        assert!(text.prefixed);
        assert_eq!(text.digits, b"ff");
        assert_eq!(text.offset, 3);
    }

    #[test]
    fn test_decode_variable() {
        assert_eq!(decode_variable(b"0x").unwrap(), Vec::<u8>::new());
        assert_eq!(decode_variable(b"").unwrap(), Vec::<u8>::new());
        assert_eq!(decode_variable(b"0xDEADbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(
            decode_variable(b"0xabc"),
            Err(ErrorKind::InvalidLength {
                expected: ExpectedLength::Even,
                found: 3
            })
        );
    }

    #[test]
    fn test_encode_into() {
        let mut out = [0u8; 7];
        let written = encode_into(&[0xab, 0x01], true, true, &mut out).unwrap();
        assert_eq!(written, 7);
        assert_eq!(&out, b"-0xab01");

        let mut out = [0u8; 4];
        encode_into(&[0xAB, 0xCD], false, false, &mut out).unwrap();
        assert_eq!(&out, b"abcd");
    }

    #[test]
    fn test_encode_into_wrong_size_is_a_fault() {
        let mut out = [0u8; 5];
        assert!(matches!(
            encode_into(&[0xab, 0x01], true, false, &mut out),
            Err(ErrorKind::FormatFault { .. })
        ));
    }

    #[test]
    fn test_encoded_len() {
        assert_eq!(encoded_len(32, true, false), 66);
        assert_eq!(encoded_len(0, true, false), 2);
        assert_eq!(encoded_len(32, true, true), 67);
        assert_eq!(encoded_len(4, false, false), 8);
    }
}
