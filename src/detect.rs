//! Encoding detection for kinds that accept several text encodings.
//!
//! Candidates are tried in a fixed order and the first match wins:
//!
//! 1. **Hex**, when the text carries a `0x`/`0X` prefix or is made only of hex
//!    digits with exactly an expected digit count. A failed hex attempt is
//!    kept and reported only if no later candidate matches, since Base64 text
//!    may itself begin with `0x`.
//! 2. **Base58**, when the text decodes under the configured alphabet to an
//!    accepted width.
//! 3. **Base64** (standard, then URL-safe, padding required), when the text
//!    decodes to an accepted width.
//!
//! A Base58 or Base64 attempt that decodes to the wrong width is discarded and
//! detection moves on; nothing partial is ever accepted.

use crate::error::{ErrorKind, ExpectedLength};
use crate::hex;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;
use std::fmt;
use tracing::trace;

/// Capacity of the decode area; larger than any detected kind's width.
const DECODE_CAPACITY: usize = 128;

/// A text encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    Hex,
    Base58,
    Base64,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Encoding::Hex => "hex",
            Encoding::Base58 => "base58",
            Encoding::Base64 => "base64",
        })
    }
}

/// Decoded widths an encoding may produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Width {
    Exact(usize),
    /// Anything from one byte up to the bound.
    UpTo(usize),
}

impl Width {
    const fn accepts(&self, len: usize) -> bool {
        match *self {
            Width::Exact(n) => len == n,
            Width::UpTo(n) => len >= 1 && len <= n,
        }
    }
}

/// The encodings a value kind accepts.
#[derive(Clone, Copy, Debug)]
pub struct Detector {
    /// Accepted hex digit counts (two per byte).
    pub hex_digits: &'static [usize],
    pub base58: Option<Width>,
    pub base64: Option<Width>,
}

/// 32-byte hashes: hex, Base58 or Base64.
pub const HASH: Detector = Detector {
    hex_digits: &[64],
    base58: Some(Width::Exact(32)),
    base64: Some(Width::Exact(32)),
};

/// Addresses: 20-byte hex or Base58 of up to 32 bytes.
pub const ADDRESS: Detector = Detector {
    hex_digits: &[40],
    base58: Some(Width::UpTo(32)),
    base64: None,
};

/// Signatures: 64- or 65-byte hex, or 64-byte Base58.
pub const SIGNATURE: Detector = Detector {
    hex_digits: &[128, 130],
    base58: Some(Width::Exact(64)),
    base64: None,
};

/// Bytes decoded by [`detect`], together with the encoding that matched.
#[derive(Clone, Copy)]
pub struct Decoded {
    pub encoding: Encoding,
    len: usize,
    bytes: [u8; DECODE_CAPACITY],
}

impl Decoded {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl fmt::Debug for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoded")
            .field("encoding", &self.encoding)
            .field("bytes", &self.as_bytes())
            .finish()
    }
}

/// Detects the encoding of `text` and decodes it.
///
/// # Errors
///
/// - hex errors ([`ErrorKind::InvalidLength`], [`ErrorKind::InvalidCharacter`])
///   when the text looked like hex and no other candidate matched
/// - [`ErrorKind::UnrecognizedEncoding`] when no candidate matched
///
/// # Examples
///
/// ```rust
/// use serde_bintext::detect::{detect, Encoding, ADDRESS};
///
/// let decoded = detect(b"0x00000000000000000000000000000000000000ff", &ADDRESS, bs58::Alphabet::DEFAULT).unwrap();
/// assert_eq!(decoded.encoding, Encoding::Hex);
/// assert_eq!(decoded.as_bytes().len(), 20);
/// ```
pub fn detect(
    text: &[u8],
    detector: &Detector,
    alphabet: &bs58::Alphabet,
) -> Result<Decoded, ErrorKind> {
    let mut decoded = Decoded {
        encoding: Encoding::Hex,
        len: 0,
        bytes: [0; DECODE_CAPACITY],
    };

    let mut hex_error = None;
    if looks_like_hex(text, detector) {
        match decode_hex(text, detector, &mut decoded.bytes) {
            Ok(len) => {
                trace!(len, "detected hex text");
                decoded.len = len;
                return Ok(decoded);
            }
            Err(err) => {
                trace!(%err, "hex-looking text failed to decode");
                hex_error = Some(err);
            }
        }
    }

    if let Some(width) = detector.base58 {
        match bs58::decode(text)
            .with_alphabet(alphabet)
            .onto(&mut decoded.bytes[..])
        {
            Ok(len) if width.accepts(len) => {
                trace!(len, "detected base58 text");
                decoded.encoding = Encoding::Base58;
                decoded.len = len;
                return Ok(decoded);
            }
            Ok(len) => trace!(len, "base58 decoded to the wrong width"),
            Err(err) => trace!(%err, "text is not base58"),
        }
    }

    if let Some(width) = detector.base64 {
        for engine in [&STANDARD, &URL_SAFE] {
            match engine.decode_slice(text, &mut decoded.bytes[..]) {
                Ok(len) if width.accepts(len) => {
                    trace!(len, "detected base64 text");
                    decoded.encoding = Encoding::Base64;
                    decoded.len = len;
                    return Ok(decoded);
                }
                Ok(len) => trace!(len, "base64 decoded to the wrong width"),
                Err(err) => trace!(%err, "text is not base64"),
            }
        }
    }

    Err(hex_error.unwrap_or(ErrorKind::UnrecognizedEncoding))
}

fn looks_like_hex(text: &[u8], detector: &Detector) -> bool {
    hex::has_prefix(text)
        || (hex::is_hex_digits(text) && detector.hex_digits.contains(&text.len()))
}

fn decode_hex(
    text: &[u8],
    detector: &Detector,
    out: &mut [u8; DECODE_CAPACITY],
) -> Result<usize, ErrorKind> {
    let text = hex::split(text, false)?;
    let digits = text.digits.len();
    if !detector.hex_digits.contains(&digits) {
        let expected = match detector.hex_digits {
            [only] => ExpectedLength::Exactly(*only),
            counts => ExpectedLength::OneOf(counts),
        };
        return Err(ErrorKind::InvalidLength {
            expected,
            found: digits,
        });
    }
    let len = digits / 2;
    hex::decode_exact(text, &mut out[..len])?;
    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incrementing() -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        bytes
    }

    fn detect_hash(text: &str) -> Result<Decoded, ErrorKind> {
        detect(text.as_bytes(), &HASH, bs58::Alphabet::DEFAULT)
    }

    #[test]
    fn test_all_encodings_decode_to_same_bytes() {
        let bytes = incrementing();
        let hex_text = format!("0x{}", ::hex::encode(bytes));
        let base58_text = bs58::encode(bytes).into_string();
        let base64_text = STANDARD.encode(bytes);

        let from_hex = detect_hash(&hex_text).unwrap();
        let from_base58 = detect_hash(&base58_text).unwrap();
        let from_base64 = detect_hash(&base64_text).unwrap();

        assert_eq!(from_hex.encoding, Encoding::Hex);
        assert_eq!(from_base58.encoding, Encoding::Base58);
        assert_eq!(from_base64.encoding, Encoding::Base64);
        assert_eq!(from_hex.as_bytes(), &bytes);
        assert_eq!(from_base58.as_bytes(), &bytes);
        assert_eq!(from_base64.as_bytes(), &bytes);
    }

    #[test]
    fn test_unprefixed_hex_wins_over_base58() {
        // Also valid Base58, but exact-length hex is tried first.
        let text = "1".repeat(64);
        let decoded = detect_hash(&text).unwrap();
        assert_eq!(decoded.encoding, Encoding::Hex);
        assert_eq!(decoded.as_bytes(), &[0x11; 32]);
    }

    #[test]
    fn test_url_safe_base64() {
        let bytes = [0xfb; 32];
        let text = URL_SAFE.encode(bytes);
        assert!(text.contains('-') || text.contains('_'));
        let decoded = detect_hash(&text).unwrap();
        assert_eq!(decoded.encoding, Encoding::Base64);
        assert_eq!(decoded.as_bytes(), &bytes);
    }

    #[test]
    fn test_wrong_width_is_not_accepted() {
        let short = [0x42u8; 31];
        assert_eq!(
            detect_hash(&bs58::encode(short).into_string()).unwrap_err(),
            ErrorKind::UnrecognizedEncoding
        );
        assert_eq!(
            detect_hash(&STANDARD.encode(short)).unwrap_err(),
            ErrorKind::UnrecognizedEncoding
        );
    }

    #[test]
    fn test_base64_starting_with_prefix() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xd3;
        bytes[1] = 0x10;
        let text = STANDARD.encode(bytes);
        assert!(text.starts_with("0x"));
        let decoded = detect_hash(&text).unwrap();
        assert_eq!(decoded.encoding, Encoding::Base64);
        assert_eq!(decoded.as_bytes(), &bytes);
    }

    #[test]
    fn test_prefixed_hex_errors_are_reported() {
        let short = format!("0x{}", "a".repeat(63));
        assert_eq!(
            detect_hash(&short).unwrap_err(),
            ErrorKind::InvalidLength {
                expected: ExpectedLength::Exactly(64),
                found: 63
            }
        );
        let bad = format!("0x{}z", "a".repeat(63));
        assert!(matches!(
            detect_hash(&bad).unwrap_err(),
            ErrorKind::InvalidCharacter { character: 'z', .. }
        ));
    }

    #[test]
    fn test_garbage_is_unrecognized() {
        assert_eq!(detect_hash("").unwrap_err(), ErrorKind::UnrecognizedEncoding);
        assert_eq!(
            detect_hash("not a hash!").unwrap_err(),
            ErrorKind::UnrecognizedEncoding
        );
    }

    #[test]
    fn test_signature_hex_lengths() {
        let sig64 = format!("0x{}", "ab".repeat(64));
        let sig65 = format!("0x{}", "ab".repeat(65));
        let sig66 = format!("0x{}", "ab".repeat(66));
        let alphabet = bs58::Alphabet::DEFAULT;
        assert_eq!(detect(sig64.as_bytes(), &SIGNATURE, alphabet).unwrap().as_bytes().len(), 64);
        assert_eq!(detect(sig65.as_bytes(), &SIGNATURE, alphabet).unwrap().as_bytes().len(), 65);
        assert_eq!(
            detect(sig66.as_bytes(), &SIGNATURE, alphabet).unwrap_err(),
            ErrorKind::InvalidLength {
                expected: ExpectedLength::OneOf(&[128, 130]),
                found: 132
            }
        );
    }

    #[test]
    fn test_address_base58_up_to_32_bytes() {
        let alphabet = bs58::Alphabet::DEFAULT;
        let text = bs58::encode([7u8; 25]).into_string();
        let decoded = detect(text.as_bytes(), &ADDRESS, alphabet).unwrap();
        assert_eq!(decoded.encoding, Encoding::Base58);
        assert_eq!(decoded.as_bytes(), &[7u8; 25]);

        let too_long = bs58::encode([7u8; 33]).into_string();
        assert_eq!(
            detect(too_long.as_bytes(), &ADDRESS, alphabet).unwrap_err(),
            ErrorKind::UnrecognizedEncoding
        );
    }
}
