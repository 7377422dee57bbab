//! Source normalization: string token to contiguous decoded bytes.
//!
//! Every read path runs [`normalize`] first. The common case (one contiguous
//! segment, no escapes) returns the token's own bytes without copying. Escaped
//! or segmented tokens are copied into a [`Scratch`] buffer and decoded there.
//!
//! Escape decoding never expands the text (`\u0030` is six raw bytes for one
//! decoded byte, a surrogate pair is twelve raw bytes for four), so the scratch
//! is sized to the raw length and decoding runs in place.

use crate::error::ErrorKind;
use crate::hex::hex_value;
use crate::token::{JsonToken, RawString, Segments};
use tracing::trace;

/// Size of the inline scratch area used before falling back to the heap.
pub const INLINE_SCRATCH: usize = 128;

/// Private copy space for tokens that cannot be viewed in place.
///
/// Tokens whose raw length fits in [`INLINE_SCRATCH`] bytes are copied into a
/// fixed inline array; longer ones use a heap buffer owned by the scratch.
pub struct Scratch {
    inline: [u8; INLINE_SCRATCH],
    heap: Vec<u8>,
    spilled: bool,
}

impl Scratch {
    pub fn new() -> Self {
        Scratch {
            inline: [0; INLINE_SCRATCH],
            heap: Vec::new(),
            spilled: false,
        }
    }

    /// Returns `true` once a token too long for the inline area was copied.
    pub fn spilled(&self) -> bool {
        self.spilled
    }

    fn prepare(&mut self, len: usize) -> &mut [u8] {
        if len <= INLINE_SCRATCH {
            &mut self.inline[..len]
        } else {
            self.spilled = true;
            self.heap.clear();
            self.heap.resize(len, 0);
            &mut self.heap[..]
        }
    }
}

impl Default for Scratch {
    fn default() -> Self {
        Self::new()
    }
}

/// Produces the decoded bytes of a string token.
///
/// Returns `Ok(None)` for a null token so callers can short-circuit to their
/// zero value.
///
/// # Errors
///
/// - [`ErrorKind::WrongTokenType`] if the token is neither a string nor null
/// - [`ErrorKind::InvalidEscape`] if an escape sequence is malformed
///
/// # Examples
///
/// ```rust
/// use serde_bintext::source::{normalize, Scratch};
/// use serde_bintext::JsonToken;
///
/// let mut scratch = Scratch::new();
/// let token = JsonToken::escaped_string(br"0x\u0041b");
/// let view = normalize(&token, &mut scratch).unwrap();
/// assert_eq!(view, Some(b"0xAb".as_slice()));
/// ```
pub fn normalize<'a>(
    token: &JsonToken<'a>,
    scratch: &'a mut Scratch,
) -> Result<Option<&'a [u8]>, ErrorKind> {
    match token {
        JsonToken::Null => Ok(None),
        JsonToken::String(raw) => normalize_string(*raw, scratch).map(Some),
        other => Err(ErrorKind::WrongTokenType {
            found: other.kind(),
        }),
    }
}

fn normalize_string<'a>(raw: RawString<'a>, scratch: &'a mut Scratch) -> Result<&'a [u8], ErrorKind> {
    if let (Segments::Contiguous(bytes), false) = (raw.segments(), raw.has_escapes()) {
        return Ok(bytes);
    }

    trace!(
        raw_len = raw.raw_len(),
        escaped = raw.has_escapes(),
        "copying string token into scratch"
    );

    let buf = scratch.prepare(raw.raw_len());
    match raw.segments() {
        Segments::Contiguous(bytes) => buf.copy_from_slice(bytes),
        Segments::Split(parts) => {
            let mut at = 0;
            for part in parts {
                buf[at..at + part.len()].copy_from_slice(part);
                at += part.len();
            }
        }
    }

    let len = if raw.has_escapes() {
        unescape_in_place(buf)?
    } else {
        buf.len()
    };
    let buf: &'a [u8] = buf;
    Ok(&buf[..len])
}

/// Decodes JSON escapes in place, returning the decoded length.
fn unescape_in_place(buf: &mut [u8]) -> Result<usize, ErrorKind> {
    let mut read = 0;
    let mut write = 0;

    while read < buf.len() {
        let byte = buf[read];
        if byte != b'\\' {
            buf[write] = byte;
            read += 1;
            write += 1;
            continue;
        }

        let escape_at = read;
        let letter = *buf
            .get(read + 1)
            .ok_or(ErrorKind::InvalidEscape { index: escape_at })?;
        read += 2;

        let decoded = match letter {
            b'"' => b'"',
            b'\\' => b'\\',
            b'/' => b'/',
            b'b' => 0x08,
            b'f' => 0x0c,
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'u' => {
                let ch = decode_unicode_escape(buf, &mut read, escape_at)?;
                let mut utf8 = [0u8; 4];
                let encoded = ch.encode_utf8(&mut utf8).as_bytes();
                buf[write..write + encoded.len()].copy_from_slice(encoded);
                write += encoded.len();
                continue;
            }
            _ => return Err(ErrorKind::InvalidEscape { index: escape_at }),
        };
        buf[write] = decoded;
        write += 1;
    }

    Ok(write)
}

/// Decodes the `XXXX` after `\u` (and a trailing low surrogate, if any).
fn decode_unicode_escape(buf: &[u8], read: &mut usize, escape_at: usize) -> Result<char, ErrorKind> {
    let invalid = ErrorKind::InvalidEscape { index: escape_at };

    let high = read_hex4(buf, *read).ok_or_else(|| invalid.clone())?;
    *read += 4;

    let code = match high {
        0xD800..=0xDBFF => {
            if buf.get(*read..*read + 2) != Some(b"\\u".as_slice()) {
                return Err(invalid);
            }
            let low = read_hex4(buf, *read + 2).ok_or_else(|| invalid.clone())?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(invalid);
            }
            *read += 6;
            0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00)
        }
        0xDC00..=0xDFFF => return Err(invalid),
        _ => u32::from(high),
    };

    char::from_u32(code).ok_or(invalid)
}

fn read_hex4(buf: &[u8], at: usize) -> Option<u16> {
    let digits = buf.get(at..at + 4)?;
    digits
        .iter()
        .try_fold(0u16, |acc, &d| Some(acc << 4 | u16::from(hex_value(d)?)))
}
