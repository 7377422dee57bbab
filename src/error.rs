//! Error types for reading and writing binary values at the JSON boundary.
//!
//! Every failure carries two pieces of information:
//!
//! - an [`ErrorKind`], the precise reason the text was rejected
//! - a [`ValueKind`], the value kind that was being read or written
//!
//! so a caller (usually a JSON framework reporting a field error) can produce a
//! diagnostic like `invalid hash: expected 64 hex digits, found 63`.
//!
//! ## Error Categories
//!
//! - **Token errors**: the token was not a string/number/null ([`ErrorKind::WrongTokenType`]),
//!   or was null for a non-nullable kind ([`ErrorKind::NullNotAllowed`])
//! - **Text errors**: wrong digit count, bad characters, malformed escapes,
//!   or no encoding matched
//! - **Numeric errors**: out-of-range values or numeric tokens the codec
//!   refuses to parse
//! - **Internal faults**: [`ErrorKind::FormatFault`] signals a buffer-sizing
//!   bug on the write path and never results from user input
//!
//! ## Examples
//!
//! ```rust
//! use serde_bintext::{read_token, ErrorKind, Hash, JsonToken};
//!
//! let err = read_token::<Hash>(&JsonToken::string(b"0x1234")).unwrap_err();
//! assert!(matches!(err.kind(), ErrorKind::InvalidLength { .. }));
//! assert!(err.to_string().starts_with("invalid hash"));
//! ```

use crate::token::TokenKind;
use std::fmt;
use thiserror::Error;

/// The value kind a codec reads and writes, used to label errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Hash,
    Selector,
    Discriminator,
    /// A fixed-width byte value of any other width.
    FixedBytes(usize),
    Bytes,
    Address,
    Signature,
    I256,
    U256,
    BigInt,
    /// No value kind is known, as for messages raised by a serde data format.
    Unknown,
}

impl ValueKind {
    /// Returns the kind used for a fixed-width hex value of `width` bytes.
    #[must_use]
    pub const fn fixed(width: usize) -> Self {
        match width {
            4 => ValueKind::Selector,
            8 => ValueKind::Discriminator,
            _ => ValueKind::FixedBytes(width),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Hash => f.write_str("hash"),
            ValueKind::Selector => f.write_str("selector"),
            ValueKind::Discriminator => f.write_str("discriminator"),
            ValueKind::FixedBytes(width) => write!(f, "{width}-byte value"),
            ValueKind::Bytes => f.write_str("byte string"),
            ValueKind::Address => f.write_str("address"),
            ValueKind::Signature => f.write_str("signature"),
            ValueKind::I256 => f.write_str("signed 256-bit integer"),
            ValueKind::U256 => f.write_str("unsigned 256-bit integer"),
            ValueKind::BigInt => f.write_str("big integer"),
            ValueKind::Unknown => f.write_str("value"),
        }
    }
}

/// The length a piece of text was expected to have.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpectedLength {
    /// Exactly this many digits.
    Exactly(usize),
    /// One of a fixed set of digit counts.
    OneOf(&'static [usize]),
    /// Any even number of digits.
    Even,
    /// At least this many digits.
    AtLeast(usize),
}

impl fmt::Display for ExpectedLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedLength::Exactly(n) => write!(f, "{n}"),
            ExpectedLength::OneOf(counts) => {
                for (i, n) in counts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" or ")?;
                    }
                    write!(f, "{n}")?;
                }
                Ok(())
            }
            ExpectedLength::Even => f.write_str("an even number of"),
            ExpectedLength::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Why a read or write failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    /// The token is neither a string nor, where applicable, a number or null.
    #[error("expected a string token, found {found}")]
    WrongTokenType { found: TokenKind },

    /// Null was given to a non-nullable kind.
    #[error("null is not allowed")]
    NullNotAllowed,

    /// Wrong digit count for the kind.
    #[error("expected {expected} hex digits, found {found}")]
    InvalidLength { expected: ExpectedLength, found: usize },

    /// A character outside the accepted alphabet.
    #[error("invalid character {character:?} at position {index}")]
    InvalidCharacter { character: char, index: usize },

    /// A malformed JSON escape sequence inside a string token.
    #[error("invalid escape sequence at byte {index}")]
    InvalidEscape { index: usize },

    /// No candidate encoding (hex, Base58, Base64) matched the text.
    #[error("text is not hex, Base58 or Base64 of the expected length")]
    UnrecognizedEncoding,

    /// The value does not fit in the kind's range.
    #[error("value out of range")]
    NumericOverflow,

    /// The raw numeric token is longer than the configured bound.
    #[error("numeric token of {len} characters exceeds the limit of {limit}")]
    NumericTokenTooLarge { len: usize, limit: usize },

    /// The numeric token would need decimal big-integer parsing; pass it as a string instead.
    #[error("numeric token is not a 64-bit integer; pass it as a string")]
    UnsupportedNumericToken,

    /// The formatter wrote a different number of bytes than it sized for.
    ///
    /// Never caused by input; indicates a bug in buffer sizing.
    #[error("internal formatting fault: sized {expected} bytes, wrote {written}")]
    FormatFault { expected: usize, written: usize },

    /// Message raised by a serde data format.
    #[error("{0}")]
    Custom(String),
}

/// An error from reading or writing a value, labelled with the value kind.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid {value}: {kind}")]
pub struct Error {
    value: ValueKind,
    kind: ErrorKind,
}

impl Error {
    /// Creates an error for the given value kind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_bintext::{Error, ErrorKind, ValueKind};
    ///
    /// let err = Error::new(ValueKind::Address, ErrorKind::UnrecognizedEncoding);
    /// assert!(err.to_string().contains("address"));
    /// ```
    pub fn new(value: ValueKind, kind: ErrorKind) -> Self {
        Error { value, kind }
    }

    /// Returns the reason for the failure.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the value kind that was being read or written.
    pub fn value_kind(&self) -> ValueKind {
        self.value
    }

    /// Returns `true` if the error comes from the write path's internal invariant check.
    pub fn is_internal(&self) -> bool {
        matches!(self.kind, ErrorKind::FormatFault { .. })
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::new(ValueKind::Unknown, ErrorKind::Custom(msg.to_string()))
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::new(ValueKind::Unknown, ErrorKind::Custom(msg.to_string()))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
