//! Transaction signatures.
//!
//! Three shapes are recognised: 64- and 65-byte hex signatures (with or
//! without `0x`) and 64-byte Base58 signatures. A signature is written back in
//! the shape it was read in.

use crate::codec::{read_string, write_base58, write_hex, TokenCodec};
use crate::detect::{self, Encoding};
use crate::error::{ErrorKind, ExpectedLength, Result, ValueKind};
use crate::options::CodecOptions;
use crate::token::JsonToken;

/// A signature in one of the supported shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signature {
    /// Compact `r || s` signature.
    Hex64([u8; 64]),
    /// Recoverable `r || s || v` signature.
    Hex65([u8; 65]),
    /// Ed25519 signature written in Base58.
    Base58([u8; 64]),
}

impl Signature {
    pub const ZERO: Signature = Signature::Hex65([0; 65]);

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Signature::Hex64(bytes) | Signature::Base58(bytes) => bytes,
            Signature::Hex65(bytes) => bytes,
        }
    }

    pub fn encoding(&self) -> Encoding {
        match self {
            Signature::Hex64(_) | Signature::Hex65(_) => Encoding::Hex,
            Signature::Base58(_) => Encoding::Base58,
        }
    }
}

impl Default for Signature {
    fn default() -> Self {
        Signature::ZERO
    }
}

/// Codec for [`Signature`].
#[derive(Clone, Debug, Default)]
pub struct SignatureCodec {
    options: CodecOptions,
}

impl SignatureCodec {
    pub fn new(options: CodecOptions) -> Self {
        SignatureCodec { options }
    }
}

fn from_decoded(encoding: Encoding, bytes: &[u8]) -> std::result::Result<Signature, ErrorKind> {
    let wrong_len = || ErrorKind::InvalidLength {
        expected: ExpectedLength::OneOf(&[128, 130]),
        found: bytes.len() * 2,
    };
    match (encoding, bytes.len()) {
        (Encoding::Hex, 64) => bytes.try_into().map(Signature::Hex64).map_err(|_| wrong_len()),
        (Encoding::Hex, 65) => bytes.try_into().map(Signature::Hex65).map_err(|_| wrong_len()),
        (Encoding::Base58, 64) => bytes.try_into().map(Signature::Base58).map_err(|_| wrong_len()),
        (Encoding::Hex, _) => Err(wrong_len()),
        _ => Err(ErrorKind::UnrecognizedEncoding),
    }
}

impl TokenCodec for SignatureCodec {
    type Value = Signature;

    fn value_kind(&self) -> ValueKind {
        ValueKind::Signature
    }

    fn read(&self, token: &JsonToken<'_>) -> Result<Signature> {
        read_string(token, ValueKind::Signature, &self.options, Signature::default, |text| {
            let decoded = detect::detect(text, &detect::SIGNATURE, self.options.base58_alphabet)?;
            from_decoded(decoded.encoding, decoded.as_bytes())
        })
    }

    fn write<R>(&self, value: &Signature, emit: impl FnOnce(&str) -> R) -> Result<R> {
        match value {
            Signature::Hex64(bytes) => {
                write_hex(ValueKind::Signature, &self.options, bytes, true, false, emit)
            }
            Signature::Hex65(bytes) => {
                write_hex(ValueKind::Signature, &self.options, bytes, true, false, emit)
            }
            Signature::Base58(bytes) => {
                write_base58(ValueKind::Signature, &self.options, bytes, emit)
            }
        }
    }
}

impl_codec_value!(Signature => SignatureCodec);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_shapes_are_preserved() {
        let codec = SignatureCodec::default();
        for len in [64usize, 65] {
            let text = format!("0x{}", "7f".repeat(len));
            let signature = codec.read(&JsonToken::string(text.as_bytes())).unwrap();
            assert_eq!(signature.as_bytes().len(), len);
            assert_eq!(codec.write_string(&signature).unwrap(), text);
        }
    }

    #[test]
    fn test_unprefixed_hex_signature() {
        let text = "ab".repeat(65);
        let signature = SignatureCodec::default()
            .read(&JsonToken::string(text.as_bytes()))
            .unwrap();
        assert!(matches!(signature, Signature::Hex65(_)));
    }

    #[test]
    fn test_base58_signature() {
        let codec = SignatureCodec::default();
        let bytes = [0x99u8; 64];
        let text = bs58::encode(bytes).into_string();
        let signature = codec.read(&JsonToken::string(text.as_bytes())).unwrap();
        assert_eq!(signature, Signature::Base58(bytes));
        assert_eq!(codec.write_string(&signature).unwrap(), text);
    }

    #[test]
    fn test_null_is_zero_65_byte_signature() {
        let signature = SignatureCodec::default().read(&JsonToken::Null).unwrap();
        assert_eq!(signature, Signature::Hex65([0; 65]));
    }

    #[test]
    fn test_wrong_hex_length() {
        let text = format!("0x{}", "00".repeat(63));
        let err = SignatureCodec::default()
            .read(&JsonToken::string(text.as_bytes()))
            .unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::InvalidLength {
                expected: ExpectedLength::OneOf(&[128, 130]),
                found: 126
            }
        );
    }
}
