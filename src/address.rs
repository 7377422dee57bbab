//! Account addresses from hex-address and Base58-address chains.
//!
//! An [`Address`] remembers which family it was read from and is written back
//! in the same family: 20-byte hex addresses as `0x` + 40 lowercase digits,
//! Base58 addresses (1 to 32 bytes) as Base58 text.

use crate::codec::{read_string, write_base58, write_hex, TokenCodec};
use crate::detect::{self, Encoding};
use crate::error::{ErrorKind, Result, ValueKind};
use crate::options::CodecOptions;
use crate::token::JsonToken;
use std::fmt;

/// Byte width of a hex-family address.
pub const HEX_ADDRESS_LEN: usize = 20;

/// Largest Base58-family address.
pub const MAX_BASE58_ADDRESS_LEN: usize = 32;

/// A Base58-family address of 1 to 32 bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Base58Address {
    len: u8,
    bytes: [u8; MAX_BASE58_ADDRESS_LEN],
}

impl Base58Address {
    /// Returns `None` if `bytes` is empty or longer than 32 bytes.
    pub fn new(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() || bytes.len() > MAX_BASE58_ADDRESS_LEN {
            return None;
        }
        let mut out = [0u8; MAX_BASE58_ADDRESS_LEN];
        out[..bytes.len()].copy_from_slice(bytes);
        Some(Base58Address {
            len: bytes.len() as u8,
            bytes: out,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

impl fmt::Debug for Base58Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Base58Address({})", bs58::encode(self.as_bytes()).into_string())
    }
}

/// An address in either family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Address {
    Hex([u8; HEX_ADDRESS_LEN]),
    Base58(Base58Address),
}

impl Address {
    /// The zero hex address, used for null.
    pub const ZERO: Address = Address::Hex([0; HEX_ADDRESS_LEN]);

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Address::Hex(bytes) => bytes,
            Address::Base58(address) => address.as_bytes(),
        }
    }

    pub fn encoding(&self) -> Encoding {
        match self {
            Address::Hex(_) => Encoding::Hex,
            Address::Base58(_) => Encoding::Base58,
        }
    }
}

impl Default for Address {
    fn default() -> Self {
        Address::ZERO
    }
}

impl From<[u8; HEX_ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; HEX_ADDRESS_LEN]) -> Self {
        Address::Hex(bytes)
    }
}

impl From<Base58Address> for Address {
    fn from(address: Base58Address) -> Self {
        Address::Base58(address)
    }
}

/// Codec for [`Address`].
///
/// # Examples
///
/// ```rust
/// use serde_bintext::{Address, AddressCodec, JsonToken, TokenCodec};
///
/// let codec = AddressCodec::default();
/// let program = codec.read(&JsonToken::string(b"11111111111111111111111111111111")).unwrap();
/// assert!(matches!(program, Address::Base58(_)));
/// assert_eq!(program.as_bytes(), &[0u8; 32]);
/// assert_eq!(codec.write_string(&program).unwrap(), "11111111111111111111111111111111");
/// ```
#[derive(Clone, Debug, Default)]
pub struct AddressCodec {
    options: CodecOptions,
}

impl AddressCodec {
    pub fn new(options: CodecOptions) -> Self {
        AddressCodec { options }
    }
}

impl TokenCodec for AddressCodec {
    type Value = Address;

    fn value_kind(&self) -> ValueKind {
        ValueKind::Address
    }

    fn read(&self, token: &JsonToken<'_>) -> Result<Address> {
        read_string(token, ValueKind::Address, &self.options, Address::default, |text| {
            let decoded = detect::detect(text, &detect::ADDRESS, self.options.base58_alphabet)?;
            match decoded.encoding {
                Encoding::Hex => {
                    let mut bytes = [0u8; HEX_ADDRESS_LEN];
                    bytes.copy_from_slice(decoded.as_bytes());
                    Ok(Address::Hex(bytes))
                }
                Encoding::Base58 | Encoding::Base64 => Base58Address::new(decoded.as_bytes())
                    .map(Address::Base58)
                    .ok_or(ErrorKind::UnrecognizedEncoding),
            }
        })
    }

    fn write<R>(&self, value: &Address, emit: impl FnOnce(&str) -> R) -> Result<R> {
        match value {
            Address::Hex(bytes) => {
                write_hex(ValueKind::Address, &self.options, bytes, true, false, emit)
            }
            Address::Base58(address) => {
                write_base58(ValueKind::Address, &self.options, address.as_bytes(), emit)
            }
        }
    }
}

impl_codec_value!(Address => AddressCodec);
