//! Serialization through serde.
//!
//! Every value kind serializes as a single string. The codec formats the value
//! into a scoped buffer and the text is handed to [`Serializer::serialize_str`]
//! while the buffer is alive, so no intermediate `String` is allocated.
//!
//! ## Usage
//!
//! ```rust
//! use serde::Serialize;
//! use serde_bintext::{Address, Hash};
//!
//! #[derive(Serialize)]
//! struct Transfer {
//!     tx: Hash,
//!     #[serde(with = "serde_bintext::hash::unprefixed")]
//!     block: Hash,
//!     to: Address,
//! }
//!
//! let transfer = Transfer {
//!     tx: Hash::from([0x11; 32]),
//!     block: Hash::from([0x22; 32]),
//!     to: Address::Hex([0x33; 20]),
//! };
//! let json = serde_json::to_string(&transfer).unwrap();
//! assert!(json.contains(&format!(r#""block":"{}""#, "22".repeat(32))));
//! ```

use crate::codec::TokenCodec;
use serde::ser::{self, Serializer};

/// Serializes `value` as a string using `codec`.
///
/// # Errors
///
/// Returns the serializer's own error, or a custom error carrying the codec's
/// message if formatting failed.
pub fn serialize_with<C, S>(codec: &C, value: &C::Value, serializer: S) -> Result<S::Ok, S::Error>
where
    C: TokenCodec,
    S: Serializer,
{
    match codec.write(value, |text| serializer.serialize_str(text)) {
        Ok(result) => result,
        Err(err) => Err(ser::Error::custom(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytes::{Bytes, BytesCodec};
    use crate::options::CodecOptions;

    #[test]
    fn test_serialize_with_options() {
        let value = Bytes::from(vec![0xde, 0xad]);
        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::new(&mut out);
        serialize_with(
            &BytesCodec::new(CodecOptions::unprefixed()),
            &value,
            &mut serializer,
        )
        .unwrap();
        assert_eq!(out, br#""dead""#);
    }

    #[test]
    fn test_large_value_goes_through_pool() {
        let pool = std::sync::Arc::new(crate::buffer::BufferPool::new(Default::default()));
        let codec = BytesCodec::new(CodecOptions::new().with_pool(pool.clone()));
        let value = Bytes::from(vec![0xab; 1000]);
        let json = {
            let mut out = Vec::new();
            serialize_with(&codec, &value, &mut serde_json::Serializer::new(&mut out)).unwrap();
            out
        };
        assert_eq!(json.len(), 2 + 2 + 2000);
        assert_eq!(pool.stats().rented, 1);
        assert_eq!(pool.stats().outstanding(), 0);
    }
}
