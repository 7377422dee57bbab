/// Wires a value type to its default codec.
///
/// Generates `CodecValue`, `Serialize`, `Deserialize`, `Display` and
/// `FromStr` impls that all go through `<$codec>::default()`. Const generic
/// parameters follow `@generic` before the type, as in
/// `@generic<const N: usize> FixedBytes<N> => FixedBytesCodec<N>`.
macro_rules! impl_codec_value {
    ($(@generic<$(const $param:ident: $pty:ty),*>)? $value:ty => $codec:ty) => {
        impl$(<$(const $param: $pty),*>)? $crate::codec::CodecValue for $value {
            type Codec = $codec;
        }

        impl$(<$(const $param: $pty),*>)? ::serde::Serialize for $value {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                $crate::ser::serialize_with(&<$codec>::default(), self, serializer)
            }
        }

        impl<'de $($(, const $param: $pty)*)?> ::serde::Deserialize<'de> for $value {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                $crate::de::deserialize_with(&<$codec>::default(), deserializer)
            }
        }

        impl$(<$(const $param: $pty),*>)? ::std::fmt::Display for $value {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                use $crate::codec::TokenCodec;
                match <$codec>::default().write(self, |text| f.write_str(text)) {
                    Ok(result) => result,
                    Err(_) => Err(::std::fmt::Error),
                }
            }
        }

        impl$(<$(const $param: $pty),*>)? ::std::str::FromStr for $value {
            type Err = $crate::error::Error;

            fn from_str(s: &str) -> $crate::error::Result<Self> {
                use $crate::codec::TokenCodec;
                <$codec>::default().read(&$crate::token::JsonToken::string(s.as_bytes()))
            }
        }
    };
}

/// Generates a `serialize`/`deserialize` pair for `#[serde(with = "...")]`
/// that uses the given codec constructor.
macro_rules! with_module {
    ($(#[$meta:meta])* $name:ident, $value:ty, $codec:expr) => {
        $(#[$meta])*
        pub mod $name {
            use super::*;

            pub fn serialize<S>(value: &$value, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                $crate::ser::serialize_with(&$codec, value, serializer)
            }

            pub fn deserialize<'de, D>(deserializer: D) -> ::std::result::Result<$value, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                $crate::de::deserialize_with(&$codec, deserializer)
            }
        }
    };
}
