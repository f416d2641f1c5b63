//! Compact binary encoding via `postcard`, with a base64 text form.

use crate::error::FormatError;
use crate::io::Codec;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Encode `value` as postcard bytes.
///
/// # Errors
/// Returns [`FormatError::Binary`] if `value` cannot be serialized.
pub fn to_binary<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, FormatError> {
    postcard::to_allocvec(value).map_err(|e| FormatError::Binary(e.to_string()))
}

/// Decode postcard bytes.
///
/// # Errors
/// Returns [`FormatError::Binary`] if the bytes are not a valid encoding of `T`.
pub fn from_binary<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, FormatError> {
    postcard::from_bytes(bytes).map_err(|e| FormatError::Binary(e.to_string()))
}

/// Encode `value` as postcard bytes wrapped in standard base64.
///
/// # Errors
/// See [`to_binary`].
pub fn to_base64<T: Serialize + ?Sized>(value: &T) -> Result<String, FormatError> {
    Ok(STANDARD.encode(to_binary(value)?))
}

/// Decode text produced by [`to_base64`].
///
/// # Errors
/// [`FormatError::Base64`] for invalid base64, [`FormatError::Binary`] for
/// an invalid payload.
pub fn from_base64<T: DeserializeOwned>(text: &str) -> Result<T, FormatError> {
    let bytes = STANDARD
        .decode(text.trim())
        .map_err(|e| FormatError::Base64(e.to_string()))?;
    from_binary(&bytes)
}

/// [`Codec`] producing base64 text over postcard bytes.
#[derive(Clone, Copy, Debug, Default)]
pub struct BinaryCodec;

impl Codec for BinaryCodec {
    type Encoded = String;

    fn encode<T: Serialize>(&self, value: &T) -> Result<String, FormatError> {
        to_base64(value)
    }

    fn decode<T: DeserializeOwned>(&self, encoded: &String) -> Result<T, FormatError> {
        from_base64(encoded)
    }
}
