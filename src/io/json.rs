//! JSON encoding and structural cloning.

use crate::error::FormatError;
use crate::io::Codec;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// # Errors
/// Returns [`FormatError::Json`] if `value` cannot be serialized (for example
/// a map with non-string keys).
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, FormatError> {
    Ok(serde_json::to_string(value)?)
}

/// # Errors
/// Returns [`FormatError::Json`] for malformed JSON or a document that does
/// not match `T`.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, FormatError> {
    Ok(serde_json::from_str(json)?)
}

/// A deep, independent copy of `value`, made by a JSON round trip.
///
/// Unlike `Clone`, this only keeps what serde sees: skipped fields come back
/// as their defaults.
///
/// # Errors
/// Returns [`FormatError::Json`] if either direction fails.
pub fn deep_clone<T: Serialize + DeserializeOwned>(value: &T) -> Result<T, FormatError> {
    JsonCodec.roundtrip(value)
}

/// [`Codec`] producing JSON text.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    type Encoded = String;

    fn encode<T: Serialize>(&self, value: &T) -> Result<String, FormatError> {
        to_json(value)
    }

    fn decode<T: DeserializeOwned>(&self, encoded: &String) -> Result<T, FormatError> {
        from_json(encoded)
    }
}
