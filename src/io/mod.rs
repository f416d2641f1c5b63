//! Text and byte representations of records and values.
//!
//! - [`csv`] formats records as CSV text (feature `io-csv`)
//! - [`binary`] encodes with postcard, optionally as base64 (feature `io-binary`)
//! - [`xml`] encodes with quick-xml (feature `io-xml`)
//! - [`json`] encodes with `serde_json` and provides [`deep_clone`](json::deep_clone)
//!
//! The serde codecs share the [`Codec`] trait. For every value `x` a codec can
//! encode, `decode(encode(x))` is structurally equal to `x`.

use crate::error::FormatError;
use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg_attr(docsrs, doc(cfg(feature = "io-csv")))]
#[cfg(feature = "io-csv")]
pub mod csv;

#[cfg_attr(docsrs, doc(cfg(feature = "io-binary")))]
#[cfg(feature = "io-binary")]
pub mod binary;

#[cfg_attr(docsrs, doc(cfg(feature = "io-xml")))]
#[cfg(feature = "io-xml")]
pub mod xml;

pub mod json;

/// A serde-backed round-trip encoding.
pub trait Codec {
    /// Encoded form, e.g. `String` for text codecs.
    type Encoded;

    /// # Errors
    /// Returns a [`FormatError`] if `value` cannot be represented.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Self::Encoded, FormatError>;

    /// # Errors
    /// Returns a [`FormatError`] if `encoded` is malformed or does not match `T`.
    fn decode<T: DeserializeOwned>(&self, encoded: &Self::Encoded) -> Result<T, FormatError>;

    /// `decode(encode(value))`.
    ///
    /// # Errors
    /// Returns a [`FormatError`] if either direction fails.
    fn roundtrip<T: Serialize + DeserializeOwned>(&self, value: &T) -> Result<T, FormatError> {
        self.decode(&self.encode(value)?)
    }
}
