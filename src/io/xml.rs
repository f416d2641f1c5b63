//! XML encoding via `quick-xml`'s serde support.
//!
//! Output has no XML declaration and no namespace attributes. Empty elements
//! are always written in expanded form (`<Note></Note>`, never `<Note/>`),
//! which some older consumers require.

use crate::error::FormatError;
use crate::io::Codec;
use quick_xml::se::Serializer;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Serialize `value` with its type name as the root element.
///
/// # Errors
/// Returns [`FormatError::Xml`] if `value` has no XML representation (for
/// example a bare integer, which has no element name).
pub fn to_xml<T: Serialize + ?Sized>(value: &T) -> Result<String, FormatError> {
    let mut out = String::new();
    let mut ser = Serializer::new(&mut out);
    ser.expand_empty_elements(true);
    value
        .serialize(ser)
        .map_err(|e| FormatError::Xml(e.to_string()))?;
    Ok(out)
}

/// Serialize `value` under an explicit root element.
///
/// # Errors
/// Returns [`FormatError::Xml`] if `root` is not a valid element name or the
/// value cannot be serialized.
pub fn to_xml_with_root<T: Serialize + ?Sized>(value: &T, root: &str) -> Result<String, FormatError> {
    let mut out = String::new();
    let mut ser =
        Serializer::with_root(&mut out, Some(root)).map_err(|e| FormatError::Xml(e.to_string()))?;
    ser.expand_empty_elements(true);
    value
        .serialize(ser)
        .map_err(|e| FormatError::Xml(e.to_string()))?;
    Ok(out)
}

/// Deserialize XML produced by [`to_xml`] (or any compatible document).
///
/// # Errors
/// Returns [`FormatError::Xml`] for malformed XML or a document that does not
/// match `T`.
pub fn from_xml<T: DeserializeOwned>(xml: &str) -> Result<T, FormatError> {
    quick_xml::de::from_str(xml).map_err(|e| FormatError::Xml(e.to_string()))
}

/// [`Codec`] producing XML text.
#[derive(Clone, Copy, Debug, Default)]
pub struct XmlCodec;

impl Codec for XmlCodec {
    type Encoded = String;

    fn encode<T: Serialize>(&self, value: &T) -> Result<String, FormatError> {
        to_xml(value)
    }

    fn decode<T: DeserializeOwned>(&self, encoded: &String) -> Result<T, FormatError> {
        from_xml(encoded)
    }
}
