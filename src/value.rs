//! Scalar column types and cell values.
//!
//! [`FieldType`] is the bridge between a Rust field and a table column: it
//! names the column's [`ScalarType`] and converts a field into a [`Value`].
//! `Option<T>` reports the scalar type of `T` and marks the attribute as
//! nullable, so an optional integer becomes a plain integer column whose
//! cells may be [`Value::Null`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage type of a column, with any optional wrapper already stripped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Char,
    Text,
    Bytes,
}

impl ScalarType {
    /// Whether values of this type are numbers.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        !matches!(
            self,
            ScalarType::Bool | ScalarType::Char | ScalarType::Text | ScalarType::Bytes
        )
    }
}

/// One table cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Char(char),
    Text(String),
    Bytes(Vec<u8>),
}

impl Value {
    /// The scalar type of this value, or `None` for [`Value::Null`].
    #[must_use]
    pub const fn scalar_type(&self) -> Option<ScalarType> {
        Some(match self {
            Value::Null => return None,
            Value::Bool(_) => ScalarType::Bool,
            Value::I8(_) => ScalarType::I8,
            Value::I16(_) => ScalarType::I16,
            Value::I32(_) => ScalarType::I32,
            Value::I64(_) => ScalarType::I64,
            Value::U8(_) => ScalarType::U8,
            Value::U16(_) => ScalarType::U16,
            Value::U32(_) => ScalarType::U32,
            Value::U64(_) => ScalarType::U64,
            Value::F32(_) => ScalarType::F32,
            Value::F64(_) => ScalarType::F64,
            Value::Char(_) => ScalarType::Char,
            Value::Text(_) => ScalarType::Text,
            Value::Bytes(_) => ScalarType::Bytes,
        })
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True when the value is null or has exactly the given type.
    #[must_use]
    pub fn conforms_to(&self, ty: ScalarType) -> bool {
        self.scalar_type().is_none_or(|own| own == ty)
    }

    /// Borrow the text of a [`Value::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Display form of a value. Nulls render empty, bytes as lowercase hex.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(v) => write!(f, "{v}"),
            Value::I8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v}"),
            Value::U16(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "{v}"),
            Value::Text(v) => f.write_str(v),
            Value::Bytes(v) => v.iter().try_for_each(|b| write!(f, "{b:02x}")),
        }
    }
}

/// A Rust type that can back a record attribute.
pub trait FieldType {
    /// Column type of the attribute.
    const SCALAR: ScalarType;
    /// Whether the attribute may hold [`Value::Null`].
    const NULLABLE: bool = false;

    /// Copy the field into a cell.
    fn to_value(&self) -> Value;
}

macro_rules! impl_field_type {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl FieldType for $t {
                const SCALAR: ScalarType = ScalarType::$variant;

                #[inline]
                fn to_value(&self) -> Value {
                    Value::$variant(*self)
                }
            }

            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_field_type!(
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    char => Char,
);

impl FieldType for String {
    const SCALAR: ScalarType = ScalarType::Text;

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl FieldType for &'static str {
    const SCALAR: ScalarType = ScalarType::Text;

    fn to_value(&self) -> Value {
        Value::Text((*self).to_string())
    }
}

impl FieldType for Vec<u8> {
    const SCALAR: ScalarType = ScalarType::Bytes;

    fn to_value(&self) -> Value {
        Value::Bytes(self.clone())
    }
}

impl<T: FieldType> FieldType for Option<T> {
    const SCALAR: ScalarType = T::SCALAR;
    const NULLABLE: bool = true;

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, FieldType::to_value)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
