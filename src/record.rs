//! Record types and their exposed attributes.
//!
//! A [`Record`] lists the attributes it exposes, in a fixed order. Column
//! alignment in [`Table`](crate::Table) follows that order, so it must not
//! depend on runtime state. Most implementations are generated by the
//! [`record!`](crate::record!) macro:
//!
//! ```
//! use rowcast::record;
//!
//! struct Person {
//!     id: i32,
//!     name: Option<String>,
//! }
//!
//! record!(Person {
//!     "Id" => id,
//!     "Name" => name,
//! });
//!
//! let attrs = rowcast::describe::<Person>().unwrap();
//! assert_eq!(attrs[0].name, "Id");
//! assert!(attrs[1].nullable);
//! ```
//!
//! Attributes whose value has to be computed, and may fail, are declared by
//! hand with [`Attribute::computed`].

use crate::value::{FieldType, ScalarType, Value};
use serde::{Deserialize, Serialize};
use std::any::type_name;
use std::fmt;

/// Name, storage type and nullability of one exposed attribute.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    pub name: String,
    pub value_type: ScalarType,
    pub nullable: bool,
}

type Reader<T> = Box<dyn Fn(&T) -> Result<Value, String> + Send + Sync>;

/// An exposed attribute of `T`: its descriptor plus a reader.
pub struct Attribute<T> {
    descriptor: AttributeDescriptor,
    reader: Reader<T>,
}

impl<T: 'static> Attribute<T> {
    /// An attribute backed by a field; reading it cannot fail.
    pub fn field<F, G>(name: impl Into<String>, get: G) -> Self
    where
        F: FieldType + 'static,
        G: Fn(&T) -> &F + Send + Sync + 'static,
    {
        Self {
            descriptor: AttributeDescriptor {
                name: name.into(),
                value_type: F::SCALAR,
                nullable: F::NULLABLE,
            },
            reader: Box::new(move |record| Ok(get(record).to_value())),
        }
    }

    /// An attribute computed from the record. An `Err` aborts the conversion
    /// that is reading it.
    pub fn computed<F, G>(name: impl Into<String>, get: G) -> Self
    where
        F: FieldType + 'static,
        G: Fn(&T) -> Result<F, String> + Send + Sync + 'static,
    {
        Self {
            descriptor: AttributeDescriptor {
                name: name.into(),
                value_type: F::SCALAR,
                nullable: F::NULLABLE,
            },
            reader: Box::new(move |record| get(record).map(|v| v.to_value())),
        }
    }
}

impl<T> Attribute<T> {
    #[must_use]
    pub fn descriptor(&self) -> &AttributeDescriptor {
        &self.descriptor
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Read the attribute's current value from `record`.
    ///
    /// # Errors
    /// Returns the reader's message when a computed attribute fails.
    pub fn read(&self, record: &T) -> Result<Value, String> {
        (self.reader)(record)
    }
}

impl<T> fmt::Debug for Attribute<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// A type whose values can be turned into table rows.
pub trait Record: Send + Sync + 'static {
    /// Exposed attributes in declaration order.
    fn attributes() -> Vec<Attribute<Self>>
    where
        Self: Sized;

    /// Short name of the record type, used as the default destination table.
    fn record_name() -> &'static str
    where
        Self: Sized,
    {
        short_type_name(type_name::<Self>())
    }
}

/// Strip the module path and generic arguments from a type name.
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Implement [`Record`] for a struct from `"Attribute" => field` pairs.
///
/// The attribute order is the order written. An optional `as "Name"` sets
/// [`Record::record_name`].
///
/// ```
/// use rowcast::record;
///
/// struct Order { id: u64, total: f64 }
///
/// record!(Order as "Orders" {
///     "OrderId" => id,
///     "Total" => total,
/// });
///
/// use rowcast::Record;
/// assert_eq!(Order::record_name(), "Orders");
/// ```
#[macro_export]
macro_rules! record {
    ($ty:ty as $table:literal { $($name:literal => $field:ident),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn attributes() -> ::std::vec::Vec<$crate::Attribute<Self>> {
                ::std::vec![
                    $( $crate::Attribute::field($name, |r: &Self| &r.$field) ),*
                ]
            }

            fn record_name() -> &'static str {
                $table
            }
        }
    };
    ($ty:ty { $($name:literal => $field:ident),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn attributes() -> ::std::vec::Vec<$crate::Attribute<Self>> {
                ::std::vec![
                    $( $crate::Attribute::field($name, |r: &Self| &r.$field) ),*
                ]
            }
        }
    };
}
