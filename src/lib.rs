//! # rowcast
//!
//! Generic data-shape conversion for Rust: typed records to column-typed
//! tables, CSV text, serde encodings, and bulk loads into a relational store.
//!
//! ## Key Features
//!
//! - **Record descriptions** - a type lists its attributes once (usually via [`record!`]);
//!   the [`DescriptorCache`] memoizes that list per type
//! - **Tables** - [`to_table`] turns any sequence of records into a [`Table`] with one typed
//!   column per attribute; `Option<T>` fields become nullable `T` columns
//! - **CSV** - [`to_csv`] writes records with a fixed quoting dialect (feature `io-csv`)
//! - **Codecs** - postcard/base64, XML and JSON round trips plus [`deep_clone`]
//! - **Bulk transfer** - [`bulk_copy`] streams a table into any [`Sink`] under a timeout,
//!   closing the connection on every path
//! - **Helpers** - [`shuffle`], [`traverse`], [`split`] and [`natural_cmp`]
//!
//! ## Quick Start
//!
//! ```
//! use rowcast::*;
//! use rowcast::sink::MemorySink;
//! # fn main() -> rowcast::Result<()> {
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
//! let people = vec![
//!     Person { id: 1, name: Some("A".into()) },
//!     Person { id: 2, name: None },
//! ];
//!
//! // Table form
//! let table = to_table(&people)?;
//! assert_eq!(table.column_names().collect::<Vec<_>>(), ["Id", "Name"]);
//! assert_eq!(table.rows()[1], vec![Value::I32(2), Value::Null]);
//!
//! // CSV form
//! assert_eq!(to_csv(&people)?, "1,\"A\"\n2,\"\"\n");
//!
//! // Bulk load
//! let sink = MemorySink::new();
//! sink.create_table("Person", ["Id", "Name"]);
//! let report = bulk_copy(&sink, "Person", &table, &BulkCopyOptions::default())?;
//! assert_eq!(report.rows_written, 2);
//! assert_eq!(sink.open_connections(), 0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `io-csv` - CSV formatting
//! - `io-xml` - XML codec
//! - `io-binary` - postcard binary codec and its base64 text form
//!
//! ## Module Overview
//!
//! - [`record`] - the [`Record`] trait, attributes and the [`record!`] macro
//! - [`cache`] - the per-type descriptor cache
//! - [`table`] / [`mapper`] - tables and record-to-table conversion
//! - [`io`] - CSV and the serde codecs
//! - [`sink`] / [`bulk`] - the sink interface, an in-memory sink, and bulk copy
//! - [`collections`] / [`utils`] - input-preparation helpers and natural ordering
//! - [`testing`] - fixtures and assertions

pub mod bulk;
pub mod cache;
pub mod collections;
pub mod error;
pub mod io;
pub mod mapper;
pub mod record;
pub mod sink;
pub mod table;
pub mod testing;
pub mod utils;
pub mod value;

// General re-exports
pub use bulk::{
    BulkCopyOptions, BulkCopyReport, DEFAULT_TIMEOUT_SECS, bulk_copy, bulk_copy_records,
    bulk_copy_records_into, quote_identifier,
};
pub use cache::{DescriptorCache, RecordShape, describe};
pub use collections::{Shuffle, Traverse, shuffle, split, traverse};
pub use error::{Error, FormatError, MappingError, Result, TransferError};
pub use io::Codec;
pub use io::json::{JsonCodec, deep_clone, from_json, to_json};
pub use mapper::{TableMapper, to_table, to_table_par};
pub use record::{Attribute, AttributeDescriptor, Record};
pub use sink::{Sink, SinkError, SinkErrorKind};
pub use table::{ColumnDescriptor, Row, Table};
pub use utils::{NaturalKey, natural_cmp};
pub use value::{FieldType, ScalarType, Value};

// Gated re-exports
#[cfg(feature = "io-csv")]
pub use io::csv::{CsvOptions, LineTerminator, to_csv, to_csv_with, write_csv_file};

#[cfg(feature = "io-binary")]
pub use io::binary::{BinaryCodec, from_base64, from_binary, to_base64, to_binary};

#[cfg(feature = "io-xml")]
pub use io::xml::{XmlCodec, from_xml, to_xml};
