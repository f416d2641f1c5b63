//! Testing utilities for code built on rowcast.
//!
//! - **Fixtures**: sample record types ([`Person`], [`Order`], [`Measurement`],
//!   [`Opaque`]) and datasets
//! - **Assertions**: compare tables, CSV output and shuffled sequences
//!
//! Pair these with [`MemorySink`](crate::sink::MemorySink) to test bulk
//! transfers without a database.
//!
//! # Quick Start
//!
//! ```
//! use rowcast::testing::*;
//! use rowcast::{ScalarType, Value, to_csv, to_table};
//!
//! let people = sample_people();
//! let table = to_table(&people).unwrap();
//! assert_columns(&table, &[("Id", ScalarType::I32), ("Name", ScalarType::Text)]);
//! assert_rows(
//!     &table,
//!     &[vec![Value::I32(1), Value::from("A")], vec![Value::I32(2), Value::Null]],
//! );
//! assert_csv_lines(&to_csv(&people).unwrap(), &["1,\"A\"", "2,\"\""]);
//! ```

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;
