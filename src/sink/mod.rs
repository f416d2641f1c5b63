//! The bulk-load destination interface.
//!
//! A [`Sink`] is an external store that can take a whole [`Table`] in one
//! bulk write. The bulk pipeline (see [`crate::bulk`]) only depends on this
//! trait; transports (SQL Server, Postgres `COPY`, files, ...) implement it
//! elsewhere. [`MemorySink`] is an in-memory implementation for tests and
//! dry runs.

use crate::table::Table;
use std::error::Error;
use std::fmt;
use std::time::Duration;

pub mod memory;

pub use memory::{Fault, MemorySink};

/// What went wrong inside a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkErrorKind {
    Connection,
    NotFound,
    Rejected,
    Timeout,
    Other,
}

/// Error reported by a [`Sink`] implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkError {
    pub kind: SinkErrorKind,
    pub message: String,
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for SinkError {}

impl SinkError {
    pub fn new(kind: SinkErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.kind == SinkErrorKind::Timeout
    }
}

pub type SinkResult<T> = Result<T, SinkError>;

/// Source column `source_index` of the table goes to `destination`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub source_index: usize,
    pub source: String,
    pub destination: String,
}

/// One bulk write request.
#[derive(Debug, Clone, Copy)]
pub struct BulkWrite<'a> {
    /// Destination as given by the caller, unquoted.
    pub table_name: &'a str,
    /// Destination identifier-quoted, e.g. `[Orders]`.
    pub destination: &'a str,
    pub table: &'a Table,
    /// One mapping per table column, in column order.
    pub mappings: &'a [ColumnMapping],
    /// The write must finish within this bound or fail with
    /// [`SinkErrorKind::Timeout`].
    pub timeout: Duration,
    /// Rows per round trip, if the caller has a preference.
    pub batch_size: Option<usize>,
}

/// A bulk-loadable store.
///
/// Connections are opened per transfer and must not be shared between
/// concurrent transfers.
pub trait Sink {
    type Connection;

    /// Open a connection.
    ///
    /// # Errors
    /// Returns a [`SinkError`] if the store refuses or cannot be reached.
    fn open(&self) -> SinkResult<Self::Connection>;

    /// Column names of `table_name`, or `None` if there is no such table.
    ///
    /// # Errors
    /// Returns a [`SinkError`] if the catalogue cannot be read.
    fn destination_columns(
        &self,
        conn: &mut Self::Connection,
        table_name: &str,
    ) -> SinkResult<Option<Vec<String>>>;

    /// Write every row of the request. Returns the number of rows written.
    ///
    /// # Errors
    /// Returns a [`SinkError`] if the store rejects the rows or the write
    /// exceeds `request.timeout`.
    fn bulk_write(&self, conn: &mut Self::Connection, request: &BulkWrite<'_>) -> SinkResult<u64>;

    /// Release the connection. Called exactly once per opened connection.
    ///
    /// # Errors
    /// Returns a [`SinkError`] if the store reports a failure while closing.
    fn close(&self, conn: &mut Self::Connection) -> SinkResult<()>;
}
