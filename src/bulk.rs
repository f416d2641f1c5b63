//! Bulk transfer of a [`Table`] into a [`Sink`].
//!
//! One call to [`bulk_copy`]:
//! 1. opens a connection, held by a guard that closes it on every exit path
//! 2. maps each table column to the destination column of the same name,
//!    failing before any row is sent if the table or a column is missing
//! 3. sends all rows as a single bulk write bounded by the timeout
//! 4. closes the connection
//!
//! There are no retries and no rollback: on failure the sink's own
//! partial-write semantics apply, and calling again with the same table
//! appends the rows again.
//!
//! The destination name is bracket-quoted as given (`Orders` becomes
//! `[Orders]`). Nothing inside the brackets is escaped, so table names must
//! come from trusted input.

use crate::cache::DescriptorCache;
use crate::error::{Error, MappingError, TransferError};
use crate::mapper::TableMapper;
use crate::record::Record;
use crate::sink::{BulkWrite, ColumnMapping, Sink};
use crate::table::Table;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default bulk write timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 240;

/// Options for [`bulk_copy`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkCopyOptions {
    /// Upper bound for the bulk write, in seconds.
    pub timeout_secs: u64,
    /// Rows per round trip, forwarded to the sink as a hint.
    pub batch_size: Option<usize>,
}

impl Default for BulkCopyOptions {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            batch_size: None,
        }
    }
}

impl BulkCopyOptions {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub const fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    #[must_use]
    pub const fn with_batch_size(mut self, rows: usize) -> Self {
        self.batch_size = Some(rows);
        self
    }
}

/// Outcome of a successful transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BulkCopyReport {
    /// Quoted destination, e.g. `[Orders]`.
    pub destination: String,
    pub rows_written: u64,
    pub elapsed: Duration,
}

/// Bracket-quote a table name. No escaping is applied.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    format!("[{name}]")
}

/// Owns an open connection and closes it when dropped, unless
/// [`ConnectionGuard::close`] already did.
struct ConnectionGuard<'s, S: Sink> {
    sink: &'s S,
    conn: S::Connection,
    closed: bool,
}

impl<'s, S: Sink> ConnectionGuard<'s, S> {
    fn open(sink: &'s S) -> Result<Self, TransferError> {
        let conn = sink.open().map_err(TransferError::Connect)?;
        Ok(Self {
            sink,
            conn,
            closed: false,
        })
    }

    fn close(mut self) -> Result<(), TransferError> {
        self.closed = true;
        self.sink.close(&mut self.conn).map_err(TransferError::Close)
    }
}

impl<S: Sink> Deref for ConnectionGuard<'_, S> {
    type Target = S::Connection;

    fn deref(&self) -> &S::Connection {
        &self.conn
    }
}

impl<S: Sink> DerefMut for ConnectionGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S::Connection {
        &mut self.conn
    }
}

impl<S: Sink> Drop for ConnectionGuard<'_, S> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.sink.close(&mut self.conn) {
            // the transfer's own error is already on its way to the caller
            warn!(error = %e, "closing sink connection after a failed transfer");
        }
    }
}

/// Map every table column onto the same-named destination column.
fn map_columns(
    table_name: &str,
    table: &Table,
    available: &[String],
) -> Result<Vec<ColumnMapping>, MappingError> {
    table
        .column_names()
        .enumerate()
        .map(|(source_index, name)| {
            if available.iter().any(|c| c == name) {
                Ok(ColumnMapping {
                    source_index,
                    source: name.to_string(),
                    destination: name.to_string(),
                })
            } else {
                Err(MappingError::MissingDestinationColumn {
                    table: table_name.to_string(),
                    column: name.to_string(),
                })
            }
        })
        .collect()
}

/// Stream `table` into `table_name` on `sink`.
///
/// # Errors
/// - [`TransferError::Connect`] if the connection cannot be opened
/// - [`MappingError::DestinationNotFound`] / [`MappingError::MissingDestinationColumn`]
///   before any row is sent
/// - [`TransferError::Write`] or [`TransferError::Timeout`] from the write
/// - [`TransferError::Close`] if closing fails after the write
///
/// The connection is closed on every path.
pub fn bulk_copy<S: Sink>(
    sink: &S,
    table_name: &str,
    table: &Table,
    options: &BulkCopyOptions,
) -> Result<BulkCopyReport, Error> {
    let destination = quote_identifier(table_name);
    let timeout = options.timeout();
    let started = Instant::now();
    debug!(
        destination = %destination,
        rows = table.len(),
        columns = table.column_count(),
        timeout_secs = options.timeout_secs,
        "bulk copy starting"
    );

    let mut conn = ConnectionGuard::open(sink)?;

    let available = sink
        .destination_columns(&mut conn, table_name)
        .map_err(|source| TransferError::Schema {
            table: destination.clone(),
            source,
        })?
        .ok_or_else(|| MappingError::DestinationNotFound {
            table: table_name.to_string(),
        })?;
    let mappings = map_columns(table_name, table, &available)?;

    let request = BulkWrite {
        table_name,
        destination: &destination,
        table,
        mappings: &mappings,
        timeout,
        batch_size: options.batch_size,
    };
    let rows_written = sink.bulk_write(&mut conn, &request).map_err(|source| {
        if source.is_timeout() {
            TransferError::Timeout {
                table: destination.clone(),
                timeout,
                source,
            }
        } else {
            TransferError::Write {
                table: destination.clone(),
                source,
            }
        }
    })?;

    conn.close()?;

    let elapsed = started.elapsed();
    debug!(
        destination = %destination,
        rows_written,
        elapsed = ?elapsed,
        "bulk copy finished"
    );
    Ok(BulkCopyReport {
        destination,
        rows_written,
        elapsed,
    })
}

/// Convert `records` and copy them into `table_name`.
///
/// # Errors
/// Mapping errors from the conversion, then everything [`bulk_copy`] returns.
pub fn bulk_copy_records_into<'r, S, T, I>(
    sink: &S,
    table_name: &str,
    records: I,
    options: &BulkCopyOptions,
) -> Result<BulkCopyReport, Error>
where
    S: Sink,
    T: Record,
    I: IntoIterator<Item = &'r T>,
{
    let table = TableMapper::new(DescriptorCache::global()).to_table(records)?;
    bulk_copy(sink, table_name, &table, options)
}

/// Convert `records` and copy them into the table named by
/// [`Record::record_name`].
///
/// # Errors
/// See [`bulk_copy_records_into`].
pub fn bulk_copy_records<'r, S, T, I>(
    sink: &S,
    records: I,
    options: &BulkCopyOptions,
) -> Result<BulkCopyReport, Error>
where
    S: Sink,
    T: Record,
    I: IntoIterator<Item = &'r T>,
{
    bulk_copy_records_into(sink, T::record_name(), records, options)
}
