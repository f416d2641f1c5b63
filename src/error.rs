//! Error types for conversion, formatting and bulk transfer.
//!
//! Every failure is returned to the caller. Nothing here is retried, logged
//! and dropped, or replaced by a default value.

use crate::sink::SinkError;
use crate::value::ScalarType;
use std::time::Duration;
use thiserror::Error;

/// Top-level error returned by the crate's fallible operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A record could not be read, or a table could not be matched to its destination.
    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// The sink refused the connection or the write, or the write timed out.
    #[error("Transfer error: {0}")]
    Transfer(#[from] TransferError),

    /// Malformed input or output for one of the codecs.
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// IO error while writing formatted output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures turning records into tables, or tables into destination columns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// An attribute reader failed for one record. The whole conversion is aborted.
    #[error("cannot read attribute {attribute} of {record_type} (record #{index}): {message}")]
    AttributeRead {
        record_type: String,
        attribute: String,
        index: usize,
        message: String,
    },

    /// A `Record` implementation lists the same attribute name twice.
    #[error("{record_type} exposes attribute {attribute} more than once")]
    DuplicateAttribute {
        record_type: String,
        attribute: String,
    },

    /// A row does not have one cell per column.
    #[error("row has {found} cells but the table has {expected} columns")]
    ColumnCount { expected: usize, found: usize },

    /// A cell does not agree with its column type.
    #[error("column {column} expects {expected:?} but the cell holds {found:?}")]
    CellType {
        column: String,
        expected: ScalarType,
        found: ScalarType,
    },

    /// The sink has no table with this name.
    #[error("destination table {table} does not exist")]
    DestinationNotFound { table: String },

    /// The destination table has no column with the same name as a source column.
    #[error("destination table {table} has no column named {column}")]
    MissingDestinationColumn { table: String, column: String },
}

impl MappingError {
    /// Build an [`MappingError::AttributeRead`].
    pub fn attribute_read(
        record_type: impl Into<String>,
        attribute: impl Into<String>,
        index: usize,
        message: impl Into<String>,
    ) -> Self {
        MappingError::AttributeRead {
            record_type: record_type.into(),
            attribute: attribute.into(),
            index,
            message: message.into(),
        }
    }
}

/// Failures reported by the sink while a bulk transfer is running.
#[derive(Error, Debug, Clone)]
pub enum TransferError {
    /// The sink refused to open a connection.
    #[error("cannot open sink connection: {0}")]
    Connect(#[source] SinkError),

    /// The sink could not describe the destination table.
    #[error("cannot read columns of destination {table}: {source}")]
    Schema {
        table: String,
        #[source]
        source: SinkError,
    },

    /// The sink rejected the rows.
    #[error("bulk write into {table} failed: {source}")]
    Write {
        table: String,
        #[source]
        source: SinkError,
    },

    /// The bulk write ran past its timeout.
    #[error("bulk write into {table} exceeded the {}s timeout", .timeout.as_secs())]
    Timeout {
        table: String,
        timeout: Duration,
        #[source]
        source: SinkError,
    },

    /// Closing the connection failed after the rows were written.
    #[error("cannot close sink connection: {0}")]
    Close(#[source] SinkError),
}

/// Malformed data for one of the codecs.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("binary codec: {0}")]
    Binary(String),

    #[error("base64: {0}")]
    Base64(String),

    #[error("XML codec: {0}")]
    Xml(String),

    #[error("JSON codec: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "io-csv")]
    #[error("CSV writer: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for the crate's operations.
pub type Result<T> = std::result::Result<T, Error>;
