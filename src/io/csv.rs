//! CSV text from records.
//!
//! This is a fixed, compatibility-driven dialect, not RFC 4180:
//! - nulls are written as `""`
//! - text is always quoted, and embedded `"` are escaped as `\"` (no doubling)
//! - any other value whose display form parses as an `f64` is written bare
//! - everything else is quoted without escaping
//!
//! Rows are written in attribute order with a terminator after every record,
//! including the last. No header unless [`CsvOptions::has_headers`] is set.
//!
//! The `csv` writer runs with [`QuoteStyle::Never`] so that the quoting above
//! is the only quoting applied; it still handles delimiters, terminators and
//! buffering.

use crate::cache::DescriptorCache;
use crate::error::{Error, FormatError, MappingError};
use crate::record::Record;
use crate::value::Value;
use anyhow::Context;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::Path;

/// Line terminator written after each record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineTerminator {
    #[default]
    Lf,
    CrLf,
}

impl LineTerminator {
    #[must_use]
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            LineTerminator::Lf => b"\n",
            LineTerminator::CrLf => b"\r\n",
        }
    }
}

impl From<LineTerminator> for Terminator {
    fn from(t: LineTerminator) -> Self {
        match t {
            LineTerminator::Lf => Terminator::Any(b'\n'),
            LineTerminator::CrLf => Terminator::CRLF,
        }
    }
}

/// Options for the CSV formatter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub terminator: LineTerminator,
    /// Write one line of attribute names before the records.
    pub has_headers: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            terminator: LineTerminator::Lf,
            has_headers: false,
        }
    }
}

impl CsvOptions {
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub const fn with_terminator(mut self, terminator: LineTerminator) -> Self {
        self.terminator = terminator;
        self
    }

    #[must_use]
    pub const fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }
}

/// Format one cell.
///
/// ```
/// use rowcast::Value;
/// use rowcast::io::csv::format_value;
///
/// assert_eq!(format_value(&Value::Null), r#""""#);
/// assert_eq!(format_value(&Value::from(r#"say "hi""#)), r#""say \"hi\"""#);
/// assert_eq!(format_value(&Value::I32(7)), "7");
/// assert_eq!(format_value(&Value::Bool(true)), r#""true""#);
/// ```
#[must_use]
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "\"\"".to_string(),
        Value::Text(s) => format!("\"{}\"", s.replace('"', "\\\"")),
        other => {
            let s = other.to_string();
            if s.parse::<f64>().is_ok() {
                s
            } else {
                format!("\"{s}\"")
            }
        }
    }
}

/// Write records as CSV into `writer`, returning the number of records.
///
/// # Errors
/// [`Error::Mapping`] when an attribute read fails; [`Error::Format`] or
/// [`Error::Io`] when the writer fails.
pub fn write_csv_to<'r, T, I, W>(
    cache: &DescriptorCache,
    writer: W,
    records: I,
    options: &CsvOptions,
) -> Result<usize, Error>
where
    T: Record,
    I: IntoIterator<Item = &'r T>,
    W: Write,
{
    let shape = cache.shape::<T>()?;
    if shape.is_empty() {
        return write_empty_lines(writer, records.into_iter().count(), options);
    }
    let mut wtr = WriterBuilder::new()
        .delimiter(options.delimiter)
        .terminator(options.terminator.into())
        .quote_style(QuoteStyle::Never)
        .has_headers(false)
        .from_writer(writer);

    if options.has_headers {
        wtr.write_record(
            shape
                .descriptors()
                .iter()
                .map(|d| format_value(&Value::Text(d.name.clone()))),
        )
        .map_err(FormatError::from)?;
    }

    let mut written = 0usize;
    for (index, record) in records.into_iter().enumerate() {
        let mut fields = Vec::with_capacity(shape.len());
        for attr in shape.attributes() {
            let value = attr.read(record).map_err(|message| {
                MappingError::attribute_read(shape.record_name(), attr.name(), index, message)
            })?;
            fields.push(format_value(&value));
        }
        wtr.write_record(&fields).map_err(FormatError::from)?;
        written += 1;
    }
    wtr.flush()?;
    Ok(written)
}

/// A record without attributes is an empty line; the csv writer would emit
/// `""` for it instead.
fn write_empty_lines<W: Write>(
    mut writer: W,
    records: usize,
    options: &CsvOptions,
) -> Result<usize, Error> {
    let lines = records + usize::from(options.has_headers);
    for _ in 0..lines {
        writer.write_all(options.terminator.as_bytes())?;
    }
    writer.flush()?;
    Ok(records)
}

/// Records as CSV text with [`CsvOptions`].
///
/// # Errors
/// See [`write_csv_to`].
pub fn to_csv_with<'r, T, I>(records: I, options: &CsvOptions) -> Result<String, Error>
where
    T: Record,
    I: IntoIterator<Item = &'r T>,
{
    let mut buf = Vec::new();
    write_csv_to(DescriptorCache::global(), &mut buf, records, options)?;
    String::from_utf8(buf).map_err(|e| Error::Io(std::io::Error::other(e)))
}

/// Records as CSV text: comma-separated, `\n`-terminated, no header.
///
/// # Errors
/// See [`write_csv_to`].
pub fn to_csv<'r, T, I>(records: I) -> Result<String, Error>
where
    T: Record,
    I: IntoIterator<Item = &'r T>,
{
    to_csv_with(records, &CsvOptions::default())
}

/// Write records to a CSV file, creating parent directories as needed.
///
/// # Returns
/// The number of records written.
///
/// # Errors
/// Returns an error if the file or directories cannot be created, or if any
/// record fails to read or write.
pub fn write_csv_file<'r, T, I>(
    path: impl AsRef<Path>,
    records: I,
    options: &CsvOptions,
) -> anyhow::Result<usize>
where
    T: Record,
    I: IntoIterator<Item = &'r T>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent).with_context(|| format!("mkdir -p {}", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_csv_to(DescriptorCache::global(), f, records, options)
        .with_context(|| format!("write CSV {}", path.display()))
}
