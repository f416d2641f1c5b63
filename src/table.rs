//! Column-typed tables.
//!
//! A [`Table`] is a transient snapshot of a record sequence: ordered column
//! descriptors plus rows whose cells are aligned to the columns by index.
//! Rows can only be added through [`Table::push_row`], which enforces the
//! shape invariant (one cell per column, each cell null or of the column's
//! type).

use crate::error::MappingError;
use crate::record::AttributeDescriptor;
use crate::value::{ScalarType, Value};
use serde::{Deserialize, Serialize};

/// A column's name and storage type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub value_type: ScalarType,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, value_type: ScalarType) -> Self {
        Self {
            name: name.into(),
            value_type,
        }
    }
}

impl From<&AttributeDescriptor> for ColumnDescriptor {
    fn from(attr: &AttributeDescriptor) -> Self {
        Self::new(attr.name.clone(), attr.value_type)
    }
}

/// Cells of one row, aligned to the table's columns by index.
pub type Row = Vec<Value>;

/// Ordered columns plus rows.
///
/// Deserialized tables are rebuilt through [`Table::push_row`], so a document
/// with short or mistyped rows fails to decode.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct Table {
    columns: Vec<ColumnDescriptor>,
    rows: Vec<Row>,
}

/// Wire form of a [`Table`] before validation.
#[derive(Deserialize)]
struct RawTable {
    columns: Vec<ColumnDescriptor>,
    rows: Vec<Row>,
}

impl TryFrom<RawTable> for Table {
    type Error = MappingError;

    fn try_from(raw: RawTable) -> Result<Self, MappingError> {
        let mut table = Table::with_capacity(raw.columns, raw.rows.len());
        for row in raw.rows {
            table.push_row(row)?;
        }
        Ok(table)
    }
}

impl Table {
    #[must_use]
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// A table with room for `rows` rows.
    #[must_use]
    pub fn with_capacity(columns: Vec<ColumnDescriptor>, rows: usize) -> Self {
        Self {
            columns,
            rows: Vec::with_capacity(rows),
        }
    }

    /// Append a row after checking it against the columns.
    ///
    /// # Errors
    /// [`MappingError::ColumnCount`] if the row has the wrong number of cells,
    /// [`MappingError::CellType`] if a non-null cell has the wrong type.
    pub fn push_row(&mut self, row: Row) -> Result<(), MappingError> {
        if row.len() != self.columns.len() {
            return Err(MappingError::ColumnCount {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        for (cell, column) in row.iter().zip(&self.columns) {
            if let Some(found) = cell.scalar_type()
                && found != column.value_type
            {
                return Err(MappingError::CellType {
                    column: column.name.clone(),
                    expected: column.value_type,
                    found,
                });
            }
        }
        self.rows.push(row);
        Ok(())
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Position of the column called `name`.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&Value> {
        self.rows.get(row)?.get(column)
    }

    /// All cells of the column called `name`, in row order.
    pub fn column_values<'a>(
        &'a self,
        name: &str,
    ) -> Option<impl Iterator<Item = &'a Value> + use<'a>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().filter_map(move |row| row.get(idx)))
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}
