//! Records to [`Table`].
//!
//! Columns come from the record type, not from the data, so an empty input
//! still yields a table with the right columns. Rows keep input order. A
//! failing attribute read aborts the whole conversion; partial tables are
//! never returned.

use crate::cache::DescriptorCache;
use crate::error::MappingError;
use crate::record::Record;
use crate::table::{ColumnDescriptor, Table};
use rayon::prelude::*;

/// Builds tables using one [`DescriptorCache`].
#[derive(Clone, Copy)]
pub struct TableMapper<'c> {
    cache: &'c DescriptorCache,
}

impl Default for TableMapper<'static> {
    fn default() -> Self {
        Self::new(DescriptorCache::global())
    }
}

impl<'c> TableMapper<'c> {
    #[must_use]
    pub fn new(cache: &'c DescriptorCache) -> Self {
        Self { cache }
    }

    /// Columns a table of `T` would have.
    ///
    /// # Errors
    /// See [`DescriptorCache::shape`].
    pub fn columns<T: Record>(&self) -> Result<Vec<ColumnDescriptor>, MappingError> {
        Ok(self.cache.shape::<T>()?.columns())
    }

    /// Convert a sequence of records. The iterator is consumed exactly once.
    ///
    /// # Errors
    /// Returns [`MappingError::AttributeRead`] when any attribute of any
    /// record fails to read.
    pub fn to_table<'r, T, I>(&self, records: I) -> Result<Table, MappingError>
    where
        T: Record,
        I: IntoIterator<Item = &'r T>,
    {
        let shape = self.cache.shape::<T>()?;
        let records = records.into_iter();
        let mut table = Table::with_capacity(shape.columns(), records.size_hint().0);
        for (index, record) in records.enumerate() {
            table.push_row(shape.read_row(record, index)?)?;
        }
        Ok(table)
    }

    /// Convert a slice of records, reading rows on the rayon pool.
    ///
    /// Row order matches the slice regardless of scheduling.
    ///
    /// # Errors
    /// Same as [`TableMapper::to_table`].
    pub fn to_table_par<T: Record>(&self, records: &[T]) -> Result<Table, MappingError> {
        let shape = self.cache.shape::<T>()?;
        let rows = records
            .par_iter()
            .enumerate()
            .map(|(index, record)| shape.read_row(record, index))
            .collect::<Result<Vec<_>, _>>()?;
        let mut table = Table::with_capacity(shape.columns(), rows.len());
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }
}

/// [`TableMapper::to_table`] using the process-wide cache.
///
/// # Errors
/// See [`TableMapper::to_table`].
pub fn to_table<'r, T, I>(records: I) -> Result<Table, MappingError>
where
    T: Record,
    I: IntoIterator<Item = &'r T>,
{
    TableMapper::default().to_table(records)
}

/// [`TableMapper::to_table_par`] using the process-wide cache.
///
/// # Errors
/// See [`TableMapper::to_table`].
pub fn to_table_par<T: Record>(records: &[T]) -> Result<Table, MappingError> {
    TableMapper::default().to_table_par(records)
}
