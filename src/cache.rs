//! Memoized record shapes, keyed by type.
//!
//! A [`RecordShape<T>`] is the ordered attribute list of a [`Record`] type
//! together with the column descriptors derived from it. Building it calls
//! [`Record::attributes`] once; afterwards every conversion of `T` reuses the
//! cached shape.
//!
//! The cache stores shapes type-erased (`Arc<dyn Any + Send + Sync>`) under
//! their [`TypeId`] and downcasts on lookup. Entries are inserted lazily and
//! never evicted. When two threads describe the same type for the first time,
//! both build a shape outside the lock; the first insert wins and both
//! callers get that entry back.

use crate::error::MappingError;
use crate::record::{Attribute, AttributeDescriptor, Record};
use crate::table::{ColumnDescriptor, Row};
use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::trace;

type ErasedShape = Arc<dyn Any + Send + Sync>;

/// The cached description of a record type.
pub struct RecordShape<T> {
    record_name: &'static str,
    attributes: Vec<Attribute<T>>,
    descriptors: Vec<AttributeDescriptor>,
}

impl<T: Record> RecordShape<T> {
    fn build() -> Result<Self, MappingError> {
        let attributes = T::attributes();
        let mut seen = HashSet::with_capacity(attributes.len());
        for attr in &attributes {
            if !seen.insert(attr.name()) {
                return Err(MappingError::DuplicateAttribute {
                    record_type: T::record_name().to_string(),
                    attribute: attr.name().to_string(),
                });
            }
        }
        let descriptors = attributes.iter().map(|a| a.descriptor().clone()).collect();
        Ok(Self {
            record_name: T::record_name(),
            attributes,
            descriptors,
        })
    }

    /// Read every attribute of `record`, in column order.
    ///
    /// `index` is the record's position in its input sequence and only
    /// appears in the error.
    ///
    /// # Errors
    /// Returns [`MappingError::AttributeRead`] for the first attribute whose
    /// reader fails.
    pub fn read_row(&self, record: &T, index: usize) -> Result<Row, MappingError> {
        self.attributes
            .iter()
            .map(|attr| {
                attr.read(record).map_err(|message| {
                    MappingError::attribute_read(self.record_name, attr.name(), index, message)
                })
            })
            .collect()
    }
}

impl<T> RecordShape<T> {
    #[must_use]
    pub fn record_name(&self) -> &'static str {
        self.record_name
    }

    #[must_use]
    pub fn attributes(&self) -> &[Attribute<T>] {
        &self.attributes
    }

    #[must_use]
    pub fn descriptors(&self) -> &[AttributeDescriptor] {
        &self.descriptors
    }

    /// One column per attribute, nullable wrapper already stripped.
    #[must_use]
    pub fn columns(&self) -> Vec<ColumnDescriptor> {
        self.descriptors.iter().map(ColumnDescriptor::from).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl<T> fmt::Debug for RecordShape<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordShape")
            .field("record_name", &self.record_name)
            .field("descriptors", &self.descriptors)
            .finish_non_exhaustive()
    }
}

/// Thread-safe, insert-only map from record type to its [`RecordShape`].
#[derive(Default)]
pub struct DescriptorCache {
    shapes: RwLock<HashMap<TypeId, ErasedShape>>,
}

impl DescriptorCache {
    /// An empty cache, independent of [`DescriptorCache::global`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache used by the crate-level helpers.
    pub fn global() -> &'static DescriptorCache {
        static GLOBAL: OnceLock<DescriptorCache> = OnceLock::new();
        GLOBAL.get_or_init(DescriptorCache::new)
    }

    /// Shape of `T`, computed on first use.
    ///
    /// # Errors
    /// Returns [`MappingError::DuplicateAttribute`] when `T` lists an
    /// attribute name twice. Failed shapes are not cached.
    pub fn shape<T: Record>(&self) -> Result<Arc<RecordShape<T>>, MappingError> {
        if let Some(shape) = self.lookup::<T>() {
            return Ok(shape);
        }

        let built = Arc::new(RecordShape::<T>::build()?);
        trace!(
            record = built.record_name(),
            attributes = built.len(),
            "describing record type"
        );

        let erased = {
            let mut shapes = self.shapes.write().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(
                shapes
                    .entry(TypeId::of::<T>())
                    .or_insert_with(|| Arc::clone(&built) as ErasedShape),
            )
        };
        Ok(erased.downcast::<RecordShape<T>>().unwrap_or(built))
    }

    /// Attribute descriptors of `T` in declaration order.
    ///
    /// # Errors
    /// See [`DescriptorCache::shape`].
    pub fn describe<T: Record>(&self) -> Result<Vec<AttributeDescriptor>, MappingError> {
        Ok(self.shape::<T>()?.descriptors().to_vec())
    }

    /// Whether `T` has already been described.
    #[must_use]
    pub fn contains<T: Record>(&self) -> bool {
        self.shapes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&TypeId::of::<T>())
    }

    /// Number of described types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup<T: Record>(&self) -> Option<Arc<RecordShape<T>>> {
        let erased = Arc::clone(
            self.shapes
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .get(&TypeId::of::<T>())?,
        );
        erased.downcast::<RecordShape<T>>().ok()
    }
}

/// Attribute descriptors of `T`, from the process-wide cache.
///
/// # Errors
/// See [`DescriptorCache::shape`].
pub fn describe<T: Record>() -> Result<Vec<AttributeDescriptor>, MappingError> {
    DescriptorCache::global().describe::<T>()
}
