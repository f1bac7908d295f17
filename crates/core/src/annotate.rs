//! Declarations: field annotators, copy-parameter annotator, type synthesizer.
//!
//! No validation happens here. Declarations may run in any order; the copy
//! annotations are cross-checked each time `copy()` runs.

use core::marker::PhantomData;

use crate::metadata::{CopyParam, FieldFacet, MetadataStore};
use crate::record::Record;

impl MetadataStore {
    pub fn mark_comparable<T: Record>(&self, field: impl Into<String>) {
        self.set_flag::<T>(field, FieldFacet::Comparable);
    }

    pub fn mark_copyable<T: Record>(&self, field: impl Into<String>) {
        self.set_flag::<T>(field, FieldFacet::Copyable);
    }

    /// Comparable and copyable in one call.
    pub fn mark_entity_field<T: Record>(&self, field: impl Into<String>) {
        let field = field.into();
        self.mark_comparable::<T>(field.clone());
        self.mark_copyable::<T>(field);
    }

    /// Bind `field` to reconstruction argument `position`.
    ///
    /// Any name is accepted, including ones never marked copyable.
    pub fn mark_copy_param<T: Record>(&self, field: impl Into<String>, position: usize) {
        self.append_copy_param::<T>(CopyParam::new(field, position));
    }

    /// Start a chained declaration for `T` against this store.
    pub fn declare<T: Record>(&self) -> Declaration<'_, T> {
        Declaration {
            store: self,
            _record: PhantomData,
        }
    }
}

/// Chained declaration of a record type's annotations.
///
/// ```ignore
/// store
///     .declare::<Optional<i64>>()
///     .entity_field("value")
///     .copy_param("value", 0)
///     .finish();
/// ```
#[must_use = "call `finish` to synthesize the record type"]
pub struct Declaration<'s, T> {
    store: &'s MetadataStore,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> Declaration<'_, T> {
    pub fn comparable(self, field: impl Into<String>) -> Self {
        self.store.mark_comparable::<T>(field);
        self
    }

    pub fn copyable(self, field: impl Into<String>) -> Self {
        self.store.mark_copyable::<T>(field);
        self
    }

    pub fn entity_field(self, field: impl Into<String>) -> Self {
        self.store.mark_entity_field::<T>(field);
        self
    }

    pub fn copy_param(self, field: impl Into<String>, position: usize) -> Self {
        self.store.mark_copy_param::<T>(field, position);
        self
    }

    /// Apply the type synthesizer.
    pub fn finish(self) {
        self.store.mark_record_type::<T>();
    }
}

/// Mark `T` as synthesized in the global store, installing `is_equal`/`copy`.
pub fn declare_record_type<T: Record>() {
    MetadataStore::global().mark_record_type::<T>();
}

pub fn declare_comparable<T: Record>(field: impl Into<String>) {
    MetadataStore::global().mark_comparable::<T>(field);
}

pub fn declare_copyable<T: Record>(field: impl Into<String>) {
    MetadataStore::global().mark_copyable::<T>(field);
}

pub fn declare_entity_field<T: Record>(field: impl Into<String>) {
    MetadataStore::global().mark_entity_field::<T>(field);
}

pub fn declare_copy_param<T: Record>(field: impl Into<String>, position: usize) {
    MetadataStore::global().mark_copy_param::<T>(field, position);
}

/// Chained declaration against the global store.
pub fn declare<T: Record>() -> Declaration<'static, T> {
    MetadataStore::global().declare::<T>()
}
