//! Synthesized structural equality and deep copy.
//!
//! Both operations are driven entirely by the metadata registered for the
//! record's type:
//!
//! - **Equality** compares comparable fields present on `self`. Lists compare
//!   by length, then elementwise. A record value whose type is synthesized
//!   delegates to its own equality, an unsynthesized record compares its whole
//!   field table, and plain values use `PartialEq` on the exact type. Only the
//!   left-hand value decides whether delegation happens.
//! - **Copy** validates copyable fields against copy params, copies each mapped
//!   field in position order (synthesized records deep, everything else by
//!   shallow reuse, lists into a fresh list) and rebuilds through
//!   [`Record::reconstruct`].
//!
//! Nested graphs recurse without cycle detection; a cyclic graph overflows the stack.

use core::any::{Any, TypeId};

use crate::args::CopyArgs;
use crate::error::{RecordError, RecordResult};
use crate::metadata::{FieldFacet, MetadataStore};
use crate::record::Record;
use crate::validate;
use crate::value::{FieldRef, Value};

type EqualFn = fn(&MetadataStore, &dyn Record, &dyn Any) -> bool;
type CopyFn = fn(&MetadataStore, &dyn Record) -> RecordResult<Box<dyn Record>>;

/// Operations installed on a record type by the synthesizer.
#[derive(Debug, Copy, Clone)]
pub struct SynthesizedOps {
    is_equal: EqualFn,
    copy: CopyFn,
}

impl SynthesizedOps {
    pub(crate) fn of<T: Record>() -> Self {
        Self {
            is_equal: erased_is_equal::<T>,
            copy: erased_copy::<T>,
        }
    }
}

fn erased_is_equal<T: Record>(store: &MetadataStore, this: &dyn Record, other: &dyn Any) -> bool {
    this.as_any()
        .downcast_ref::<T>()
        .is_some_and(|this| is_equal(store, this, other))
}

fn erased_copy<T: Record>(
    store: &MetadataStore,
    this: &dyn Record,
) -> RecordResult<Box<dyn Record>> {
    let this = this
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| RecordError::not_synthesized(this.type_name()))?;

    Ok(Box::new(copy(store, this)?))
}

fn is_equal<T: Record>(store: &MetadataStore, this: &T, other: &dyn Any) -> bool {
    let Some(other) = other.downcast_ref::<T>() else {
        return false;
    };

    let comparable = store.fields_with(TypeId::of::<T>(), FieldFacet::Comparable);
    tracing::trace!(
        record = core::any::type_name::<T>(),
        fields = comparable.len(),
        "comparing records"
    );

    for name in this.field_names() {
        if !comparable.contains(*name) {
            continue;
        }
        let Some(left) = this.field(name) else {
            continue;
        };
        let Some(right) = other.field(name) else {
            return false;
        };
        if !values_equal(store, &left, &right) {
            return false;
        }
    }

    true
}

fn values_equal(store: &MetadataStore, left: &FieldRef<'_>, right: &FieldRef<'_>) -> bool {
    match left {
        FieldRef::List(left) => match right {
            FieldRef::List(right) => {
                left.len() == right.len()
                    && left
                        .iter()
                        .zip(right)
                        .all(|(left, right)| values_equal(store, left, right))
            }
            _ => false,
        },
        FieldRef::Record(record) => match store.ops_of(record.as_any().type_id()) {
            Some(ops) => right
                .as_any()
                .is_some_and(|other| (ops.is_equal)(store, *record, other)),
            None => match right {
                FieldRef::Record(other) => host_equal(store, *record, *other),
                _ => false,
            },
        },
        FieldRef::Opaque(value) => right.as_any().is_some_and(|other| value.eq_opaque(other)),
    }
}

/// Equality for records whose type was never synthesized.
///
/// Same concrete type and every field in the table equal, so it agrees with the
/// `Clone` used to copy such records.
fn host_equal(store: &MetadataStore, this: &dyn Record, other: &dyn Record) -> bool {
    if this.as_any().type_id() != other.as_any().type_id() {
        return false;
    }

    this.field_names()
        .iter()
        .all(|name| match (this.field(name), other.field(name)) {
            (Some(left), Some(right)) => values_equal(store, &left, &right),
            (None, None) => true,
            _ => false,
        })
}

fn copy<T: Record>(store: &MetadataStore, this: &T) -> RecordResult<T> {
    let type_id = TypeId::of::<T>();
    let type_name = core::any::type_name::<T>();

    let copyable_set = store.fields_with(type_id, FieldFacet::Copyable);
    let copyable: Vec<&str> = this
        .field_names()
        .iter()
        .copied()
        .filter(|name| copyable_set.contains(*name) && this.field(name).is_some())
        .collect();

    let mut params = store.copy_params_of(type_id);
    params.sort_by_key(|param| param.position);

    if let Err(err) = validate::verify(type_name, &copyable, &params) {
        tracing::debug!(record = type_name, error = %err, "copy annotations rejected");
        return Err(err.into());
    }

    tracing::trace!(record = type_name, args = params.len(), "copying record");

    let mut values = Vec::with_capacity(params.len());
    for (index, param) in params.iter().enumerate() {
        let field = this
            .field(&param.field)
            .ok_or_else(|| RecordError::argument(type_name, index, "field absent"))?;
        values.push(copy_value(store, &field)?);
    }

    T::reconstruct(CopyArgs::new(type_name, values))
}

fn copy_value(store: &MetadataStore, value: &FieldRef<'_>) -> RecordResult<Value> {
    match value {
        FieldRef::List(items) => items
            .iter()
            .map(|item| copy_value(store, item))
            .collect::<RecordResult<Vec<_>>>()
            .map(Value::List),
        FieldRef::Record(record) => match store.ops_of(record.as_any().type_id()) {
            Some(ops) => (ops.copy)(store, *record).map(Value::Record),
            None => Ok(Value::Record(record.clone_record())),
        },
        FieldRef::Opaque(value) => Ok(Value::Opaque(value.clone_opaque())),
    }
}

impl MetadataStore {
    /// Synthesized equality of `this` against `other`.
    ///
    /// When `this`'s type was never synthesized, every field in its table is
    /// compared instead.
    pub fn is_equal(&self, this: &dyn Record, other: &dyn Any) -> bool {
        match self.ops_of(this.as_any().type_id()) {
            Some(ops) => (ops.is_equal)(self, this, other),
            None => this
                .same_type(other)
                .is_some_and(|other| host_equal(self, this, other)),
        }
    }

    /// Synthesized deep copy of `this`.
    pub fn copy<T: Record>(&self, this: &T) -> RecordResult<T> {
        if !self.is_record_type_id(TypeId::of::<T>()) {
            return Err(RecordError::not_synthesized(core::any::type_name::<T>()));
        }
        copy(self, this)
    }
}

/// Per-instance synthesized operations, backed by [`MetadataStore::global`].
pub trait RecordExt {
    /// Structural equality; `false` whenever `other` is not exactly `Self`.
    fn is_equal(&self, other: &dyn Any) -> bool;

    /// Deep copy through the type's reconstruction path.
    fn copy(&self) -> RecordResult<Self>
    where
        Self: Sized;
}

impl<T: Record> RecordExt for T {
    fn is_equal(&self, other: &dyn Any) -> bool {
        MetadataStore::global().is_equal(self, other)
    }

    fn copy(&self) -> RecordResult<Self> {
        MetadataStore::global().copy(self)
    }
}
