//! Field values as seen by the synthesized operations.
//!
//! A field is either a record (recursed into when its type is synthesized), an
//! ordered list (handled elementwise), or an opaque value (compared with
//! `PartialEq`, copied with `Clone`).

use core::any::Any;
use core::fmt::Debug;

use crate::record::Record;

/// Any plain value that can sit in a record field.
///
/// Blanket-implemented for every `PartialEq + Clone + Debug + 'static` type, so
/// strings, numbers, enums and `Option`s work without ceremony.
pub trait OpaqueValue: Any + Debug {
    /// Host equality: `PartialEq` against a value of the exact same type.
    fn eq_opaque(&self, other: &dyn Any) -> bool;

    /// Shallow reuse of the value.
    fn clone_opaque(&self) -> Box<dyn OpaqueValue>;

    fn opaque_any(&self) -> &dyn Any;

    fn into_opaque_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T> OpaqueValue for T
where
    T: PartialEq + Clone + Debug + 'static,
{
    fn eq_opaque(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<T>().is_some_and(|other| self == other)
    }

    fn clone_opaque(&self) -> Box<dyn OpaqueValue> {
        Box::new(self.clone())
    }

    fn opaque_any(&self) -> &dyn Any {
        self
    }

    fn into_opaque_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Borrowed view of a single field, produced by [`Record::field`].
#[derive(Debug, Clone)]
pub enum FieldRef<'a> {
    Record(&'a dyn Record),
    List(Vec<FieldRef<'a>>),
    Opaque(&'a dyn OpaqueValue),
}

impl<'a> FieldRef<'a> {
    pub fn opaque<T: OpaqueValue>(value: &'a T) -> Self {
        Self::Opaque(value)
    }

    pub fn record<R: Record>(value: &'a R) -> Self {
        Self::Record(value)
    }

    /// A list whose elements are records.
    pub fn records<R: Record>(values: &'a [R]) -> Self {
        Self::List(values.iter().map(|value| Self::Record(value)).collect())
    }

    /// A list whose elements are plain values.
    pub fn opaques<T: OpaqueValue>(values: &'a [T]) -> Self {
        Self::List(values.iter().map(|value| Self::Opaque(value)).collect())
    }

    /// The underlying value for exact-type tests. Lists have none.
    pub fn as_any(&self) -> Option<&'a dyn Any> {
        match *self {
            Self::Record(record) => Some(record.as_any()),
            Self::Opaque(value) => Some(value.opaque_any()),
            Self::List(_) => None,
        }
    }
}

/// Owned field value produced by `copy()` and handed to reconstruction.
#[derive(Debug)]
pub enum Value {
    Record(Box<dyn Record>),
    List(Vec<Value>),
    Opaque(Box<dyn OpaqueValue>),
}

impl Value {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Record(_) => "record",
            Self::List(_) => "list",
            Self::Opaque(_) => "value",
        }
    }

    pub fn into_opaque<T: 'static>(self) -> Option<T> {
        match self {
            Self::Opaque(value) => value.into_opaque_any().downcast::<T>().ok().map(|v| *v),
            _ => None,
        }
    }

    pub fn into_record<R: Record>(self) -> Option<R> {
        match self {
            Self::Record(record) => record.into_any().downcast::<R>().ok().map(|r| *r),
            _ => None,
        }
    }

    pub fn into_list(self) -> Option<Vec<Self>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}
