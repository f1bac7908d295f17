//! Record capability: the field table a type exposes in place of reflection.

use core::any::Any;
use core::fmt::Debug;

use crate::args::CopyArgs;
use crate::error::RecordResult;
use crate::value::FieldRef;

/// Object-safe plumbing shared by every record.
///
/// Blanket-implemented for all `Record + Clone` types; never implement it by hand.
pub trait RecordBase: Any + Debug {
    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Shallow reuse, used when the record's type was never synthesized.
    fn clone_record(&self) -> Box<dyn Record>;

    /// `other` viewed as a record, when it is exactly this record's type.
    fn same_type<'a>(&self, other: &'a dyn Any) -> Option<&'a dyn Record>;

    fn type_name(&self) -> &'static str;
}

impl<T> RecordBase for T
where
    T: Record + Clone,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn clone_record(&self) -> Box<dyn Record> {
        Box::new(self.clone())
    }

    fn same_type<'a>(&self, other: &'a dyn Any) -> Option<&'a dyn Record> {
        other.downcast_ref::<T>().map(|other| other as &dyn Record)
    }

    fn type_name(&self) -> &'static str {
        core::any::type_name::<T>()
    }
}

/// A value-like aggregate of named fields eligible for synthesized equality/copy.
///
/// Implementing this trait only describes the shape of the type. Which fields
/// take part in equality and copy is decided by the declarations registered in
/// a [`MetadataStore`](crate::MetadataStore), and the operations only exist once
/// the type has been passed to `declare_record_type`.
///
/// ## Usage Pattern
///
/// ```ignore
/// #[derive(Debug, Clone)]
/// struct Point { x: i64, y: i64 }
///
/// impl Record for Point {
///     fn field_names(&self) -> &'static [&'static str] {
///         &["x", "y"]
///     }
///
///     fn field(&self, name: &str) -> Option<FieldRef<'_>> {
///         match name {
///             "x" => Some(FieldRef::opaque(&self.x)),
///             "y" => Some(FieldRef::opaque(&self.y)),
///             _ => None,
///         }
///     }
///
///     fn reconstruct(mut args: CopyArgs) -> RecordResult<Self> {
///         Ok(Self { x: args.opaque()?, y: args.opaque()? })
///     }
/// }
/// ```
pub trait Record: RecordBase {
    /// Declared field table, in declaration order.
    fn field_names(&self) -> &'static [&'static str];

    /// Borrowed view of `name` on this instance, `None` when absent.
    fn field(&self, name: &str) -> Option<FieldRef<'_>>;

    /// Ordinary constructor path used by `copy()`.
    ///
    /// Arguments arrive in copy-parameter position order.
    fn reconstruct(args: CopyArgs) -> RecordResult<Self>
    where
        Self: Sized;
}
