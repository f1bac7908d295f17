//! `recordkit-core` — declarative structural equality and deep copy for record types.
//!
//! A record type describes its fields through [`Record`], then declares which
//! fields are comparable, which are copyable, and which reconstruction argument
//! each copyable field feeds. Declaring the type itself installs the
//! synthesized `is_equal`/`copy` operations (see [`RecordExt`]).
//!
//! ```ignore
//! declare::<Optional<i64>>()
//!     .entity_field("value")
//!     .copy_param("value", 0)
//!     .finish();
//!
//! let a = Optional::of(25);
//! assert!(a.is_equal(&a.copy()?));
//! ```

pub mod annotate;
pub mod args;
pub mod error;
pub mod metadata;
pub mod record;
pub mod synth;
pub mod validate;
pub mod value;

pub use annotate::{
    Declaration, declare, declare_comparable, declare_copy_param, declare_copyable,
    declare_entity_field, declare_record_type,
};
pub use args::CopyArgs;
pub use error::{MismatchError, RecordError, RecordResult};
pub use metadata::{CopyParam, FieldFacet, MetadataStore, TypeMetadata};
pub use record::{Record, RecordBase};
pub use synth::{RecordExt, SynthesizedOps};
pub use value::{FieldRef, OpaqueValue, Value};
