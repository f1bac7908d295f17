//! Record error model.

use thiserror::Error;

/// Result type used across the record layer.
pub type RecordResult<T> = Result<T, RecordError>;

/// Copyable fields and copy parameters disagree for a record type.
///
/// Raised by the consistency validator on every `copy()` call. This is a
/// programmer error: the fix is to correct the declarations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MismatchError {
    /// A field is marked copyable but no copy parameter maps to it.
    #[error("{type_name}: field `{field}` has no matching constructor argument annotation")]
    FieldWithoutParam { type_name: &'static str, field: String },

    /// A copy parameter maps to a field that is not marked copyable.
    #[error("{type_name}: constructor argument `{field}` has no matching property annotation")]
    ParamWithoutField { type_name: &'static str, field: String },
}

impl MismatchError {
    /// Name of the offending field or copy parameter.
    pub fn field(&self) -> &str {
        match self {
            Self::FieldWithoutParam { field, .. } | Self::ParamWithoutField { field, .. } => field,
        }
    }
}

/// Record-level error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Copy annotations are inconsistent.
    #[error("mismatched annotations: {0}")]
    Mismatch(#[from] MismatchError),

    /// `copy()` was called on a type that was never passed to `declare_record_type`.
    #[error("{type_name} is not a synthesized record type")]
    NotSynthesized { type_name: &'static str },

    /// Reconstruction could not bind an argument (missing or wrong type).
    #[error("{type_name}: argument {position}: {reason}")]
    Argument {
        type_name: &'static str,
        position: usize,
        reason: String,
    },
}

impl RecordError {
    pub fn argument(type_name: &'static str, position: usize, reason: impl Into<String>) -> Self {
        Self::Argument {
            type_name,
            position,
            reason: reason.into(),
        }
    }

    pub fn not_synthesized(type_name: &'static str) -> Self {
        Self::NotSynthesized { type_name }
    }
}
