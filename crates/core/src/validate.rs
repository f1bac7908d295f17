//! Consistency check between copyable fields and copy parameters.

use crate::error::MismatchError;
use crate::metadata::CopyParam;

/// Check that `copyable` and the fields named by `params` are the same set.
///
/// Copyable fields are checked first, in the order given, then params in the
/// order given; the first violation is reported.
pub fn verify(
    type_name: &'static str,
    copyable: &[&str],
    params: &[CopyParam],
) -> Result<(), MismatchError> {
    if let Some(field) = copyable
        .iter()
        .find(|field| !params.iter().any(|param| param.field == **field))
    {
        return Err(MismatchError::FieldWithoutParam {
            type_name,
            field: (*field).to_string(),
        });
    }

    if let Some(param) = params
        .iter()
        .find(|param| !copyable.contains(&param.field.as_str()))
    {
        return Err(MismatchError::ParamWithoutField {
            type_name,
            field: param.field.clone(),
        });
    }

    Ok(())
}
