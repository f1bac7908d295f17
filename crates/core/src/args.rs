//! Positional reconstruction arguments handed to [`Record::reconstruct`].

use crate::error::{RecordError, RecordResult};
use crate::record::Record;
use crate::value::Value;

/// Copied field values in copy-parameter position order.
///
/// Each accessor consumes the next argument. Running out of arguments or asking
/// for the wrong shape fails with [`RecordError::Argument`], the same way a
/// constructor call with the wrong arguments would.
#[derive(Debug)]
pub struct CopyArgs {
    type_name: &'static str,
    values: std::vec::IntoIter<Value>,
    position: usize,
}

impl CopyArgs {
    pub fn new(type_name: &'static str, values: Vec<Value>) -> Self {
        Self {
            type_name,
            values: values.into_iter(),
            position: 0,
        }
    }

    /// Number of arguments not yet consumed.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    pub fn value(&mut self) -> RecordResult<Value> {
        let position = self.position;
        let value = self
            .values
            .next()
            .ok_or_else(|| RecordError::argument(self.type_name, position, "missing argument"))?;
        self.position += 1;
        Ok(value)
    }

    pub fn opaque<T: 'static>(&mut self) -> RecordResult<T> {
        let position = self.position;
        let value = self.value()?;
        let kind = value.kind();
        value.into_opaque().ok_or_else(|| {
            self.mismatch(position, core::any::type_name::<T>(), kind)
        })
    }

    pub fn record<R: Record>(&mut self) -> RecordResult<R> {
        let position = self.position;
        let value = self.value()?;
        let kind = value.kind();
        value.into_record().ok_or_else(|| {
            self.mismatch(position, core::any::type_name::<R>(), kind)
        })
    }

    pub fn records<R: Record>(&mut self) -> RecordResult<Vec<R>> {
        let position = self.position;
        self.list(position)?
            .into_iter()
            .map(|item| {
                let kind = item.kind();
                item.into_record()
                    .ok_or_else(|| self.mismatch(position, core::any::type_name::<R>(), kind))
            })
            .collect()
    }

    pub fn opaques<T: 'static>(&mut self) -> RecordResult<Vec<T>> {
        let position = self.position;
        self.list(position)?
            .into_iter()
            .map(|item| {
                let kind = item.kind();
                item.into_opaque()
                    .ok_or_else(|| self.mismatch(position, core::any::type_name::<T>(), kind))
            })
            .collect()
    }

    fn list(&mut self, position: usize) -> RecordResult<Vec<Value>> {
        let value = self.value()?;
        let kind = value.kind();
        value
            .into_list()
            .ok_or_else(|| self.mismatch(position, "list", kind))
    }

    fn mismatch(&self, position: usize, expected: &str, found: &str) -> RecordError {
        RecordError::argument(
            self.type_name,
            position,
            format!("expected {expected}, found {found}"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_are_consumed_in_order() {
        let mut args = CopyArgs::new(
            "Pair",
            vec![
                Value::Opaque(Box::new(1_i32)),
                Value::Opaque(Box::new("two".to_string())),
            ],
        );

        assert_eq!(args.remaining(), 2);
        assert_eq!(args.opaque::<i32>().unwrap(), 1);
        assert_eq!(args.opaque::<String>().unwrap(), "two");
        assert_eq!(args.remaining(), 0);
    }

    #[test]
    fn missing_argument_reports_position() {
        let mut args = CopyArgs::new("Pair", vec![Value::Opaque(Box::new(1_i32))]);
        args.opaque::<i32>().unwrap();

        let err = args.opaque::<i32>().unwrap_err();
        assert_eq!(
            err,
            RecordError::Argument {
                type_name: "Pair",
                position: 1,
                reason: "missing argument".to_string(),
            }
        );
    }

    #[test]
    fn wrong_shape_is_an_argument_error() {
        let mut args = CopyArgs::new("Tags", vec![Value::Opaque(Box::new(3_u8))]);

        match args.opaques::<u8>().unwrap_err() {
            RecordError::Argument {
                position, reason, ..
            } => {
                assert_eq!(position, 0);
                assert!(reason.contains("expected list"));
            }
            other => panic!("expected argument error, got {other:?}"),
        }
    }

    #[test]
    fn opaque_lists_unpack_elementwise() {
        let mut args = CopyArgs::new(
            "Tags",
            vec![Value::List(vec![
                Value::Opaque(Box::new('a')),
                Value::Opaque(Box::new('b')),
            ])],
        );

        assert_eq!(args.opaques::<char>().unwrap(), vec!['a', 'b']);
    }
}
