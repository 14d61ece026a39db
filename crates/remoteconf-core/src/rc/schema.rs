//! Declared input schemas for RC calls
//!
//! Each call lists the keys it reads and their shapes. Input is checked
//! against the schema before the handler runs, so a rejected call never
//! touches the store.

use crate::types::{Params, ParamsError, ValueShape};

use super::error::RcResult;

/// One declared input key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub key: &'static str,
    pub shape: ValueShape,
    pub required: bool,
}

impl ParamSpec {
    pub const fn required(key: &'static str, shape: ValueShape) -> Self {
        Self { key, shape, required: true }
    }

    pub const fn optional(key: &'static str, shape: ValueShape) -> Self {
        Self { key, shape, required: false }
    }
}

/// Check `params` against `schema`
///
/// Keys not named in the schema are ignored.
pub fn validate(schema: &[ParamSpec], params: &Params) -> RcResult<()> {
    for spec in schema {
        match params.get(spec.key) {
            None if spec.required => return Err(ParamsError::Missing(spec.key.to_string()).into()),
            None => {}
            Some(value) if value.shape() != spec.shape => {
                return Err(ParamsError::WrongShape {
                    key: spec.key.to_string(),
                    expected: spec.shape,
                    found: value.shape(),
                }
                .into());
            }
            Some(_) => {}
        }
    }
    Ok(())
}
