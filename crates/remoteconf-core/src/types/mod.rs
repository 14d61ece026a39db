//! Core types shared across the store, the registry and the RC layer

mod error_kind;
mod params;

pub use error_kind::ErrorKind;
pub use params::{Params, ParamsError, ParamsResult, Value, ValueShape};
