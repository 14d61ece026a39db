//! RC error type

use thiserror::Error;

use crate::config::ConfigError;
use crate::providers::RegistryError;
use crate::types::{ErrorKind, ParamsError};

/// Errors returned by RC calls
///
/// Store and registry errors pass through unchanged; use [`RcError::kind`]
/// to classify any of them.
#[derive(Error, Debug)]
pub enum RcError {
    /// No call registered under this path
    #[error("Couldn't find method {0:?}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl RcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RcError::NotFound(_) => ErrorKind::NotFound,
            RcError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            RcError::Params(e) => e.kind(),
            RcError::Config(e) => e.kind(),
            RcError::Registry(e) => e.kind(),
        }
    }
}

pub type RcResult<T> = Result<T, RcError>;
