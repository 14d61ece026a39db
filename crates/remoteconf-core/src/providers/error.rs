//! Provider registry error types

use thiserror::Error;

use crate::types::ErrorKind;

/// Errors from registering or looking up providers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No provider registered under this name
    #[error("Didn't find backend called {0:?}")]
    NotFound(String),

    /// A provider with this name is already registered
    #[error("Backend {0:?} is already registered")]
    AlreadyExists(String),
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::NotFound(_) => ErrorKind::NotFound,
            RegistryError::AlreadyExists(_) => ErrorKind::AlreadyExists,
        }
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
