//! Storage backend trait and config errors

use std::fmt;
use std::sync::Arc;

use super::section::Section;
use crate::types::ErrorKind;

/// Persistence backend for the config store
///
/// Implementations:
/// - `FileStorage`: TOML file on disk, replaced atomically on save
/// - `MemoryStorage`: In-memory for testing
pub trait SectionStorage: Send + Sync + fmt::Debug {
    /// Read every section. A backend with nothing stored yet returns an empty list.
    fn load(&self) -> ConfigResult<Vec<Section>>;

    /// Replace the stored sections with `sections`
    ///
    /// Readers of the backend must never observe a partially written state.
    fn save(&self, sections: &[Section]) -> ConfigResult<()>;

    /// Where the sections live, for log messages
    fn location(&self) -> String;
}

impl<T: SectionStorage + ?Sized> SectionStorage for Arc<T> {
    fn load(&self) -> ConfigResult<Vec<Section>> {
        (**self).load()
    }

    fn save(&self, sections: &[Section]) -> ConfigResult<()> {
        (**self).save(sections)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}

/// Errors that can occur during configuration operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Remote not found: {0}")]
    NotFound(String),

    #[error("Remote already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::NotFound(_) => ErrorKind::NotFound,
            ConfigError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            ConfigError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            ConfigError::Parse { .. } => ErrorKind::Parse,
            ConfigError::Io(_) => ErrorKind::Io,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
