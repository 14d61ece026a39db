//! Error classification shared by every module

use std::fmt;

/// The kind of failure behind any error returned by this crate
///
/// Each module keeps its own error enum; `kind()` on those enums maps them
/// onto this common set so RC callers can branch without matching every type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A section, provider or command name is absent
    NotFound,
    /// Duplicate create or register
    AlreadyExists,
    /// Missing or malformed input
    InvalidArgument,
    /// The persisted config file could not be parsed
    Parse,
    /// Filesystem failure
    Io,
    /// A value could not be revealed
    Decode,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::Parse => "parse_error",
            ErrorKind::Io => "io_error",
            ErrorKind::Decode => "decode_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
