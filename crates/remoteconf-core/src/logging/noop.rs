//! Silent logger

use super::traits::Logger;

/// Discards every message
///
/// Injected into `ConfigStore` and `Dispatcher` by tests and by embedders
/// that do not install a `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl NoOpLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for NoOpLogger {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
