//! `tracing`-backed logger and subscriber setup

use tracing_subscriber::EnvFilter;

use super::traits::Logger;

/// Environment variable holding the log filter (EnvFilter syntax)
pub const LOG_ENV: &str = "REMOTECONF_LOG";

/// A logger that forwards to `tracing` events
///
/// Every event carries a `component` field so output from the store and the
/// dispatcher can be told apart.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    component: String,
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl TracingLogger {
    pub fn new() -> Self {
        Self::with_component("remoteconf")
    }

    /// Create a logger tagged with a custom component name
    pub fn with_component(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }
}

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(component = %self.component, "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(component = %self.component, "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(component = %self.component, "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(component = %self.component, "{}", message);
    }
}

/// Install a global fmt subscriber filtered by `REMOTECONF_LOG` (default `info`)
///
/// Returns `false` if a global subscriber was already installed, in which
/// case the existing one is left alone.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
