//! remoteconf core
//!
//! A persisted store of named remotes (each a flat set of `key = value`
//! settings with a `type` naming its backend), driven through a small
//! remote-control (RC) command surface.
//!
//! ## Layout
//!
//! - `config`: the section store, its file/memory backends and atomic saves
//! - `obscure`: reversible obscuring of password values
//! - `providers`: registry of backend types and their declared options
//! - `rc`: the `config/*` command table and handlers
//! - `types`: RC parameter values and the shared `ErrorKind`
//! - `logging`: injectable logger, backed by `tracing`
//!
//! ```rust,ignore
//! use remoteconf_core::{params, ConfigStore, Dispatcher, FileStorage, TracingLogger};
//! use remoteconf_core::providers::global_registry;
//!
//! let logger = Arc::new(TracingLogger::new());
//! let store = Arc::new(ConfigStore::open(FileStorage::user(), logger.clone())?);
//! let rc = Dispatcher::new(store, global_registry(), logger);
//!
//! rc.call("config/create", &params! { "name" => "backup", "type" => "local" })?;
//! let remotes = rc.call("config/listremotes", &params! {})?;
//! ```

pub mod types;
pub mod logging;
pub mod obscure;
pub mod config;
pub mod providers;
pub mod rc;

// Re-export commonly used types
pub use types::{ErrorKind, Params, ParamsError, Value};

pub use logging::{Logger, NoOpLogger, TracingLogger};

pub use config::{ConfigError, ConfigResult, ConfigStore, FileStorage, MemoryStorage, Section, SectionStorage};

pub use obscure::{must_reveal, obscure, reveal, ObscureError};

pub use providers::{
    ProviderDescriptor, ProviderOption, ProviderRegistry, RegistryError,
    register_provider, global_registry,
};

pub use rc::{Call, ConfigCommand, Dispatcher, RcError, RcResult};
