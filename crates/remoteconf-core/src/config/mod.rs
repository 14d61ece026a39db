//! Remote configuration store
//!
//! - `ConfigStore`: the in-memory sections, serialized operations, persist-then-commit
//! - `FileStorage`: TOML file backend with atomic saves
//! - `MemoryStorage`: In-memory backend for testing

mod traits;
mod section;
mod memory;
mod file;
mod store;

pub use traits::{SectionStorage, ConfigError, ConfigResult};
pub use section::{Section, TYPE_KEY};
pub use memory::MemoryStorage;
pub use file::{FileStorage, default_config_path, CONFIG_PATH_ENV};
pub use store::ConfigStore;
