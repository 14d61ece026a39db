//! Backend provider registry
//!
//! A provider is a backend type that remotes can be configured with. Each
//! provider declares its options; options flagged as passwords are obscured
//! by `config/create` before they reach the config file.

mod descriptor;
mod error;
mod registry;

pub use descriptor::{ProviderDescriptor, ProviderOption};
pub use error::{RegistryError, RegistryResult};
pub use registry::{global_registry, local_descriptor, register_provider, ProviderRegistry};
