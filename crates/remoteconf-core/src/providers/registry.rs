//! Provider registry
//!
//! Backends describe themselves here at process start; the RC layer only
//! reads the result.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::descriptor::{ProviderDescriptor, ProviderOption};
use super::error::{RegistryError, RegistryResult};

/// Registry of provider descriptors, kept in registration order
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    providers: RwLock<Vec<ProviderDescriptor>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            providers: RwLock::new(Vec::new()),
        }
    }

    /// Create a registry holding the built-in providers
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.providers.write().push(local_descriptor());
        registry
    }

    /// Register a provider
    ///
    /// Fails with `AlreadyExists` if the name is taken.
    pub fn register(&self, descriptor: ProviderDescriptor) -> RegistryResult<()> {
        let mut providers = self.providers.write();
        if providers.iter().any(|p| p.name == descriptor.name) {
            return Err(RegistryError::AlreadyExists(descriptor.name));
        }
        providers.push(descriptor);
        Ok(())
    }

    /// All providers in registration order
    pub fn list(&self) -> Vec<ProviderDescriptor> {
        self.providers.read().clone()
    }

    /// Look up a provider by name
    pub fn lookup(&self, name: &str) -> RegistryResult<ProviderDescriptor> {
        self.providers
            .read()
            .iter()
            .find(|p| p.name == name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.read().iter().any(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.providers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.read().is_empty()
    }
}

/// Descriptor for the built-in local filesystem backend
pub fn local_descriptor() -> ProviderDescriptor {
    ProviderDescriptor::new("local", "Local Disk")
        .with_option(
            ProviderOption::new("nounc", "Disable UNC (long path names) conversion on Windows")
                .advanced(),
        )
        .with_option(
            ProviderOption::new("copy_links", "Follow symlinks and copy the pointed to item")
                .with_default("false")
                .advanced(),
        )
        .with_option(
            ProviderOption::new("skip_links", "Don't warn about skipped symlinks")
                .with_default("false")
                .advanced(),
        )
}

// Process-wide registry, populated by backends at start-up
static GLOBAL_REGISTRY: Lazy<Arc<ProviderRegistry>> =
    Lazy::new(|| Arc::new(ProviderRegistry::with_builtins()));

/// Handle to the process-wide provider registry
pub fn global_registry() -> Arc<ProviderRegistry> {
    Arc::clone(&GLOBAL_REGISTRY)
}

/// Register a provider in the process-wide registry
///
/// Backends call this once at start-up.
///
/// # Example
///
/// ```
/// use remoteconf_core::providers::{register_provider, global_registry, ProviderDescriptor};
///
/// register_provider(ProviderDescriptor::new("doc-example", "Example backend")).unwrap();
/// assert!(global_registry().contains("doc-example"));
/// ```
pub fn register_provider(descriptor: ProviderDescriptor) -> RegistryResult<()> {
    GLOBAL_REGISTRY.register(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let registry = ProviderRegistry::new();
        assert!(registry.is_empty());

        registry
            .register(ProviderDescriptor::new("sftp", "SSH/SFTP Connection"))
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("sftp").unwrap().description, "SSH/SFTP Connection");
        assert_eq!(
            registry.lookup("ftp"),
            Err(RegistryError::NotFound("ftp".to_string()))
        );
    }

    #[test]
    fn test_duplicate_register() {
        let registry = ProviderRegistry::with_builtins();
        let err = registry
            .register(ProviderDescriptor::new("local", "Another local"))
            .unwrap_err();

        assert_eq!(err, RegistryError::AlreadyExists("local".to_string()));
        // First registration wins
        assert_eq!(registry.lookup("local").unwrap().description, "Local Disk");
    }

    #[test]
    fn test_list_keeps_registration_order() {
        let registry = ProviderRegistry::new();
        for name in ["s3", "b2", "drive"] {
            registry.register(ProviderDescriptor::new(name, "")).unwrap();
        }

        let names: Vec<_> = registry.list().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["s3", "b2", "drive"]);
        // Stable across calls
        assert_eq!(registry.list(), registry.list());
    }

    #[test]
    fn test_global_registry_has_local() {
        assert!(global_registry().contains("local"));
        assert!(matches!(
            register_provider(local_descriptor()),
            Err(RegistryError::AlreadyExists(_))
        ));
    }
}
