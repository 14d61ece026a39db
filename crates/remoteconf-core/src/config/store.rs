//! The config store: in-memory sections backed by a `SectionStorage`
//!
//! Every operation holds the store lock for its whole duration, including
//! the save that follows a mutation, so operations are strictly serialized.
//!
//! Mutations are staged on a copy of the sections and only committed to
//! memory once the save succeeded. A failed save leaves memory and the
//! backend exactly as they were before the call.

use std::sync::Arc;

use parking_lot::Mutex;

use super::section::{Section, TYPE_KEY};
use super::traits::{ConfigError, ConfigResult, SectionStorage};
use crate::logging::Logger;
use crate::{log_debug, log_error, log_info};

/// Persisted store of named remotes
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use remoteconf_core::config::{ConfigStore, MemoryStorage};
/// use remoteconf_core::logging::NoOpLogger;
///
/// let store = ConfigStore::open(MemoryStorage::new(), Arc::new(NoOpLogger)).unwrap();
/// store.create_section("backup", [("type", "local")]).unwrap();
/// assert_eq!(store.get_value("backup", "type"), Some("local".to_string()));
/// ```
pub struct ConfigStore {
    sections: Mutex<Vec<Section>>,
    storage: Box<dyn SectionStorage>,
    logger: Arc<dyn Logger>,
}

impl ConfigStore {
    /// Create an empty store. Call [`ConfigStore::load`] to read the backend.
    pub fn new(storage: impl SectionStorage + 'static, logger: Arc<dyn Logger>) -> Self {
        Self {
            sections: Mutex::new(Vec::new()),
            storage: Box::new(storage),
            logger,
        }
    }

    /// Create a store and load it from the backend
    pub fn open(storage: impl SectionStorage + 'static, logger: Arc<dyn Logger>) -> ConfigResult<Self> {
        let store = Self::new(storage, logger);
        store.load()?;
        Ok(store)
    }

    /// Replace the in-memory sections with what the backend holds
    ///
    /// A backend with nothing stored yet loads as an empty store. On a parse
    /// error the in-memory sections are left as they were.
    pub fn load(&self) -> ConfigResult<()> {
        let mut sections = self.sections.lock();
        let loaded = self.storage.load().map_err(|e| {
            log_error!(
                self.logger,
                "Failed to load config from {}: {}",
                self.storage.location(),
                e
            );
            e
        })?;
        log_debug!(
            self.logger,
            "Loaded {} remotes from {}",
            loaded.len(),
            self.storage.location()
        );
        *sections = loaded;
        Ok(())
    }

    /// Write the in-memory sections to the backend
    pub fn save(&self) -> ConfigResult<()> {
        let sections = self.sections.lock();
        self.persist(&sections)
    }

    fn persist(&self, sections: &[Section]) -> ConfigResult<()> {
        self.storage.save(sections).map_err(|e| {
            log_error!(
                self.logger,
                "Failed to save config to {}: {}",
                self.storage.location(),
                e
            );
            e
        })
    }

    /// Apply `op` to a copy of the sections, persist, then commit
    ///
    /// `op` returns whether it changed anything; unchanged copies are not saved.
    fn mutate<F>(&self, op: F) -> ConfigResult<bool>
    where
        F: FnOnce(&mut Vec<Section>) -> ConfigResult<bool>,
    {
        let mut sections = self.sections.lock();
        let mut staged = sections.clone();
        if !op(&mut staged)? {
            return Ok(false);
        }
        self.persist(&staged)?;
        *sections = staged;
        Ok(true)
    }

    fn check_name(name: &str) -> ConfigResult<()> {
        if name.is_empty() {
            return Err(ConfigError::InvalidArgument("remote name can't be empty".to_string()));
        }
        Ok(())
    }

    /// Create a new remote
    ///
    /// `entries` must carry a non-empty `type`. Fails with `AlreadyExists`
    /// if `name` is taken.
    pub fn create_section<K, V>(&self, name: &str, entries: impl IntoIterator<Item = (K, V)>) -> ConfigResult<()>
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::check_name(name)?;
        let mut section = Section::new(name);
        section.merge(entries);
        if section.provider_type().map_or(true, str::is_empty) {
            return Err(ConfigError::InvalidArgument(format!(
                "remote {:?} needs a {:?} key",
                name, TYPE_KEY
            )));
        }

        self.mutate(|sections| {
            if sections.iter().any(|s| s.name() == name) {
                return Err(ConfigError::AlreadyExists(name.to_string()));
            }
            sections.push(section);
            Ok(true)
        })?;

        log_info!(self.logger, "Created remote {:?}", name);
        Ok(())
    }

    /// Get a copy of a remote
    pub fn get_section(&self, name: &str) -> ConfigResult<Section> {
        self.sections
            .lock()
            .iter()
            .find(|s| s.name() == name)
            .cloned()
            .ok_or_else(|| ConfigError::NotFound(name.to_string()))
    }

    /// Merge entries into an existing remote
    ///
    /// New keys are appended, existing keys overwritten, others kept.
    pub fn update_section<K, V>(&self, name: &str, entries: impl IntoIterator<Item = (K, V)>) -> ConfigResult<()>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut changed_keys = 0;
        self.mutate(|sections| {
            let section = sections
                .iter_mut()
                .find(|s| s.name() == name)
                .ok_or_else(|| ConfigError::NotFound(name.to_string()))?;
            for (key, value) in entries {
                section.set(key, value);
                changed_keys += 1;
            }
            Ok(true)
        })?;

        log_info!(self.logger, "Updated {} keys of remote {:?}", changed_keys, name);
        Ok(())
    }

    /// Delete a remote. Deleting an absent remote succeeds.
    pub fn delete_section(&self, name: &str) -> ConfigResult<()> {
        let removed = self.mutate(|sections| {
            let before = sections.len();
            sections.retain(|s| s.name() != name);
            Ok(sections.len() != before)
        })?;

        if removed {
            log_info!(self.logger, "Deleted remote {:?}", name);
        } else {
            log_debug!(self.logger, "Delete of absent remote {:?} ignored", name);
        }
        Ok(())
    }

    /// Copies of every remote, in store order
    pub fn dump_all(&self) -> Vec<Section> {
        self.sections.lock().clone()
    }

    /// Names of every remote, in store order
    pub fn list_names(&self) -> Vec<String> {
        self.sections
            .lock()
            .iter()
            .map(|s| s.name().to_string())
            .collect()
    }

    /// Read a single key. Absent remote or key is `None`.
    pub fn get_value(&self, name: &str, key: &str) -> Option<String> {
        self.sections
            .lock()
            .iter()
            .find(|s| s.name() == name)
            .and_then(|s| s.get(key))
            .map(str::to_string)
    }

    /// Set a single key
    ///
    /// An absent remote is created only when `key` is `type`.
    pub fn set_value(&self, name: &str, key: &str, value: &str) -> ConfigResult<()> {
        Self::check_name(name)?;
        self.mutate(|sections| {
            match sections.iter_mut().find(|s| s.name() == name) {
                Some(section) => section.set(key, value),
                None if key == TYPE_KEY => sections.push(Section::new(name).with(key, value)),
                None => {
                    return Err(ConfigError::InvalidArgument(format!(
                        "remote {:?} doesn't exist; set its {:?} first",
                        name, TYPE_KEY
                    )))
                }
            }
            Ok(true)
        })?;
        Ok(())
    }

    /// Remove a single key, returning whether it was present
    ///
    /// `type` can't be removed; delete the remote instead.
    pub fn delete_key(&self, name: &str, key: &str) -> ConfigResult<bool> {
        if key == TYPE_KEY {
            return Err(ConfigError::InvalidArgument(format!(
                "can't remove {:?} from remote {:?}",
                TYPE_KEY, name
            )));
        }
        self.mutate(|sections| {
            Ok(sections
                .iter_mut()
                .find(|s| s.name() == name)
                .map(|s| s.remove(key))
                .unwrap_or(false))
        })
    }

    /// Whether a remote exists
    pub fn contains(&self, name: &str) -> bool {
        self.sections.lock().iter().any(|s| s.name() == name)
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("storage", &self.storage)
            .field("remotes", &self.sections.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FileStorage, MemoryStorage};
    use crate::logging::NoOpLogger;
    use std::fs;
    use std::thread;
    use tempfile::tempdir;

    fn memory_store() -> ConfigStore {
        ConfigStore::open(MemoryStorage::new(), Arc::new(NoOpLogger)).unwrap()
    }

    #[test]
    fn test_create_and_get() {
        let store = memory_store();
        store
            .create_section("remote", [("type", "local"), ("test_key", "sausage")])
            .unwrap();

        let section = store.get_section("remote").unwrap();
        assert_eq!(section.provider_type(), Some("local"));
        assert_eq!(section.get("test_key"), Some("sausage"));

        assert!(matches!(
            store.create_section("remote", [("type", "local")]),
            Err(ConfigError::AlreadyExists(_))
        ));
        assert!(matches!(store.get_section("absent"), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_empty_name_rejected() {
        let store = memory_store();
        let err = store.create_section("", [("type", "local")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidArgument(_)));
        assert!(store.list_names().is_empty());
    }

    #[test]
    fn test_remote_needs_type() {
        let store = memory_store();

        let err = store.create_section::<&str, &str>("untyped", []).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidArgument(_)));
        let err = store.create_section("blank", [("type", ""), ("user", "me")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidArgument(_)));

        let err = store.set_value("untyped", "user", "me").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidArgument(_)));
        assert!(store.list_names().is_empty());

        store.set_value("remote", "type", "local").unwrap();
        let err = store.delete_key("remote", "type").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidArgument(_)));
        assert_eq!(store.get_value("remote", "type").as_deref(), Some("local"));
    }

    #[test]
    fn test_get_returns_copy() {
        let store = memory_store();
        store.create_section("remote", [("type", "local")]).unwrap();

        let mut copy = store.get_section("remote").unwrap();
        copy.set("type", "changed");

        assert_eq!(store.get_value("remote", "type"), Some("local".to_string()));
    }

    #[test]
    fn test_update_merges() {
        let store = memory_store();
        store
            .create_section("remote", [("type", "local"), ("k1", "v1")])
            .unwrap();
        store
            .update_section("remote", [("k1", "v1b"), ("k2", "v2")])
            .unwrap();

        let section = store.get_section("remote").unwrap();
        assert_eq!(section.get("type"), Some("local"));
        assert_eq!(section.get("k1"), Some("v1b"));
        assert_eq!(section.get("k2"), Some("v2"));

        assert!(matches!(
            store.update_section("absent", [("k", "v")]),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = memory_store();
        store.create_section("remote", [("type", "local")]).unwrap();

        store.delete_section("remote").unwrap();
        store.delete_section("remote").unwrap();
        store.delete_section("never-existed").unwrap();

        assert!(!store.contains("remote"));
        assert_eq!(store.get_value("remote", "type"), None);
        assert!(matches!(store.get_section("remote"), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_dump_and_list_order() {
        let store = memory_store();
        for name in ["c", "a", "b"] {
            store.create_section(name, [("type", "local")]).unwrap();
        }
        store.delete_section("a").unwrap();

        assert_eq!(store.list_names(), vec!["c", "b"]);
        let dumped: Vec<_> = store.dump_all().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(dumped, store.list_names());
    }

    #[test]
    fn test_single_key_access() {
        let store = memory_store();
        store.set_value("remote", "type", "local").unwrap();
        store.set_value("remote", "user", "me").unwrap();

        assert_eq!(store.get_value("remote", "user"), Some("me".to_string()));
        assert!(store.delete_key("remote", "user").unwrap());
        assert!(!store.delete_key("remote", "user").unwrap());
        assert!(!store.delete_key("absent", "user").unwrap());
        assert_eq!(store.get_value("remote", "user"), None);
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let storage = Arc::new(MemoryStorage::new());
        let store = ConfigStore::open(Arc::clone(&storage), Arc::new(NoOpLogger)).unwrap();
        store.create_section("remote", [("type", "local")]).unwrap();

        storage.set_fail_saves(true);

        assert!(matches!(
            store.create_section("other", [("type", "local")]),
            Err(ConfigError::Io(_))
        ));
        assert!(matches!(
            store.update_section("remote", [("type", "sftp")]),
            Err(ConfigError::Io(_))
        ));
        assert!(matches!(store.delete_section("remote"), Err(ConfigError::Io(_))));

        // Memory and backend both still hold the pre-call state
        assert_eq!(store.list_names(), vec!["remote"]);
        assert_eq!(store.get_value("remote", "type"), Some("local".to_string()));
        assert_eq!(storage.snapshot(), store.dump_all());

        // Retry succeeds once the backend recovers
        storage.set_fail_saves(false);
        store.create_section("other", [("type", "local")]).unwrap();
        assert_eq!(storage.snapshot().len(), 2);
    }

    #[test]
    fn test_absent_delete_does_not_save() {
        let storage = Arc::new(MemoryStorage::new());
        let store = ConfigStore::new(Arc::clone(&storage), Arc::new(NoOpLogger));

        store.delete_section("absent").unwrap();
        assert_eq!(storage.save_count(), 0);
    }

    #[test]
    fn test_file_persistence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config").join("remotes.toml");

        let store = ConfigStore::open(FileStorage::new(&path), Arc::new(NoOpLogger)).unwrap();
        assert!(store.list_names().is_empty());

        store.create_section("remote", [("type", "local"), ("k", "v")]).unwrap();
        assert!(path.exists());

        // A second store sees the persisted state
        let reopened = ConfigStore::open(FileStorage::new(&path), Arc::new(NoOpLogger)).unwrap();
        assert_eq!(reopened.get_section("remote").unwrap(), store.get_section("remote").unwrap());
    }

    #[test]
    fn test_load_parse_error_keeps_memory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("remotes.toml");

        let store = ConfigStore::open(FileStorage::new(&path), Arc::new(NoOpLogger)).unwrap();
        store.create_section("remote", [("type", "local")]).unwrap();

        fs::write(&path, "this is [not toml").unwrap();
        assert!(matches!(store.load(), Err(ConfigError::Parse { .. })));
        assert_eq!(store.list_names(), vec!["remote"]);
    }

    #[test]
    fn test_concurrent_creates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("remotes.toml");
        let store = Arc::new(ConfigStore::open(FileStorage::new(&path), Arc::new(NoOpLogger)).unwrap());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let name = format!("remote{}", i);
                    store.create_section(&name, [("type", "local")]).unwrap();
                    // Readers never see a half-applied create
                    assert_eq!(store.get_value(&name, "type"), Some("local".to_string()));
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.dump_all().len(), 16);
        let reopened = ConfigStore::open(FileStorage::new(&path), Arc::new(NoOpLogger)).unwrap();
        assert_eq!(reopened.list_names().len(), 16);
    }
}
