//! A named remote and its settings

use serde::{Deserialize, Serialize};

/// Key holding the provider name of a remote
pub const TYPE_KEY: &str = "type";

/// One configured remote: a name plus ordered `key = value` entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Builder-style `set`
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The provider this remote uses, if the `type` key is set
    pub fn provider_type(&self) -> Option<&str> {
        self.get(TYPE_KEY)
    }

    /// Set a key. Existing keys keep their position; new keys are appended.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Merge entries; keys not mentioned are kept
    pub fn merge<K, V>(&mut self, entries: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in entries {
            self.set(key, value);
        }
    }

    /// Remove a key, returning whether it was present
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| k != key);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_keeps_position() {
        let mut section = Section::new("remote")
            .with("type", "local")
            .with("a", "1")
            .with("b", "2");

        section.set("a", "10");
        section.set("c", "3");

        let keys: Vec<_> = section.entries().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["type", "a", "b", "c"]);
        assert_eq!(section.get("a"), Some("10"));
        assert_eq!(section.provider_type(), Some("local"));
    }

    #[test]
    fn test_merge_and_remove() {
        let mut section = Section::new("remote").with("k1", "v1");
        section.merge([("k1", "v1b"), ("k2", "v2")]);

        assert_eq!(section.get("k1"), Some("v1b"));
        assert_eq!(section.get("k2"), Some("v2"));
        assert_eq!(section.len(), 2);

        assert!(section.remove("k1"));
        assert!(!section.remove("k1"));
        assert_eq!(section.get("k1"), None);
    }
}
