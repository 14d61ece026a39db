//! File-based section storage (TOML)
//!
//! Each remote is one table; values are strings. Saves write a sibling
//! temporary file and rename it over the config, so a concurrent reader sees
//! either the old file or the new one, never a partial write.
//!
//! ```toml
//! [myremote]
//! type = "sftp"
//! host = "example.com"
//! pass = "lG1b3RpS..."
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::section::Section;
use super::traits::{ConfigError, ConfigResult, SectionStorage};

/// Environment variable that overrides the config file location
pub const CONFIG_PATH_ENV: &str = "REMOTECONF_CONFIG";

const CONFIG_DIR_NAME: &str = "remoteconf";
const CONFIG_FILE_NAME: &str = "remoteconf.toml";

/// Default config file path
///
/// `$REMOTECONF_CONFIG` if set, otherwise `remoteconf/remoteconf.toml` under
/// the platform config directory (~/.config on Linux, ~/Library/Application
/// Support on macOS).
pub fn default_config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
    config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}

/// TOML file storage
///
/// # Example
///
/// ```no_run
/// use remoteconf_core::config::FileStorage;
///
/// // Default location
/// let user = FileStorage::user();
///
/// // Explicit path
/// let custom = FileStorage::new("/etc/remoteconf/remotes.toml");
/// ```
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create a file storage for a specific path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a file storage at the default location
    pub fn user() -> Self {
        Self::new(default_config_path())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the config file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn parse_error(&self, message: impl Into<String>) -> ConfigError {
        ConfigError::Parse {
            path: self.path.display().to_string(),
            message: message.into(),
        }
    }

    fn parse(&self, content: &str) -> ConfigResult<Vec<Section>> {
        let table: toml::Table = content
            .parse()
            .map_err(|e: toml::de::Error| self.parse_error(e.message()))?;

        let mut sections = Vec::with_capacity(table.len());
        for (name, value) in table {
            if name.is_empty() {
                return Err(self.parse_error("empty remote name"));
            }
            let toml::Value::Table(entries) = value else {
                return Err(self.parse_error(format!("{:?} is not a section", name)));
            };

            let mut section = Section::new(name.as_str());
            for (key, value) in entries {
                let value = match value {
                    toml::Value::String(s) => s,
                    toml::Value::Integer(i) => i.to_string(),
                    toml::Value::Float(f) => f.to_string(),
                    toml::Value::Boolean(b) => b.to_string(),
                    toml::Value::Datetime(d) => d.to_string(),
                    toml::Value::Array(_) | toml::Value::Table(_) => {
                        return Err(self.parse_error(format!(
                            "{}.{}: nested values are not supported",
                            name, key
                        )));
                    }
                };
                section.set(key, value);
            }
            sections.push(section);
        }
        Ok(sections)
    }

    fn serialize(sections: &[Section]) -> ConfigResult<String> {
        let mut table = toml::Table::new();
        for section in sections {
            let entries: toml::Table = section
                .entries()
                .iter()
                .map(|(k, v)| (k.clone(), toml::Value::String(v.clone())))
                .collect();
            table.insert(section.name().to_string(), toml::Value::Table(entries));
        }
        toml::to_string(&table).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }
}

impl SectionStorage for FileStorage {
    fn load(&self) -> ConfigResult<Vec<Section>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        self.parse(&content)
    }

    fn save(&self, sections: &[Section]) -> ConfigResult<()> {
        let content = Self::serialize(sections)?;

        // Ensure parent directory exists
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        // The temp file must live in the same directory for the rename to be atomic.
        // It is created 0600 on unix, which the config keeps after the rename.
        let mut tmp = tempfile::Builder::new()
            .prefix(".remoteconf-")
            .suffix(".tmp")
            .tempfile_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| ConfigError::Io(e.error))?;

        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("absent.toml"));

        assert!(!storage.exists());
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("config.toml");
        let storage = FileStorage::new(&path);

        storage
            .save(&[Section::new("remote").with("type", "local")])
            .unwrap();

        assert!(storage.exists());
        assert_eq!(storage.load().unwrap()[0].get("type"), Some("local"));
    }

    #[test]
    fn test_order_preserved() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("config.toml"));

        let sections = vec![
            Section::new("zeta").with("type", "local").with("z", "1").with("a", "2"),
            Section::new("alpha").with("type", "sftp").with("host", "example.com"),
        ];
        storage.save(&sections).unwrap();

        assert_eq!(storage.load().unwrap(), sections);
    }

    #[test]
    fn test_file_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let storage = FileStorage::new(&path);

        storage
            .save(&[Section::new("my remote").with("type", "local").with("key", "value")])
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[\"my remote\"]"));
        assert!(content.contains("type = \"local\""));
        assert!(content.contains("key = \"value\""));
    }

    #[test]
    fn test_scalars_coerced_to_strings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[remote]\ntype = \"ftp\"\nport = 21\nanon = true\n").unwrap();

        let sections = FileStorage::new(&path).load().unwrap();
        assert_eq!(sections[0].get("port"), Some("21"));
        assert_eq!(sections[0].get("anon"), Some("true"));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let storage = FileStorage::new(&path);

        for bad in [
            "[remote\ntype = \"local\"",
            "loose = \"value\"\n",
            "[remote]\nlist = [1, 2]\n",
            "[a]\ntype = \"x\"\n[a]\ntype = \"y\"\n",
        ] {
            fs::write(&path, bad).unwrap();
            let err = storage.load().unwrap_err();
            assert!(matches!(err, ConfigError::Parse { .. }), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("config.toml"));

        storage.save(&[Section::new("a")]).unwrap();
        storage.save(&[Section::new("a"), Section::new("b")]).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["config.toml"]);
    }

    #[test]
    fn test_save_into_unwritable_location() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        let storage = FileStorage::new(blocker.join("config.toml"));
        let err = storage.save(&[Section::new("a")]).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
