//! Provider descriptor types

use serde::{Deserialize, Serialize};

/// A configuration option declared by a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderOption {
    /// Key name as stored in the remote's section
    pub name: String,
    /// Help text shown to users
    #[serde(default)]
    pub help: String,
    /// Default value, empty if none
    #[serde(default)]
    pub default: String,
    /// Value must be obscured before it is stored
    #[serde(default)]
    pub is_password: bool,
    /// The remote does not work without this option
    #[serde(default)]
    pub required: bool,
    /// Hidden from basic configuration flows
    #[serde(default)]
    pub advanced: bool,
}

impl ProviderOption {
    pub fn new(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            default: String::new(),
            is_password: false,
            required: false,
            advanced: false,
        }
    }

    /// Mark as a password option
    pub fn password(mut self) -> Self {
        self.is_password = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn advanced(mut self) -> Self {
        self.advanced = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }
}

/// Describes one backend type that remotes can be configured with
///
/// # Example
///
/// ```
/// use remoteconf_core::providers::{ProviderDescriptor, ProviderOption};
///
/// let sftp = ProviderDescriptor::new("sftp", "SSH/SFTP Connection")
///     .with_option(ProviderOption::new("host", "SSH host to connect to").required())
///     .with_option(ProviderOption::new("pass", "SSH password").password());
///
/// assert_eq!(sftp.password_options().collect::<Vec<_>>(), vec!["pass"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    /// Unique name, used as the `type` of a remote
    pub name: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Declared options, in declaration order
    #[serde(default)]
    pub options: Vec<ProviderOption>,
}

impl ProviderDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
        }
    }

    pub fn with_option(mut self, option: ProviderOption) -> Self {
        self.options.push(option);
        self
    }

    /// Find a declared option by name
    pub fn option(&self, name: &str) -> Option<&ProviderOption> {
        self.options.iter().find(|o| o.name == name)
    }

    /// Whether `key` is declared as a password option
    pub fn is_password(&self, key: &str) -> bool {
        self.option(key).map(|o| o.is_password).unwrap_or(false)
    }

    /// Names of all password options
    pub fn password_options(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .filter(|o| o.is_password)
            .map(|o| o.name.as_str())
    }
}
