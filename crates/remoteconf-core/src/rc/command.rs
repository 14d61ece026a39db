//! The closed set of config RC commands

use std::fmt;
use std::str::FromStr;

use crate::types::ValueShape;

use super::error::RcError;
use super::schema::ParamSpec;

/// Every command served under `config/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigCommand {
    Create,
    Get,
    Dump,
    ListRemotes,
    Update,
    Password,
    Delete,
    Providers,
}

const NAME_ONLY: &[ParamSpec] = &[ParamSpec::required("name", ValueShape::String)];

const NAME_AND_PARAMETERS: &[ParamSpec] = &[
    ParamSpec::required("name", ValueShape::String),
    ParamSpec::required("parameters", ValueShape::Params),
];

const CREATE: &[ParamSpec] = &[
    ParamSpec::required("name", ValueShape::String),
    ParamSpec::required("type", ValueShape::String),
    ParamSpec::optional("parameters", ValueShape::Params),
];

impl ConfigCommand {
    /// All commands, in registration order
    pub const ALL: [ConfigCommand; 8] = [
        ConfigCommand::Create,
        ConfigCommand::Get,
        ConfigCommand::Dump,
        ConfigCommand::ListRemotes,
        ConfigCommand::Update,
        ConfigCommand::Password,
        ConfigCommand::Delete,
        ConfigCommand::Providers,
    ];

    /// Wire path of the command
    pub fn path(&self) -> &'static str {
        match self {
            ConfigCommand::Create => "config/create",
            ConfigCommand::Get => "config/get",
            ConfigCommand::Dump => "config/dump",
            ConfigCommand::ListRemotes => "config/listremotes",
            ConfigCommand::Update => "config/update",
            ConfigCommand::Password => "config/password",
            ConfigCommand::Delete => "config/delete",
            ConfigCommand::Providers => "config/providers",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ConfigCommand::Create => "Create a new remote",
            ConfigCommand::Get => "Get the settings of a remote",
            ConfigCommand::Dump => "Dump every remote and its settings",
            ConfigCommand::ListRemotes => "List remote names",
            ConfigCommand::Update => "Merge settings into a remote",
            ConfigCommand::Password => "Store obscured secrets in a remote",
            ConfigCommand::Delete => "Delete a remote",
            ConfigCommand::Providers => "List available providers and their options",
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            ConfigCommand::Create => {
                "Parameters:\n\n- name - name of remote\n- type - type of new remote\n- parameters - a map of { \"key\": \"value\" } pairs\n\nOptions the provider marks as passwords are obscured before they are stored.\n"
            }
            ConfigCommand::Get => {
                "Parameters:\n\n- name - name of remote to get\n\nReturns the settings as a JSON object with keys sorted by name.\n"
            }
            ConfigCommand::Dump => {
                "Returns a JSON object:\n- key: value\n\nWhere keys are remote names and values are the config parameters.\nRemotes and their keys are sorted by name; use config/listremotes for file order.\n"
            }
            ConfigCommand::ListRemotes => "Returns\n- remotes - array of remote names\n",
            ConfigCommand::Update => {
                "Parameters:\n\n- name - name of remote\n- parameters - a map of { \"key\": \"value\" } pairs\n\nValues are stored as given.\n"
            }
            ConfigCommand::Password => {
                "Parameters:\n\n- name - name of remote\n- parameters - a map of { \"key\": \"value\" } pairs\n\nEvery value is obscured before it is stored.\n"
            }
            ConfigCommand::Delete => "Parameters:\n\n- name - name of remote to delete\n",
            ConfigCommand::Providers => "Returns a JSON object:\n- providers - array of objects\n\nSee the provider descriptors for the fields.\n",
        }
    }

    /// Declared input keys
    pub fn schema(&self) -> &'static [ParamSpec] {
        match self {
            ConfigCommand::Create => CREATE,
            ConfigCommand::Get | ConfigCommand::Delete => NAME_ONLY,
            ConfigCommand::Update | ConfigCommand::Password => NAME_AND_PARAMETERS,
            ConfigCommand::Dump | ConfigCommand::ListRemotes | ConfigCommand::Providers => &[],
        }
    }

    /// Find the command served at `path`
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.path() == path)
    }
}

impl fmt::Display for ConfigCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for ConfigCommand {
    type Err = RcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_path(s).ok_or_else(|| RcError::NotFound(s.to_string()))
    }
}
