//! RC call table
//!
//! The table is built once, when the dispatcher is created, from the closed
//! [`ConfigCommand`] set. Looking a call up has no side effects; running it
//! validates the input against the call's schema and then runs the handler.

use std::sync::Arc;

use crate::config::ConfigStore;
use crate::logging::Logger;
use crate::{log_debug, log_warn};
use crate::providers::ProviderRegistry;
use crate::types::Params;

use super::command::ConfigCommand;
use super::error::{RcError, RcResult};
use super::handlers::{self, RcContext};
use super::schema::{self, ParamSpec};

/// A registered RC call
pub struct Call {
    command: ConfigCommand,
    ctx: Arc<RcContext>,
}

impl Call {
    pub fn command(&self) -> ConfigCommand {
        self.command
    }

    pub fn path(&self) -> &'static str {
        self.command.path()
    }

    pub fn title(&self) -> &'static str {
        self.command.title()
    }

    pub fn help(&self) -> &'static str {
        self.command.help()
    }

    pub fn schema(&self) -> &'static [ParamSpec] {
        self.command.schema()
    }

    /// Validate `params` and run the handler
    ///
    /// `Ok(None)` means success with no output, which is distinct from an
    /// empty result map.
    pub fn run(&self, params: &Params) -> RcResult<Option<Params>> {
        let logger = &self.ctx.logger;
        log_debug!(logger, "rc: {}: called", self.path());

        let result = schema::validate(self.schema(), params)
            .and_then(|()| handlers::run(self.command, &self.ctx, params));

        match &result {
            Ok(_) => log_debug!(logger, "rc: {}: done", self.path()),
            Err(e) => log_warn!(logger, "rc: {}: failed ({}): {}", self.path(), e.kind(), e),
        }
        result
    }
}

impl std::fmt::Debug for Call {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Call").field("path", &self.path()).finish()
    }
}

/// Routes RC calls by path to the config store and provider registry
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use remoteconf_core::config::{ConfigStore, MemoryStorage};
/// use remoteconf_core::logging::NoOpLogger;
/// use remoteconf_core::providers::ProviderRegistry;
/// use remoteconf_core::rc::Dispatcher;
/// use remoteconf_core::params;
///
/// let logger = Arc::new(NoOpLogger);
/// let store = Arc::new(ConfigStore::open(MemoryStorage::new(), logger.clone()).unwrap());
/// let rc = Dispatcher::new(store, Arc::new(ProviderRegistry::with_builtins()), logger);
///
/// let out = rc.call("config/create", &params! { "name" => "disk", "type" => "local" }).unwrap();
/// assert!(out.is_none());
///
/// let out = rc.call("config/get", &params! { "name" => "disk" }).unwrap().unwrap();
/// assert_eq!(out.get_string("type").unwrap(), "local");
/// ```
pub struct Dispatcher {
    calls: Vec<Call>,
    ctx: Arc<RcContext>,
}

impl Dispatcher {
    pub fn new(
        store: Arc<ConfigStore>,
        providers: Arc<ProviderRegistry>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let ctx = Arc::new(RcContext {
            store,
            providers,
            logger,
        });
        let calls = ConfigCommand::ALL
            .into_iter()
            .map(|command| Call {
                command,
                ctx: Arc::clone(&ctx),
            })
            .collect();
        Self { calls, ctx }
    }

    /// Find a call by path without running it
    pub fn get(&self, path: &str) -> Option<&Call> {
        self.calls.iter().find(|c| c.path() == path)
    }

    /// Find a call by path, failing with `NotFound`
    pub fn lookup(&self, path: &str) -> RcResult<&Call> {
        self.get(path).ok_or_else(|| {
            log_warn!(self.ctx.logger, "rc: unknown method {:?}", path);
            RcError::NotFound(path.to_string())
        })
    }

    /// All registered calls, in registration order
    pub fn list(&self) -> &[Call] {
        &self.calls
    }

    /// Look up and run a call
    pub fn call(&self, path: &str, params: &Params) -> RcResult<Option<Params>> {
        self.lookup(path)?.run(params)
    }

    /// Run a call with JSON input and output, for transports
    ///
    /// `null` input is treated as an empty object.
    pub fn call_json(&self, path: &str, input: serde_json::Value) -> RcResult<Option<serde_json::Value>> {
        let call = self.lookup(path)?;
        let params = match input {
            serde_json::Value::Null => Params::new(),
            other => Params::from_json(other)?,
        };
        Ok(call.run(&params)?.map(|out| out.to_json()))
    }

    pub fn store(&self) -> &Arc<ConfigStore> {
        &self.ctx.store
    }

    pub fn providers(&self) -> &Arc<ProviderRegistry> {
        &self.ctx.providers
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("calls", &self.calls)
            .field("store", &self.ctx.store)
            .finish()
    }
}
