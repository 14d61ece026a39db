//! Handlers behind each config command
//!
//! Input has already passed the command's schema when these run, so the
//! typed getters only fail on shapes the schema does not cover (values
//! inside `parameters`).

use std::sync::Arc;

use crate::config::{ConfigStore, Section, TYPE_KEY};
use crate::logging::Logger;
use crate::log_warn;
use crate::obscure::obscure;
use crate::providers::{ProviderRegistry, RegistryError};
use crate::types::{Params, Value};

use super::command::ConfigCommand;
use super::error::{RcError, RcResult};

/// What the handlers operate on
pub(crate) struct RcContext {
    pub store: Arc<ConfigStore>,
    pub providers: Arc<ProviderRegistry>,
    pub logger: Arc<dyn Logger>,
}

pub(crate) fn run(command: ConfigCommand, ctx: &RcContext, params: &Params) -> RcResult<Option<Params>> {
    match command {
        ConfigCommand::Create => create(ctx, params),
        ConfigCommand::Get => get(ctx, params),
        ConfigCommand::Dump => dump(ctx),
        ConfigCommand::ListRemotes => list_remotes(ctx),
        ConfigCommand::Update => update(ctx, params),
        ConfigCommand::Password => password(ctx, params),
        ConfigCommand::Delete => delete(ctx, params),
        ConfigCommand::Providers => providers(ctx),
    }
}

/// Flatten `parameters` into config entries
fn entries_of(parameters: &Params) -> RcResult<Vec<(String, String)>> {
    parameters
        .iter()
        .map(|(key, value)| {
            value
                .to_config_string()
                .map(|s| (key.clone(), s))
                .ok_or_else(|| {
                    RcError::InvalidArgument(format!(
                        "parameter {:?} must be a string or bool, not {}",
                        key,
                        value.shape()
                    ))
                })
        })
        .collect()
}

fn section_params(section: &Section) -> Params {
    section
        .entries()
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}

fn create(ctx: &RcContext, params: &Params) -> RcResult<Option<Params>> {
    let name = params.get_string("name")?;
    let provider_type = params.get_string("type")?;
    let mut entries = match params.get_params_opt("parameters")? {
        Some(parameters) => entries_of(parameters)?,
        None => Vec::new(),
    };
    // The explicit `type` wins over one smuggled in through `parameters`
    entries.retain(|(k, _)| k != TYPE_KEY);

    match ctx.providers.lookup(provider_type) {
        Ok(provider) => {
            for (key, value) in entries.iter_mut() {
                if provider.is_password(key) {
                    *value = obscure(value);
                }
            }
        }
        Err(RegistryError::NotFound(_)) => {
            log_warn!(
                ctx.logger,
                "Remote {:?} uses unregistered provider {:?}; storing parameters as given",
                name, provider_type
            );
        }
        Err(e) => return Err(e.into()),
    }

    let mut section_entries = Vec::with_capacity(entries.len() + 1);
    section_entries.push((TYPE_KEY.to_string(), provider_type.to_string()));
    section_entries.extend(entries);

    ctx.store.create_section(name, section_entries)?;
    Ok(None)
}

fn get(ctx: &RcContext, params: &Params) -> RcResult<Option<Params>> {
    let section = ctx.store.get_section(params.get_string("name")?)?;
    Ok(Some(section_params(&section)))
}

fn dump(ctx: &RcContext) -> RcResult<Option<Params>> {
    let out = ctx
        .store
        .dump_all()
        .iter()
        .map(|section| (section.name(), Value::Params(section_params(section))))
        .collect();
    Ok(Some(out))
}

fn list_remotes(ctx: &RcContext) -> RcResult<Option<Params>> {
    Ok(Some(Params::new().with("remotes", ctx.store.list_names())))
}

fn update(ctx: &RcContext, params: &Params) -> RcResult<Option<Params>> {
    let name = params.get_string("name")?;
    let entries = entries_of(params.get_params("parameters")?)?;
    ctx.store.update_section(name, entries)?;
    Ok(None)
}

fn password(ctx: &RcContext, params: &Params) -> RcResult<Option<Params>> {
    let name = params.get_string("name")?;
    let entries: Vec<_> = entries_of(params.get_params("parameters")?)?
        .into_iter()
        .map(|(key, value)| (key, obscure(&value)))
        .collect();
    ctx.store.update_section(name, entries)?;
    Ok(None)
}

fn delete(ctx: &RcContext, params: &Params) -> RcResult<Option<Params>> {
    ctx.store.delete_section(params.get_string("name")?)?;
    Ok(None)
}

fn providers(ctx: &RcContext) -> RcResult<Option<Params>> {
    let providers = Params::encode("providers", &ctx.providers.list())?;
    Ok(Some(Params::new().with("providers", providers)))
}
