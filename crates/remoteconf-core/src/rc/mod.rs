//! Remote-control (RC) command surface for the config store
//!
//! Calls are addressed by path and take and return [`Params`](crate::types::Params):
//!
//! | Path | Input | Output |
//! |---|---|---|
//! | `config/create` | `name`, `type`, optional `parameters` | none |
//! | `config/get` | `name` | the remote's settings |
//! | `config/dump` | | every remote, keyed by name |
//! | `config/listremotes` | | `remotes` |
//! | `config/update` | `name`, `parameters` | none |
//! | `config/password` | `name`, `parameters` (obscured before storing) | none |
//! | `config/delete` | `name` | none |
//! | `config/providers` | | `providers` |
//!
//! ```rust,ignore
//! let call = dispatcher.lookup("config/get")?;
//! let out = call.run(&params! { "name" => "backup" })?;
//! ```

mod command;
mod dispatcher;
mod error;
mod handlers;
mod schema;

pub use command::ConfigCommand;
pub use dispatcher::{Call, Dispatcher};
pub use error::{RcError, RcResult};
pub use schema::{validate, ParamSpec};
