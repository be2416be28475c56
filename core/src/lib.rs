//! Typed command-line argument dispatch.
//!
//! A consumer declares its commands as [`CommandSchema`]s, each an ordered
//! list of typed [`ParamSchema`]s, and registers them with a handler in a
//! [`CommandRegistry`]. A [`Dispatcher`] then turns an argument vector into a
//! handler call:
//!
//! - [`select_command`] picks the command named after the program slots, or
//!   the `"default"` command when the line starts with an argument;
//! - [`tokenize`] turns `--name`, `--name=value`, `--name value` and `-x`
//!   tokens into [`RawArguments`];
//! - [`expand_shorthands`] maps `-x` keys to canonical parameter names;
//! - [`resolve_parameters`] applies defaults, coerces values and reports
//!   missing and unknown arguments together;
//! - [`Invocation::invoke`] finally runs the handler.
//!
//! Schemas are checked on registration by [`validate_command`].
//!
//! # Example
//!
//! ```
//! use command_dispatch_core::*;
//!
//! let registry: CommandRegistry<String> = CommandRegistry::new()
//!     .with_command(
//!         CommandSchema::new("person").with_param(ParamSchema::number("age")),
//!         |params| format!("age {}", params.get_number("age").unwrap_or_default()),
//!     )
//!     .unwrap();
//! let dispatcher = Dispatcher::new(registry);
//!
//! let out = dispatcher.dispatch(&["node", "bin", "person", "--age", "42"]).unwrap();
//! assert_eq!(out, "age 42");
//!
//! let err = dispatcher.dispatch(&["node", "bin", "person"]).unwrap_err();
//! assert_eq!(
//!     err,
//!     DispatchError::Validation { missing: vec!["age".into()], unknown: vec![] }
//! );
//! ```

mod config;
mod dispatch;
mod error;
mod registry;
mod resolve;
mod run;
mod shorthand;
mod tokenize;
mod types;
mod usage;
mod validate;

pub use config::{ConfigError, DispatchConfig};
pub use dispatch::{Dispatcher, Invocation, select_command};
pub use error::{DispatchError, Result};
pub use registry::{
    CommandEntry, CommandRegistry, DEFAULT_COMMAND, Handler, HandlerError, HandlerResult,
};
pub use resolve::{coerce, resolve_parameters};
pub use run::run_to_exit;
pub use shorthand::expand_shorthands;
pub use tokenize::{RawArguments, tokenize};
pub use types::*;
pub use usage::render_usage;
pub use validate::{RegistrationError, SchemaError, validate_command};
