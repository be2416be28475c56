//! Selecting a command from the argument vector and binding its handler.
//!
//! Dispatch is split in two explicit steps: [`Dispatcher::resolve`] performs
//! every parsing and validation step and returns an [`Invocation`];
//! [`Invocation::invoke`] runs the handler. Parse failures are therefore
//! always reported before any handler code runs.

use tracing::debug;

use crate::config::DispatchConfig;
use crate::error::{DispatchError, Result};
use crate::registry::{CommandRegistry, Handler, HandlerResult};
use crate::resolve::resolve_parameters;
use crate::shorthand::expand_shorthands;
use crate::tokenize::{is_argument, tokenize};
use crate::usage::render_usage;
use crate::validate::is_valid_name;
use crate::ResolvedParameters;

/// Determines which command `argv` names and where its arguments start.
///
/// The first `config.program_slots` entries are skipped. The next token is
/// the command name if it is name-shaped; if it is absent or argument-shaped
/// the configured default command is used and nothing is consumed.
///
/// # Errors
///
/// Returns [`DispatchError::InvalidCommandName`] if the token is present but
/// neither name-shaped nor argument-shaped.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::{DispatchConfig, select_command};
///
/// let config = DispatchConfig::default();
///
/// let argv = ["node", "bin", "greet", "--name=Ada"];
/// let (name, rest) = select_command(&argv, &config).unwrap();
/// assert_eq!(name, "greet");
/// assert_eq!(rest, &["--name=Ada"]);
///
/// let argv = ["node", "bin", "--count=3"];
/// let (name, rest) = select_command(&argv, &config).unwrap();
/// assert_eq!(name, "default");
/// assert_eq!(rest, &["--count=3"]);
///
/// assert!(select_command(&["node", "bin", "4ever"], &config).is_err());
/// ```
pub fn select_command<'a, S: AsRef<str>>(
    argv: &'a [S],
    config: &'a DispatchConfig,
) -> Result<(&'a str, &'a [S])> {
    let args = argv.get(config.program_slots..).unwrap_or(&[]);

    match args.first().map(AsRef::as_ref) {
        Some(first) if is_valid_name(first) => Ok((first, &args[1..])),
        Some(first) if !is_argument(first) => {
            Err(DispatchError::InvalidCommandName(first.to_string()))
        }
        _ => Ok((config.default_command.as_str(), args)),
    }
}

/// A command whose parameters are resolved, ready to run.
pub struct Invocation<R> {
    command: String,
    params: ResolvedParameters,
    handler: Handler<R>,
}

impl<R> Invocation<R> {
    /// Name of the selected command.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Parameters the handler will receive.
    pub fn params(&self) -> &ResolvedParameters {
        &self.params
    }

    /// Calls the handler with the resolved parameters and returns its result.
    pub fn invoke(self) -> R {
        debug!(command = %self.command, "invoking handler");
        (self.handler)(self.params)
    }
}

impl<R> std::fmt::Debug for Invocation<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invocation")
            .field("command", &self.command)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Drives command selection, tokenizing and resolution against a registry.
///
/// Holds no per-call state; a shared `&Dispatcher` may be used from several
/// threads at once when the handlers allow it.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::*;
///
/// let registry: CommandRegistry<String> = CommandRegistry::new()
///     .with_command(
///         CommandSchema::new("greet")
///             .with_param(ParamSchema::string("name"))
///             .with_param(ParamSchema::boolean("loud")),
///         |params| {
///             let name = params.get_str("name").unwrap_or_default();
///             if params.get_bool("loud") == Some(true) {
///                 format!("HELLO, {}!", name.to_uppercase())
///             } else {
///                 format!("hello, {name}")
///             }
///         },
///     )
///     .unwrap();
///
/// let dispatcher = Dispatcher::new(registry);
/// let invocation = dispatcher
///     .resolve(&["node", "bin", "greet", "--name=Ada", "--loud"])
///     .unwrap();
/// assert_eq!(invocation.command(), "greet");
/// assert_eq!(invocation.invoke(), "HELLO, ADA!");
/// ```
#[derive(Debug)]
pub struct Dispatcher<R = HandlerResult> {
    registry: CommandRegistry<R>,
    config: DispatchConfig,
}

impl<R> Dispatcher<R> {
    /// Creates a dispatcher with [`DispatchConfig::default`].
    pub fn new(registry: CommandRegistry<R>) -> Self {
        Self::with_config(registry, DispatchConfig::default())
    }

    pub fn with_config(registry: CommandRegistry<R>, config: DispatchConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &CommandRegistry<R> {
        &self.registry
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Parses and validates `argv`, binding the selected handler.
    ///
    /// The handler is not called.
    ///
    /// # Errors
    ///
    /// Any [`DispatchError`]; an unknown command is reported before any
    /// argument is parsed.
    pub fn resolve<S: AsRef<str>>(&self, argv: &[S]) -> Result<Invocation<R>> {
        let (name, args) = select_command(argv, &self.config)?;
        debug!(command = name, args = args.len(), "selected command");

        let entry = self
            .registry
            .get(name)
            .ok_or_else(|| DispatchError::UnknownCommand(name.to_string()))?;

        let mut raw = tokenize(args)?;
        if self.config.expand_shorthands {
            raw = expand_shorthands(entry.schema(), raw);
        }
        let params = resolve_parameters(entry.schema(), &raw)?;
        debug!(command = name, params = params.len(), "resolved parameters");

        Ok(Invocation {
            command: name.to_string(),
            params,
            handler: entry.handler().clone(),
        })
    }

    /// [`resolve`](Self::resolve) followed by [`Invocation::invoke`].
    pub fn dispatch<S: AsRef<str>>(&self, argv: &[S]) -> Result<R> {
        self.resolve(argv).map(Invocation::invoke)
    }

    /// Usage text for `command`, or for the whole registry when `None` or
    /// unregistered.
    pub fn usage(&self, command: Option<&str>) -> String {
        render_usage(&self.registry, command)
    }

    /// Usage text matching what `argv` asked for: the selected command's
    /// parameters when it is registered, the command list otherwise.
    pub fn usage_for<S: AsRef<str>>(&self, argv: &[S]) -> String {
        let command = select_command(argv, &self.config)
            .ok()
            .map(|(name, _)| name);
        self.usage(command)
    }
}
