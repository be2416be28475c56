//! The command registry: command schemas paired with their handlers.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::validate::{RegistrationError, SchemaError, validate_command};
use crate::{CommandSchema, ResolvedParameters};

/// Reserved command name used when the command line names no command.
pub const DEFAULT_COMMAND: &str = "default";

/// Error type handlers conventionally return.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result type handlers conventionally return.
pub type HandlerResult = std::result::Result<(), HandlerError>;

/// A command handler. Receives the resolved parameters and returns `R`.
pub type Handler<R> = Arc<dyn Fn(ResolvedParameters) -> R + Send + Sync>;

/// A registered command: its schema and its handler.
pub struct CommandEntry<R> {
    schema: CommandSchema,
    handler: Handler<R>,
}

impl<R> CommandEntry<R> {
    pub fn schema(&self) -> &CommandSchema {
        &self.schema
    }

    pub fn handler(&self) -> &Handler<R> {
        &self.handler
    }
}

impl<R> fmt::Debug for CommandEntry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEntry")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// Mapping from command name to schema and handler.
///
/// Built once before dispatch and read-only afterwards. With the default
/// `R`, handlers return [`HandlerResult`].
///
/// # Examples
///
/// ```
/// use command_dispatch_core::*;
///
/// let mut registry: CommandRegistry = CommandRegistry::new();
/// registry
///     .register(
///         CommandSchema::new("greet").with_param(ParamSchema::string("name")),
///         |params| {
///             println!("hello, {}", params.get_str("name").unwrap_or_default());
///             Ok(())
///         },
///     )
///     .unwrap();
///
/// assert!(registry.contains("greet"));
/// assert_eq!(registry.command_names(), vec!["greet"]);
///
/// // Names are validated on registration
/// let err = registry.register(CommandSchema::new("9lives"), |_| Ok(())).unwrap_err();
/// assert_eq!(err.command, "9lives");
/// ```
pub struct CommandRegistry<R = HandlerResult> {
    commands: BTreeMap<String, CommandEntry<R>>,
}

impl<R> CommandRegistry<R> {
    pub fn new() -> Self {
        Self {
            commands: BTreeMap::new(),
        }
    }

    /// Registers a command.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistrationError`] if the schema fails
    /// [`validate_command`] or the name is already taken.
    pub fn register<F>(
        &mut self,
        schema: CommandSchema,
        handler: F,
    ) -> std::result::Result<(), RegistrationError>
    where
        F: Fn(ResolvedParameters) -> R + Send + Sync + 'static,
    {
        let mut errors = validate_command(&schema);
        if self.commands.contains_key(&schema.name) {
            errors.insert(0, SchemaError::DuplicateCommand(schema.name.clone()));
        }
        if !errors.is_empty() {
            return Err(RegistrationError {
                command: schema.name,
                errors,
            });
        }

        let entry = CommandEntry {
            schema,
            handler: Arc::new(handler),
        };
        self.commands.insert(entry.schema.name.clone(), entry);
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_command<F>(
        mut self,
        schema: CommandSchema,
        handler: F,
    ) -> std::result::Result<Self, RegistrationError>
    where
        F: Fn(ResolvedParameters) -> R + Send + Sync + 'static,
    {
        self.register(schema, handler)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry<R>> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Gets all command names in sorted order.
    pub fn command_names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }

    /// Iterates over registered schemas in name order.
    pub fn schemas(&self) -> impl Iterator<Item = &CommandSchema> {
        self.commands.values().map(|entry| &entry.schema)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<R> Default for CommandRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for CommandRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.commands.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::ParamSchema;

    use super::*;

    #[test]
    fn test_register_rejects_duplicate_command() {
        let mut registry: CommandRegistry<()> = CommandRegistry::new();
        registry.register(CommandSchema::new("run"), |_| ()).unwrap();

        let err = registry
            .register(CommandSchema::new("run"), |_| ())
            .unwrap_err();
        assert_eq!(
            err.errors,
            vec![SchemaError::DuplicateCommand("run".to_string())]
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_reports_all_schema_problems() {
        let mut registry: CommandRegistry<()> = CommandRegistry::new();
        let schema = CommandSchema::new("run")
            .with_param(ParamSchema::string("-bad"))
            .with_param(ParamSchema::number("n").with_default(true));

        let err = registry.register(schema, |_| ()).unwrap_err();
        assert_eq!(err.errors.len(), 2);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_handler_is_reachable_through_entry() {
        let registry: CommandRegistry<usize> = CommandRegistry::new()
            .with_command(CommandSchema::new("count"), |params| params.len())
            .unwrap();

        let entry = registry.get("count").unwrap();
        assert_eq!(entry.schema().name, "count");
        assert_eq!((entry.handler())(ResolvedParameters::default()), 0);
    }
}
