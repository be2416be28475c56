//! Plain-text usage rendering for a registry or a single command.

use crate::registry::CommandRegistry;
use crate::{CommandSchema, ParamSchema, ParamType, ParamValue};

/// Renders usage text.
///
/// With a registered `command`, describes that command's parameters;
/// otherwise lists every registered command.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::*;
///
/// let registry: CommandRegistry = CommandRegistry::new()
///     .with_command(
///         CommandSchema::new("greet")
///             .with_description("Print a greeting")
///             .with_param(ParamSchema::string("name").with_shorthand("n")),
///         |_| Ok(()),
///     )
///     .unwrap();
///
/// let all = render_usage(&registry, None);
/// assert!(all.contains("greet"));
/// assert!(all.contains("Print a greeting"));
///
/// let greet = render_usage(&registry, Some("greet"));
/// assert!(greet.contains("--name <string>, -n"));
/// assert!(greet.contains("(required)"));
/// ```
pub fn render_usage<R>(registry: &CommandRegistry<R>, command: Option<&str>) -> String {
    match command.and_then(|name| registry.get(name)) {
        Some(entry) => render_command(entry.schema()),
        None => render_commands(registry),
    }
}

fn render_commands<R>(registry: &CommandRegistry<R>) -> String {
    let mut out = String::from("Usage: <command> [--option[=value]...]\n");
    if registry.is_empty() {
        return out;
    }

    out.push_str("\nCommands:\n");
    let width = registry
        .command_names()
        .iter()
        .map(|name| name.len())
        .max()
        .unwrap_or(0);
    for schema in registry.schemas() {
        let desc = schema.description.as_deref().unwrap_or_default();
        let line = format!("  {:width$}  {desc}", schema.name);
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn render_command(schema: &CommandSchema) -> String {
    let mut out = format!("Usage: {} [--option[=value]...]\n", schema.name);
    if let Some(desc) = &schema.description {
        out.push_str(&format!("\n{desc}\n"));
    }
    if schema.params.is_empty() {
        return out;
    }

    out.push_str("\nOptions:\n");
    let forms: Vec<String> = schema.params.iter().map(option_form).collect();
    let width = forms.iter().map(String::len).max().unwrap_or(0);
    for (param, form) in schema.params.iter().zip(&forms) {
        let mut notes = Vec::new();
        if let Some(desc) = &param.description {
            notes.push(desc.clone());
        }
        notes.push(requirement(param));
        out.push_str(&format!("  {form:width$}  {}\n", notes.join(" ")));
    }
    out
}

fn option_form(param: &ParamSchema) -> String {
    let mut form = match param.param_type {
        ParamType::Boolean => format!("--{}", param.name),
        ty => format!("--{} <{ty}>", param.name),
    };
    if let Some(short) = &param.shorthand {
        form.push_str(&format!(", -{short}"));
    }
    form
}

fn requirement(param: &ParamSchema) -> String {
    match (&param.default, param.param_type) {
        (Some(ParamValue::Null), _) => "(optional)".to_string(),
        (Some(default), _) => format!("(default: {default})"),
        (None, ParamType::Boolean) => "(default: false)".to_string(),
        (None, _) => "(required)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> CommandRegistry<()> {
        CommandRegistry::new()
            .with_command(
                CommandSchema::new("serve")
                    .with_description("Start the server")
                    .with_param(ParamSchema::number("port").with_default(8080).with_shorthand("p"))
                    .with_param(ParamSchema::string("host").optional().with_description("Bind address"))
                    .with_param(ParamSchema::boolean("tls")),
                |_| (),
            )
            .unwrap()
            .with_command(CommandSchema::new("default"), |_| ())
            .unwrap()
    }

    #[test]
    fn test_command_usage_lists_parameters() {
        let text = render_usage(&registry(), Some("serve"));
        let expected = "\
Usage: serve [--option[=value]...]

Start the server

Options:
  --port <number>, -p  (default: 8080)
  --host <string>      Bind address (optional)
  --tls                (default: false)
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_registry_usage_lists_commands() {
        let text = render_usage(&registry(), None);
        let expected = "\
Usage: <command> [--option[=value]...]

Commands:
  default
  serve    Start the server
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_unknown_command_falls_back_to_list() {
        let text = render_usage(&registry(), Some("ghost"));
        assert!(text.starts_with("Usage: <command>"));
    }

    #[test]
    fn test_empty_registry() {
        let registry: CommandRegistry<()> = CommandRegistry::new();
        assert_eq!(
            render_usage(&registry, None),
            "Usage: <command> [--option[=value]...]\n"
        );
    }
}
