//! Structural validation of command schemas.
//!
//! Catches schemas that could never dispatch correctly (names the tokenizer
//! cannot produce, duplicate parameters, ambiguous shorthands, defaults of the
//! wrong type) at registration time instead of on first use.
//!
//! # Examples
//!
//! ```
//! use command_dispatch_core::*;
//!
//! let ok = CommandSchema::new("greet").with_param(ParamSchema::string("name"));
//! assert!(validate_command(&ok).is_empty());
//!
//! // A number parameter with a string default
//! let bad = CommandSchema::new("greet").with_param(ParamSchema::number("age").with_default("x"));
//! assert!(!validate_command(&bad).is_empty());
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::{CommandSchema, ParamSchema, ParamType};

static NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("static regex must compile")
});

/// Returns `true` if `name` is a valid command or parameter name.
pub(crate) fn is_valid_name(name: &str) -> bool {
    NAME.is_match(name)
}

/// Schema validation errors.
///
/// Each variant describes a specific structural problem. The `Display` impl
/// provides a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Command name does not match `^[A-Za-z][A-Za-z0-9_-]*$`.
    #[error("invalid command name: {0:?}")]
    InvalidCommandName(String),
    /// A command with this name is already registered.
    #[error("duplicate command: {0}")]
    DuplicateCommand(String),
    /// Parameter name cannot be written as `--name`.
    #[error("invalid parameter name: {0:?}")]
    InvalidParamName(String),
    /// Two parameters of one command share a name.
    #[error("duplicate parameter: {0}")]
    DuplicateParam(String),
    /// Shorthand is not a single ASCII letter.
    #[error("invalid shorthand {shorthand:?} for parameter {param}")]
    InvalidShorthand { param: String, shorthand: String },
    /// Two parameters of one command share a shorthand.
    #[error("duplicate shorthand: {0}")]
    DuplicateShorthand(String),
    /// Shorthand equals the name of another parameter.
    #[error("shorthand {0} shadows a parameter name")]
    ShorthandShadowsParam(String),
    /// Declared default is neither `null` nor of the parameter's type.
    #[error("default for {param} must be a {expected} or null")]
    DefaultTypeMismatch { param: String, expected: ParamType },
}

/// Rejection of a command schema at registration time.
///
/// Carries every [`SchemaError`] found by [`validate_command`], or a single
/// [`SchemaError::DuplicateCommand`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot register command {command}: {}", join_errors(.errors))]
pub struct RegistrationError {
    pub command: String,
    pub errors: Vec<SchemaError>,
}

fn join_errors(errors: &[SchemaError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validates a command schema.
///
/// Returns every problem found, in declaration order. An empty result means
/// the schema is safe to register.
pub fn validate_command(schema: &CommandSchema) -> Vec<SchemaError> {
    let mut errors = Vec::new();

    if !is_valid_name(&schema.name) {
        errors.push(SchemaError::InvalidCommandName(schema.name.clone()));
    }

    let names: HashSet<&str> = schema.params.iter().map(|p| p.name.as_str()).collect();
    let mut seen_names = HashSet::new();
    let mut seen_shorthands = HashSet::new();

    for param in &schema.params {
        if !is_valid_name(&param.name) {
            errors.push(SchemaError::InvalidParamName(param.name.clone()));
        } else if !seen_names.insert(param.name.as_str()) {
            errors.push(SchemaError::DuplicateParam(param.name.clone()));
        }

        if let Some(shorthand) = &param.shorthand {
            errors.extend(validate_shorthand(param, shorthand, &names, &mut seen_shorthands));
        }

        let default_fits = param
            .default
            .as_ref()
            .is_none_or(|default| default.fits(param.param_type));
        if !default_fits {
            errors.push(SchemaError::DefaultTypeMismatch {
                param: param.name.clone(),
                expected: param.param_type,
            });
        }
    }

    errors
}

fn validate_shorthand<'a>(
    param: &ParamSchema,
    shorthand: &'a str,
    names: &HashSet<&str>,
    seen: &mut HashSet<&'a str>,
) -> Option<SchemaError> {
    let mut chars = shorthand.chars();
    let single_letter = matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphabetic());

    if !single_letter {
        return Some(SchemaError::InvalidShorthand {
            param: param.name.clone(),
            shorthand: shorthand.to_string(),
        });
    }
    if !seen.insert(shorthand) {
        return Some(SchemaError::DuplicateShorthand(shorthand.to_string()));
    }
    if shorthand != param.name && names.contains(shorthand) {
        return Some(SchemaError::ShorthandShadowsParam(shorthand.to_string()));
    }
    None
}

#[cfg(test)]
mod tests {
    use crate::ParamValue;

    use super::*;

    #[test]
    fn test_validate_accepts_valid_schema() {
        let schema = CommandSchema::new("serve")
            .with_param(ParamSchema::number("port").with_default(8080).with_shorthand("p"))
            .with_param(ParamSchema::string("host").optional())
            .with_param(ParamSchema::boolean("tls").with_default(false));

        assert!(validate_command(&schema).is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_command_name() {
        let schema = CommandSchema::new("1st");
        assert_eq!(
            validate_command(&schema),
            vec![SchemaError::InvalidCommandName("1st".to_string())]
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_param() {
        let schema = CommandSchema::new("run")
            .with_param(ParamSchema::string("name"))
            .with_param(ParamSchema::boolean("name"));

        assert_eq!(
            validate_command(&schema),
            vec![SchemaError::DuplicateParam("name".to_string())]
        );
    }

    #[test]
    fn test_validate_rejects_bad_shorthands() {
        let schema = CommandSchema::new("run")
            .with_param(ParamSchema::boolean("all").with_shorthand("ab"))
            .with_param(ParamSchema::boolean("verbose").with_shorthand("v"))
            .with_param(ParamSchema::boolean("version").with_shorthand("v"));

        assert_eq!(
            validate_command(&schema),
            vec![
                SchemaError::InvalidShorthand {
                    param: "all".to_string(),
                    shorthand: "ab".to_string(),
                },
                SchemaError::DuplicateShorthand("v".to_string()),
            ]
        );
    }

    #[test]
    fn test_validate_rejects_shadowing_shorthand() {
        let schema = CommandSchema::new("run")
            .with_param(ParamSchema::boolean("all").with_shorthand("x"))
            .with_param(ParamSchema::string("x"));

        assert_eq!(
            validate_command(&schema),
            vec![SchemaError::ShorthandShadowsParam("x".to_string())]
        );
    }

    #[test]
    fn test_validate_rejects_default_type_mismatch() {
        let mut param = ParamSchema::boolean("force");
        param.default = Some(ParamValue::from("yes"));
        let schema = CommandSchema::new("run").with_param(param);

        assert_eq!(
            validate_command(&schema),
            vec![SchemaError::DefaultTypeMismatch {
                param: "force".to_string(),
                expected: ParamType::Boolean,
            }]
        );
    }
}
