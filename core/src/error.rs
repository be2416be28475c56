//! Error types for command resolution and argument parsing.
//!
//! Every variant is raised before a handler runs. Failures raised by the
//! handler itself are whatever error type the handler returns and never pass
//! through [`DispatchError`].

use thiserror::Error;

use crate::ParamType;

/// Errors that can occur while turning an argument vector into a handler call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// The first positional token is neither a command name nor an argument.
    #[error("invalid command name: {0}")]
    InvalidCommandName(String),

    /// No command is registered under the resolved name.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A token matches neither `--name[=value]` nor `-x`.
    #[error("malformed argument: {0}")]
    MalformedArgument(String),

    /// A raw value could not be coerced to the parameter's declared type.
    #[error("invalid value for --{name}: expected {expected}, got {value:?}")]
    TypeConversion {
        name: String,
        value: String,
        expected: ParamType,
    },

    /// Required arguments are missing and/or unknown arguments were given.
    #[error("{}", validation_message(.missing, .unknown))]
    Validation {
        missing: Vec<String>,
        unknown: Vec<String>,
    },
}

fn validation_message(missing: &[String], unknown: &[String]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("missing required arguments: {}", missing.join(", ")));
    }
    if !unknown.is_empty() {
        parts.push(format!("unknown arguments: {}", unknown.join(", ")));
    }
    parts.join("; ")
}

/// Convenience alias for results with [`DispatchError`].
pub type Result<T> = std::result::Result<T, DispatchError>;
