//! Resolving raw arguments against a command's parameter schema.
//!
//! Each declared parameter is resolved in schema order:
//!
//! 1. booleans are seeded with `false`;
//! 2. a declared default (including [`ParamValue::Null`]) overwrites the seed;
//! 3. a supplied raw value is coerced to the declared type and overwrites it;
//! 4. a bare flag sets a boolean to `true`;
//! 5. anything still unset is reported missing.
//!
//! Missing parameters and undeclared raw arguments are collected in full and
//! reported together in one [`DispatchError::Validation`].
//!
//! # Examples
//!
//! ```
//! use command_dispatch_core::*;
//!
//! let schema = CommandSchema::new("greet")
//!     .with_param(ParamSchema::string("name"))
//!     .with_param(ParamSchema::boolean("loud"));
//!
//! let raw = tokenize(&["--name=Ada", "--loud"]).unwrap();
//! let params = resolve_parameters(&schema, &raw).unwrap();
//! assert_eq!(params.get_str("name"), Some("Ada"));
//! assert_eq!(params.get_bool("loud"), Some(true));
//!
//! let raw = tokenize(&["--colour=red"]).unwrap();
//! let err = resolve_parameters(&schema, &raw).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "missing required arguments: name; unknown arguments: colour"
//! );
//! ```

use tracing::debug;

use crate::error::{DispatchError, Result};
use crate::tokenize::RawArguments;
use crate::{CommandSchema, ParamType, ParamValue, ResolvedParameters};

const TRUE_WORDS: [&str; 5] = ["true", "yes", "y", "on", "1"];
const FALSE_WORDS: [&str; 5] = ["false", "no", "n", "off", "0"];

/// Coerces a raw string to a value of type `ty`.
///
/// Returns `None` when the text is not a valid representation of the type.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::{coerce, ParamType, ParamValue};
///
/// assert_eq!(coerce(ParamType::Boolean, "YES"), Some(ParamValue::Bool(true)));
/// assert_eq!(coerce(ParamType::Boolean, "maybe"), None);
/// assert_eq!(coerce(ParamType::Number, "42"), Some(ParamValue::Number(42.0)));
/// assert_eq!(coerce(ParamType::Number, "abc"), None);
/// assert_eq!(coerce(ParamType::String, " as is "), Some(ParamValue::from(" as is ")));
/// ```
pub fn coerce(ty: ParamType, raw: &str) -> Option<ParamValue> {
    match ty {
        ParamType::Boolean => coerce_bool(raw).map(ParamValue::Bool),
        ParamType::Number => {
            let text = raw.trim();
            if !is_numeric_literal(text) {
                return None;
            }
            text.parse::<f64>().ok().map(ParamValue::Number)
        }
        ParamType::String => Some(ParamValue::String(raw.to_string())),
    }
}

/// Leading-character check that keeps `inf`, `infinity` and `NaN` out of
/// `f64::from_str`.
fn is_numeric_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

fn coerce_bool(raw: &str) -> Option<bool> {
    let lowered = raw.to_lowercase();
    if TRUE_WORDS.contains(&lowered.as_str()) {
        Some(true)
    } else if FALSE_WORDS.contains(&lowered.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Resolves `raw` against `schema`, producing exactly the declared parameters.
///
/// # Errors
///
/// - [`DispatchError::TypeConversion`] for the first value that fails to
///   coerce (resolution stops there).
/// - [`DispatchError::Validation`] when any declared parameter is missing or
///   any raw argument is undeclared; both lists are complete.
pub fn resolve_parameters(schema: &CommandSchema, raw: &RawArguments) -> Result<ResolvedParameters> {
    let mut resolved = Vec::with_capacity(schema.params.len());
    let mut missing = Vec::new();

    for param in &schema.params {
        let mut value = match param.param_type {
            ParamType::Boolean => Some(ParamValue::Bool(false)),
            _ => None,
        };

        if let Some(default) = &param.default {
            value = Some(default.clone());
        }

        match raw.get(&param.name) {
            Some(Some(text)) => {
                let coerced = coerce(param.param_type, text).ok_or_else(|| {
                    DispatchError::TypeConversion {
                        name: param.name.clone(),
                        value: text.to_string(),
                        expected: param.param_type,
                    }
                })?;
                value = Some(coerced);
            }
            Some(None) if param.param_type == ParamType::Boolean => {
                value = Some(ParamValue::Bool(true));
            }
            _ => {}
        }

        match value {
            Some(v) => resolved.push((param.name.clone(), v)),
            None => missing.push(param.name.clone()),
        }
    }

    let unknown: Vec<String> = raw
        .names()
        .filter(|name| schema.find_param(name).is_none())
        .map(String::from)
        .collect();

    if !missing.is_empty() || !unknown.is_empty() {
        debug!(command = %schema.name, ?missing, ?unknown, "argument validation failed");
        return Err(DispatchError::Validation { missing, unknown });
    }

    Ok(resolved.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use crate::{ParamSchema, tokenize};

    use super::*;

    fn raw(args: &[&str]) -> RawArguments {
        tokenize(args).unwrap()
    }

    #[test]
    fn test_default_used_when_absent() {
        let schema = CommandSchema::new("serve")
            .with_param(ParamSchema::number("port").with_default(8080))
            .with_param(ParamSchema::string("host").with_default("localhost"));

        let params = resolve_parameters(&schema, &raw(&[])).unwrap();
        assert_eq!(params.get_number("port"), Some(8080.0));
        assert_eq!(params.get_str("host"), Some("localhost"));
    }

    #[test]
    fn test_supplied_value_overrides_default() {
        let schema =
            CommandSchema::new("serve").with_param(ParamSchema::number("port").with_default(8080));

        let params = resolve_parameters(&schema, &raw(&["--port=9000"])).unwrap();
        assert_eq!(params.get_number("port"), Some(9000.0));
    }

    #[test]
    fn test_boolean_defaults_to_false() {
        let schema = CommandSchema::new("run").with_param(ParamSchema::boolean("verbose"));

        let params = resolve_parameters(&schema, &raw(&[])).unwrap();
        assert_eq!(params.get_bool("verbose"), Some(false));
    }

    #[test]
    fn test_boolean_declared_default_wins_over_seed() {
        let schema =
            CommandSchema::new("run").with_param(ParamSchema::boolean("color").with_default(true));

        let params = resolve_parameters(&schema, &raw(&[])).unwrap();
        assert_eq!(params.get_bool("color"), Some(true));
    }

    #[test]
    fn test_bare_boolean_flag_is_true() {
        let schema =
            CommandSchema::new("run").with_param(ParamSchema::boolean("color").with_default(false));

        let params = resolve_parameters(&schema, &raw(&["--color"])).unwrap();
        assert_eq!(params.get_bool("color"), Some(true));
    }

    #[test]
    fn test_boolean_explicit_value() {
        let schema = CommandSchema::new("run").with_param(ParamSchema::boolean("color"));

        let params = resolve_parameters(&schema, &raw(&["--color=off"])).unwrap();
        assert_eq!(params.get_bool("color"), Some(false));
    }

    #[test]
    fn test_null_default_makes_parameter_optional() {
        let schema = CommandSchema::new("run").with_param(ParamSchema::string("label").optional());

        let params = resolve_parameters(&schema, &raw(&[])).unwrap();
        assert!(params.is_null("label"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_bare_flag_for_string_without_default_is_missing() {
        let schema = CommandSchema::new("run").with_param(ParamSchema::string("name"));

        let err = resolve_parameters(&schema, &raw(&["--name"])).unwrap_err();
        assert_eq!(
            err,
            DispatchError::Validation {
                missing: vec!["name".into()],
                unknown: vec![],
            }
        );
    }

    #[test]
    fn test_missing_and_unknown_reported_together() {
        let schema = CommandSchema::new("person")
            .with_param(ParamSchema::number("age"))
            .with_param(ParamSchema::string("name"))
            .with_param(ParamSchema::boolean("admin"));

        let err = resolve_parameters(&schema, &raw(&["--zeta=1", "--alpha"])).unwrap_err();
        assert_eq!(
            err,
            DispatchError::Validation {
                missing: vec!["age".into(), "name".into()],
                unknown: vec!["alpha".into(), "zeta".into()],
            }
        );
    }

    #[test]
    fn test_type_conversion_is_fail_fast() {
        let schema = CommandSchema::new("run")
            .with_param(ParamSchema::number("count"))
            .with_param(ParamSchema::string("required"));

        let err = resolve_parameters(&schema, &raw(&["--count=abc", "--extra"])).unwrap_err();
        assert_eq!(
            err,
            DispatchError::TypeConversion {
                name: "count".into(),
                value: "abc".into(),
                expected: ParamType::Number,
            }
        );
    }

    #[test]
    fn test_bool_words_case_insensitive() {
        for word in ["true", "YES", "Y", "On", "1"] {
            assert_eq!(coerce(ParamType::Boolean, word), Some(ParamValue::Bool(true)), "{word}");
        }
        for word in ["FALSE", "no", "N", "oFF", "0"] {
            assert_eq!(coerce(ParamType::Boolean, word), Some(ParamValue::Bool(false)), "{word}");
        }
        assert_eq!(coerce(ParamType::Boolean, "maybe"), None);
        assert_eq!(coerce(ParamType::Boolean, ""), None);
    }

    #[test]
    fn test_number_coercion() {
        assert_eq!(coerce(ParamType::Number, "-2.5"), Some(ParamValue::Number(-2.5)));
        assert_eq!(coerce(ParamType::Number, "1e3"), Some(ParamValue::Number(1000.0)));
        assert_eq!(coerce(ParamType::Number, " +.5 "), Some(ParamValue::Number(0.5)));
        assert_eq!(coerce(ParamType::Number, "NaN"), None);
        assert_eq!(coerce(ParamType::Number, ""), None);
        assert_eq!(coerce(ParamType::Number, "-"), None);
    }

    #[test]
    fn test_number_rejects_infinity_words() {
        for word in ["inf", "INFINITY", "-Inf", "+infinity", "Infinity"] {
            assert_eq!(coerce(ParamType::Number, word), None, "{word}");
        }

        let schema = CommandSchema::new("run").with_param(ParamSchema::number("count"));
        let err = resolve_parameters(&schema, &raw(&["--count=inf"])).unwrap_err();
        assert_eq!(
            err,
            DispatchError::TypeConversion {
                name: "count".into(),
                value: "inf".into(),
                expected: ParamType::Number,
            }
        );
    }

    #[test]
    fn test_string_identity() {
        let schema = CommandSchema::new("echo").with_param(ParamSchema::string("name"));

        let params = resolve_parameters(&schema, &raw(&["--name=value"])).unwrap();
        assert_eq!(params.get_str("name"), Some("value"));
    }
}
