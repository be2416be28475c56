//! Schema type definitions for command dispatch.
//!
//! This module defines the declarative data model a consumer uses to describe
//! its commands: a [`CommandSchema`] per command, holding an ordered list of
//! [`ParamSchema`] entries, each with a [`ParamType`] and an optional
//! [`ParamValue`] default. The schema types are plain data and round-trip
//! through JSON and YAML with [`serde`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Declared type of a parameter.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::ParamType;
///
/// assert_eq!(ParamType::Number.to_string(), "number");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// `true` / `false`; may be given as a bare flag.
    Boolean,
    /// Any numeric literal that parses to a non-NaN `f64`.
    Number,
    /// Verbatim text.
    String,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamType::Boolean => "boolean",
            ParamType::Number => "number",
            ParamType::String => "string",
        };
        f.write_str(name)
    }
}

/// A typed parameter value.
///
/// [`ParamValue::Null`] is the optionality marker: a parameter whose default
/// is `Null` may be omitted, and then resolves to `Null` instead of being
/// reported missing.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::{ParamType, ParamValue};
///
/// let v = ParamValue::from(42);
/// assert_eq!(v.as_number(), Some(42.0));
/// assert_eq!(v.param_type(), Some(ParamType::Number));
/// assert_eq!(ParamValue::Null.param_type(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// String value.
    String(String),
    /// Explicit "no value" for optional parameters.
    Null,
}

impl ParamValue {
    /// Returns the type this value carries, or `None` for [`ParamValue::Null`].
    pub fn param_type(&self) -> Option<ParamType> {
        match self {
            ParamValue::Bool(_) => Some(ParamType::Boolean),
            ParamValue::Number(_) => Some(ParamType::Number),
            ParamValue::String(_) => Some(ParamType::String),
            ParamValue::Null => None,
        }
    }

    /// Returns `true` when this value can stand in for a parameter of type `ty`.
    pub fn fits(&self, ty: ParamType) -> bool {
        self.param_type().is_none_or(|own| own == ty)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Number(n) => write!(f, "{n}"),
            ParamValue::String(s) => write!(f, "{s:?}"),
            ParamValue::Null => f.write_str("null"),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Number(f64::from(value))
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

/// Schema for one named parameter of a command.
///
/// Use the typed constructors ([`boolean`](ParamSchema::boolean),
/// [`number`](ParamSchema::number), [`string`](ParamSchema::string)) and chain
/// builder methods.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::{ParamSchema, ParamType, ParamValue};
///
/// let port = ParamSchema::number("port")
///     .with_default(8080)
///     .with_shorthand("p")
///     .with_description("Port to listen on");
/// assert_eq!(port.param_type, ParamType::Number);
/// assert_eq!(port.default, Some(ParamValue::Number(8080.0)));
/// assert!(port.is_optional());
///
/// let name = ParamSchema::string("name");
/// assert!(!name.is_optional());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSchema {
    /// Parameter name as written after `--` on the command line.
    pub name: String,
    /// Declared value type.
    #[serde(rename = "type")]
    pub param_type: ParamType,
    /// Default value, or [`ParamValue::Null`] to mark the parameter optional.
    #[serde(
        default,
        deserialize_with = "deserialize_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<ParamValue>,
    /// Single-letter alias used with one dash (e.g. `"p"` for `-p`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shorthand: Option<String>,
    /// Human-readable description for usage output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// An explicit `null` is the optionality marker, not an absent default.
fn deserialize_default<'de, D>(deserializer: D) -> Result<Option<ParamValue>, D::Error>
where
    D: Deserializer<'de>,
{
    ParamValue::deserialize(deserializer).map(Some)
}

impl ParamSchema {
    /// Creates a parameter of the given type with no default.
    pub fn new(name: &str, param_type: ParamType) -> Self {
        Self {
            name: name.to_string(),
            param_type,
            default: None,
            shorthand: None,
            description: None,
        }
    }

    /// Creates a boolean parameter. Booleans resolve to `false` when absent.
    pub fn boolean(name: &str) -> Self {
        Self::new(name, ParamType::Boolean)
    }

    /// Creates a numeric parameter.
    pub fn number(name: &str) -> Self {
        Self::new(name, ParamType::Number)
    }

    /// Creates a string parameter.
    pub fn string(name: &str) -> Self {
        Self::new(name, ParamType::String)
    }

    /// Sets the default value.
    pub fn with_default(mut self, value: impl Into<ParamValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Marks the parameter optional: absence resolves to [`ParamValue::Null`].
    pub fn optional(mut self) -> Self {
        self.default = Some(ParamValue::Null);
        self
    }

    /// Sets the single-letter shorthand (without the leading dash).
    pub fn with_shorthand(mut self, shorthand: &str) -> Self {
        self.shorthand = Some(shorthand.to_string());
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Returns `true` when omitting the parameter does not make it missing.
    pub fn is_optional(&self) -> bool {
        self.default.is_some() || self.param_type == ParamType::Boolean
    }
}

/// Declared parameter set of one command.
///
/// Parameter order is preserved and is the order in which they are resolved
/// and listed in usage text.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::{CommandSchema, ParamSchema};
///
/// let greet = CommandSchema::new("greet")
///     .with_description("Say hello")
///     .with_param(ParamSchema::string("name").with_shorthand("n"))
///     .with_param(ParamSchema::boolean("loud"));
///
/// assert_eq!(greet.param_names(), vec!["name", "loud"]);
/// assert_eq!(greet.find_by_shorthand("n").unwrap().name, "name");
/// assert!(greet.find_param("quiet").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandSchema {
    /// Command name as typed on the command line.
    pub name: String,
    /// Short description of the command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared parameters, in declaration order.
    #[serde(default)]
    pub params: Vec<ParamSchema>,
}

impl CommandSchema {
    /// Creates an empty command schema with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Adds a parameter.
    pub fn with_param(mut self, param: ParamSchema) -> Self {
        self.params.push(param);
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Finds a parameter by its canonical name.
    pub fn find_param(&self, name: &str) -> Option<&ParamSchema> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Finds a parameter by its shorthand.
    pub fn find_by_shorthand(&self, shorthand: &str) -> Option<&ParamSchema> {
        self.params
            .iter()
            .find(|p| p.shorthand.as_deref() == Some(shorthand))
    }

    /// Gets all parameter names in declaration order.
    pub fn param_names(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.name.as_str()).collect()
    }
}

/// Fully resolved, typed parameters handed to a command handler.
///
/// Contains exactly the parameter names declared by the command's schema.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::{ParamValue, ResolvedParameters};
///
/// let params: ResolvedParameters = [
///     ("name".to_string(), ParamValue::from("Ada")),
///     ("loud".to_string(), ParamValue::from(true)),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(params.get_str("name"), Some("Ada"));
/// assert_eq!(params.get_bool("loud"), Some(true));
/// assert_eq!(params.get_number("name"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedParameters(BTreeMap<String, ParamValue>);

impl ResolvedParameters {
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(ParamValue::as_bool)
    }

    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ParamValue::as_number)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::as_str)
    }

    /// Returns `true` if `name` resolved to [`ParamValue::Null`].
    pub fn is_null(&self, name: &str) -> bool {
        self.get(name).is_some_and(ParamValue::is_null)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_inner(self) -> BTreeMap<String, ParamValue> {
        self.0
    }
}

impl FromIterator<(String, ParamValue)> for ResolvedParameters {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
