//! Tokenizing raw command-line strings into name/value pairs.
//!
//! Accepted token shapes:
//!
//! - `--name` and `-x` (flag shape; may take the following token as value)
//! - `--name=value` (value recorded verbatim, possibly empty)
//!
//! # Examples
//!
//! ```
//! use command_dispatch_core::tokenize;
//!
//! let raw = tokenize(&["--name=Ada", "--count", "3", "--loud", "-v"]).unwrap();
//! assert_eq!(raw.get("name"), Some(Some("Ada")));
//! assert_eq!(raw.get("count"), Some(Some("3")));
//! assert_eq!(raw.get("loud"), Some(None));
//! assert_eq!(raw.get("v"), Some(None));
//! assert_eq!(raw.get("quiet"), None);
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::error::{DispatchError, Result};

static LONG_ARG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^--([A-Za-z][A-Za-z0-9_-]*)(?:=(.*))?$").expect("static regex must compile")
});
static SHORT_ARG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-([A-Za-z])$").expect("static regex must compile"));

/// A token matched against the argument grammar.
struct ArgToken<'a> {
    name: &'a str,
    value: Option<&'a str>,
}

fn match_argument(token: &str) -> Option<ArgToken<'_>> {
    if let Some(caps) = LONG_ARG.captures(token) {
        let name = caps.get(1)?.as_str();
        let value = caps.get(2).map(|m| m.as_str());
        return Some(ArgToken { name, value });
    }
    SHORT_ARG.captures(token).and_then(|caps| {
        Some(ArgToken {
            name: caps.get(1)?.as_str(),
            value: None,
        })
    })
}

/// Returns `true` if `token` has the shape of a long or short argument.
pub(crate) fn is_argument(token: &str) -> bool {
    LONG_ARG.is_match(token) || SHORT_ARG.is_match(token)
}

/// Raw, untyped arguments keyed by name (leading dashes removed).
///
/// A `None` value is the explicit "no value" marker of a bare flag and is
/// distinct from the key being absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawArguments(BTreeMap<String, Option<String>>);

impl RawArguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an argument, replacing any earlier entry with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        self.0.insert(name.into(), value);
    }

    /// Returns `None` if absent, `Some(None)` for a bare flag, and
    /// `Some(Some(value))` otherwise.
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.0.get(name).map(Option::as_deref)
    }

    pub fn remove(&mut self, name: &str) -> Option<Option<String>> {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Argument names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Option<String>)> for RawArguments {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Converts a list of argument tokens into [`RawArguments`].
///
/// A flag-shaped token without `=value` takes the next token as its value
/// when that token is not itself argument-shaped.
///
/// # Errors
///
/// Returns [`DispatchError::MalformedArgument`] for the first token that
/// matches neither argument shape.
pub fn tokenize<S: AsRef<str>>(args: &[S]) -> Result<RawArguments> {
    let mut raw = RawArguments::new();
    let mut i = 0;

    while i < args.len() {
        let token = args[i].as_ref();
        let Some(arg) = match_argument(token) else {
            return Err(DispatchError::MalformedArgument(token.to_string()));
        };

        let value = match arg.value {
            Some(v) => Some(v.to_string()),
            None => match args.get(i + 1).map(AsRef::as_ref) {
                Some(next) if !is_argument(next) => {
                    i += 1;
                    Some(next.to_string())
                }
                _ => None,
            },
        };

        trace!(name = arg.name, value = ?value, "tokenized argument");
        raw.insert(arg.name, value);
        i += 1;
    }

    Ok(raw)
}
