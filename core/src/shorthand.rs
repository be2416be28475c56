//! Expansion of single-letter shorthands to canonical parameter names.
//!
//! Runs between tokenizing and resolution. A raw key that is not a declared
//! parameter name but equals some parameter's shorthand is renamed to that
//! parameter's name. When both forms were supplied the long form wins.

use tracing::debug;

use crate::CommandSchema;
use crate::tokenize::RawArguments;

/// Rewrites shorthand keys in `raw` to the canonical names declared by `schema`.
///
/// Keys matching no shorthand are left untouched so that resolution reports
/// them as unknown.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::*;
///
/// let schema = CommandSchema::new("greet")
///     .with_param(ParamSchema::string("name").with_shorthand("n"));
///
/// let raw = expand_shorthands(&schema, tokenize(&["-n", "Ada", "-q"]).unwrap());
/// assert_eq!(raw.get("name"), Some(Some("Ada")));
/// assert!(!raw.contains("n"));
/// assert!(raw.contains("q"));
/// ```
pub fn expand_shorthands(schema: &CommandSchema, mut raw: RawArguments) -> RawArguments {
    let aliased: Vec<(String, String)> = raw
        .names()
        .filter(|key| schema.find_param(key).is_none())
        .filter_map(|key| {
            schema
                .find_by_shorthand(key)
                .map(|param| (key.to_string(), param.name.clone()))
        })
        .collect();

    for (short, canonical) in aliased {
        let Some(value) = raw.remove(&short) else {
            continue;
        };
        if raw.contains(&canonical) {
            debug!(%short, %canonical, "shorthand ignored, long form already supplied");
            continue;
        }
        debug!(%short, %canonical, "expanded shorthand");
        raw.insert(canonical, value);
    }

    raw
}
