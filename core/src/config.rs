//! Dispatcher configuration.
//!
//! Every field has a default, so an empty YAML document is a valid config.
//!
//! # Example YAML
//!
//! ```yaml
//! program_slots: 1
//! default_command: default
//! expand_shorthands: true
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::registry::DEFAULT_COMMAND;

/// Errors that can occur while loading or saving a [`DispatchConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Settings controlling how an argument vector is interpreted.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::DispatchConfig;
///
/// let config = DispatchConfig::default();
/// assert_eq!(config.program_slots, 2);
/// assert_eq!(config.default_command, "default");
/// assert!(config.expand_shorthands);
///
/// let native: DispatchConfig = serde_yaml::from_str("program_slots: 1").unwrap();
/// assert_eq!(native.program_slots, 1);
/// assert_eq!(native.default_command, "default");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Number of leading argv entries that are never inspected (interpreter,
    /// script path, binary path...).
    pub program_slots: usize,
    /// Command used when the command line names none.
    pub default_command: String,
    /// Rewrite `-x` keys to the parameter declaring shorthand `x`.
    pub expand_shorthands: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            program_slots: 2,
            default_command: DEFAULT_COMMAND.to_string(),
            expand_shorthands: true,
        }
    }
}

impl DispatchConfig {
    /// Config for a native binary, whose argv holds only the program path.
    pub fn native() -> Self {
        Self {
            program_slots: 1,
            ..Self::default()
        }
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if the file cannot be read, or
    /// [`ConfigError::YamlError`] if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if the file cannot be written, or
    /// [`ConfigError::YamlError`] if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_complete() {
        let yaml = r#"
program_slots: 0
default_command: help
expand_shorthands: false
"#;
        let config: DispatchConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.program_slots, 0);
        assert_eq!(config.default_command, "help");
        assert!(!config.expand_shorthands);
    }

    #[test]
    fn test_native_skips_one_slot() {
        assert_eq!(DispatchConfig::native().program_slots, 1);
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dispatch.yml");

        let original = DispatchConfig {
            program_slots: 1,
            default_command: "main".into(),
            expand_shorthands: false,
        };
        original.save(&path).unwrap();

        let loaded = DispatchConfig::load(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DispatchConfig::load(dir.path().join("absent.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
