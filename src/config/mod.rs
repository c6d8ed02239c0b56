//! Configuration system for treepath.
//!
//! This module provides the configuration structure for the `treepath`
//! command with sensible defaults and support for serialization via serde.
//! Configuration is loaded from a TOML file and overridden by command-line
//! arguments.
//!
//! # Example
//!
//! ```
//! use treepath::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.output_format, "json");
//! assert_eq!(config.indent_size, 2);
//!
//! // Create custom configuration
//! let custom = Config {
//!     output_format: "yaml".to_string(),
//!     concat_patterns: vec!["plugins".to_string()],
//!     ..Config::default()
//! };
//! assert_eq!(custom.concat_paths().len(), 1);
//! ```

use crate::path::{parse_path, Path};
use serde::{Deserialize, Serialize};

/// Configuration for the treepath command.
///
/// # Fields
///
/// * `prefer_arrays` - Create arrays for index segments when setting (default: false)
/// * `concat_patterns` - Path patterns whose arrays are concatenated when merging (default: none)
/// * `output_format` - Document output format, "json" or "yaml" (default: "json")
/// * `indent_size` - Number of spaces per JSON indentation level (default: 2)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Create arrays rather than objects for index segments in `set`
    #[serde(default)]
    pub prefer_arrays: bool,

    /// Patterns of arrays that `merge` appends instead of overlaying
    #[serde(default)]
    pub concat_patterns: Vec<String>,

    /// Output format: "json" or "yaml"
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Number of spaces per indentation level
    #[serde(default = "default_indent_size")]
    pub indent_size: usize,
}

/// Returns the default output format.
fn default_output_format() -> String {
    "json".to_string()
}

/// Returns the default indentation size.
fn default_indent_size() -> usize {
    2
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefer_arrays: false,
            concat_patterns: Vec::new(),
            output_format: default_output_format(),
            indent_size: default_indent_size(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/treepath/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|home| Self::config_path_in(&home))
    }

    /// Config file location under the given home directory.
    pub fn config_path_in(home: &std::path::Path) -> std::path::PathBuf {
        home.join(".config").join("treepath").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Self::default(),
        }
    }

    /// Loads configuration from a specific file, falling back to defaults.
    pub fn load_from(path: &std::path::Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                log::warn!("could not read {}: {}", path.display(), err);
                return Self::default();
            }
        };
        toml::from_str(&contents).unwrap_or_else(|err| {
            log::warn!("ignoring invalid config {}: {}", path.display(), err);
            Self::default()
        })
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to a specific file.
    pub fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Parses `concat_patterns`, skipping entries that are not valid paths.
    pub fn concat_paths(&self) -> Vec<Path> {
        self.concat_patterns
            .iter()
            .filter_map(|text| {
                let path = parse_path(text);
                if path.is_none() {
                    log::warn!("ignoring invalid concat pattern {:?}", text);
                }
                path
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = toml::from_str("prefer_arrays = true").unwrap();
        assert!(config.prefer_arrays);
        assert_eq!(config.output_format, "json");
        assert_eq!(config.indent_size, 2);
        assert!(config.concat_patterns.is_empty());
    }

    #[test]
    fn test_concat_paths_skips_invalid() {
        let config = Config {
            concat_patterns: vec!["a.*".to_string(), "a.".to_string(), "[0]".to_string()],
            ..Default::default()
        };
        let paths = config.concat_paths();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].to_string(), "a.*");
        assert_eq!(paths[1].to_string(), "[0]");
    }
}
