//! Configuration system for fixpath-locator.
//!
//! This module provides the user defaults for the command-line tool. Values
//! are read from a TOML file, then overridden by environment variables, and
//! finally by command-line flags in `main`.
//!
//! # Example
//!
//! ```
//! use fixpath_locator::config::{Config, OutputFormat};
//!
//! let config = Config::default();
//! assert_eq!(config.output_format, OutputFormat::Text);
//! assert_eq!(config.default_document, 0);
//!
//! let custom = Config {
//!     output_format: OutputFormat::Json,
//!     ..Config::default()
//! };
//! assert!(!custom.file_start_fallback);
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Environment variable overriding [`Config::output_format`].
pub const FORMAT_ENV: &str = "FIXPATH_LOCATOR_FORMAT";
/// Environment variable overriding [`Config::default_document`].
pub const DOCUMENT_ENV: &str = "FIXPATH_LOCATOR_DOCUMENT";

/// How resolved locations are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `FILE:LINE:COLUMN<TAB>FIX_PATH`, one per line
    Text,
    /// A JSON array of records
    Json,
    /// A YAML sequence of records
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

/// Configuration for the fixpath-locator command.
///
/// # Fields
///
/// * `output_format` - Output format when `--format` is not given (default: text)
/// * `default_document` - Document index when `--document` is not given (default: 0)
/// * `file_start_fallback` - Report 1:1 instead of 0:0 for unresolved paths (default: false)
/// * `log_level` - Log level when neither `-v` nor `RUST_LOG` is given (default: "warn")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Output format
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Document index to resolve against
    #[serde(default)]
    pub default_document: usize,

    /// Report unresolved paths at the start of the file
    #[serde(default)]
    pub file_start_fallback: bool,

    /// Log level filter understood by env_logger
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Text
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: default_output_format(),
            default_document: 0,
            file_start_fallback: false,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/fixpath-locator/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("fixpath-locator");
            path.push("config.toml");
            path
        })
    }

    /// Loads the config file and applies environment overrides.
    ///
    /// Returns the defaults (plus overrides) if the file doesn't exist or
    /// can't be parsed.
    pub fn load() -> Self {
        let config = Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default();
        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Loads configuration from a specific file, without overrides.
    pub fn load_from(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                log::warn!("ignoring invalid config {}: {}", path.display(), err);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Applies overrides looked up by variable name.
    ///
    /// Values that do not parse are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(format) = lookup(FORMAT_ENV).and_then(|v| v.parse().ok()) {
            self.output_format = format;
        }
        if let Some(document) = lookup(DOCUMENT_ENV).and_then(|v| v.trim().parse().ok()) {
            self.default_document = document;
        }
        self
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
}
